// src/targets/list.rs
// =============================================================================
// Target and TargetList.
//
// A Target is an absolute http/https URL with a host. We keep two views of it:
// - the caller's spelling (trimmed), which becomes the key in the report
// - the parsed Url, used to send the request and to detect duplicates
//
// Duplicates are detected on the parsed (normalized) form, so
// "https://example.com" and "https://example.com/" count as the same site and
// the list is rejected instead of reporting that site twice.
// =============================================================================

use std::collections::HashMap;
use std::fmt;

use url::Url;

use crate::error::{Error, Result};

/// One site to probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    raw: String,
    url: Url,
}

impl Target {
    /// Parses and validates a single target.
    pub fn parse(input: &str) -> Result<Self> {
        let raw = input.trim();

        if raw.is_empty() {
            return Err(Error::InvalidTarget {
                target: input.to_string(),
                reason: "empty URL".to_string(),
            });
        }

        let url = Url::parse(raw).map_err(|e| Error::InvalidTarget {
            target: raw.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::UnsupportedScheme {
                target: raw.to_string(),
                scheme: url.scheme().to_string(),
            });
        }

        if url.host_str().map_or(true, str::is_empty) {
            return Err(Error::InvalidTarget {
                target: raw.to_string(),
                reason: "missing host".to_string(),
            });
        }

        Ok(Self {
            raw: raw.to_string(),
            url,
        })
    }

    /// The URL exactly as the caller wrote it (minus surrounding whitespace).
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Ordered set of unique targets, in the order the caller supplied them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetList {
    targets: Vec<Target>,
}

impl TargetList {
    /// Validates every entry; the first bad entry rejects the whole list.
    pub fn parse<I, S>(inputs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut targets: Vec<Target> = Vec::new();
        // normalized url -> index of first occurrence
        let mut seen: HashMap<String, usize> = HashMap::new();

        for input in inputs {
            let target = Target::parse(input.as_ref())?;

            if let Some(&first) = seen.get(target.url.as_str()) {
                return Err(Error::DuplicateTarget {
                    target: target.raw,
                    first: targets[first].raw.clone(),
                });
            }

            seen.insert(target.url.as_str().to_string(), targets.len());
            targets.push(target);
        }

        Ok(Self { targets })
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Target> {
        self.targets.iter()
    }
}

impl<'a> IntoIterator for &'a TargetList {
    type Item = &'a Target;
    type IntoIter = std::slice::Iter<'a, Target>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does Url::parse normalize?
//    - Lowercases the scheme and host, adds "/" as an empty path,
//      drops default ports (":443" on https)
//    - Comparing url.as_str() therefore catches most spelling variants
//
// 2. Why does DuplicateTarget carry the first spelling too?
//    - A long targets file is easier to fix when the error names both entries
// -----------------------------------------------------------------------------
