// src/targets/file.rs
// =============================================================================
// Loading target lists from disk.
//
// The file format is a plain JSON array of URL strings:
//
//   [
//     "https://example.com",
//     "https://example.org"
//   ]
//
// This is the format of the websites.json file kept next to the dashboard,
// so an existing list can be probed from the command line unchanged.
// =============================================================================

use anyhow::{Context, Result};
use std::path::Path;

/// File picked up from the working directory when no targets are given.
pub const DEFAULT_TARGETS_FILE: &str = "websites.json";

// Reads a JSON array of URL strings
//
// Returns the raw strings; validation happens in TargetList::parse so that
// file entries and command-line entries go through the same rules.
pub fn load_targets_file(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read targets file {}", path.display()))?;

    let targets: Vec<String> = serde_json::from_str(&content).with_context(|| {
        format!(
            "targets file {} must be a JSON array of URL strings",
            path.display()
        )
    })?;

    log::debug!("loaded {} target(s) from {}", targets.len(), path.display());
    Ok(targets)
}

// Prefixes "https://" to an entry that has no scheme at all
//
// "example.com"         -> "https://example.com"
// "http://example.com"  -> unchanged
// "  example.com/a "    -> "https://example.com/a"
pub fn assume_https(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "site-prober-{}-{}.json",
            name,
            std::process::id()
        ));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_targets_file() {
        let path = temp_file("ok", r#"["https://a.test", "https://b.test"]"#);
        let targets = load_targets_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(targets, vec!["https://a.test", "https://b.test"]);
    }

    #[test]
    fn test_load_rejects_non_array() {
        let path = temp_file("bad", r#"{"url": "https://a.test"}"#);
        let result = load_targets_file(&path);
        std::fs::remove_file(&path).ok();
        assert!(result.is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_targets_file(Path::new("/definitely/not/here/websites.json"));
        assert!(result.is_err());
    }

    #[test]
    fn test_assume_https() {
        assert_eq!(assume_https("example.com"), "https://example.com");
        assert_eq!(assume_https(" example.com/a "), "https://example.com/a");
        assert_eq!(assume_https("http://example.com"), "http://example.com");
        assert_eq!(assume_https(""), "");
    }
}
