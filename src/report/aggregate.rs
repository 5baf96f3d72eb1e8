// src/report/aggregate.rs
// =============================================================================
// Aggregation of probe outcomes into a RunReport.
//
// The JSON form of a report is fixed:
//
//   {
//     "timestamp": "2024-05-01T12:00:00.000000Z",
//     "summary": { "total_sites": 3, "online": 1, "warnings": 1, "offline": 1 },
//     "details": {
//       "https://ok.test": { "status": "Online (200)", "response_time": 50.0, "status_code": 200 },
//       ...
//     }
//   }
//
// `details` keeps the order of the outcomes it was built from, which is the
// input order of the targets. Nothing here depends on when probes finished.
// =============================================================================

use chrono::{DateTime, Utc};
use serde::ser::{Serialize, Serializer};
use std::collections::HashSet;

use crate::probe::{Classification, ProbeOutcome};

/// Counts by classification. `total_sites == online + warnings + offline`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct Summary {
    pub total_sites: usize,
    pub online: usize,
    pub warnings: usize,
    pub offline: usize,
}

impl Summary {
    fn count(outcomes: &[ProbeOutcome]) -> Self {
        outcomes
            .iter()
            .fold(Summary::default(), |mut summary, outcome| {
                summary.total_sites += 1;
                match outcome.classification() {
                    Classification::Online => summary.online += 1,
                    Classification::Warning => summary.warnings += 1,
                    Classification::Offline => summary.offline += 1,
                }
                summary
            })
    }
}

/// Report for one run. Immutable once built.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RunReport {
    timestamp: DateTime<Utc>,
    summary: Summary,
    details: Details,
}

impl RunReport {
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn summary(&self) -> Summary {
        self.summary
    }

    /// Outcomes in input order.
    pub fn details(&self) -> &[ProbeOutcome] {
        &self.details.0
    }

    pub fn detail(&self, target: &str) -> Option<&ProbeOutcome> {
        self.details.0.iter().find(|o| o.target() == target)
    }

    /// True when every site is Online (an empty report counts as healthy).
    pub fn all_online(&self) -> bool {
        self.summary.online == self.summary.total_sites
    }
}

// Reduces outcomes to a report stamped with the current time
//
// An empty list is a valid, all-zero report. Targets must be unique (a
// TargetList guarantees it): details is a JSON map keyed by target, so a
// repeated target would leave total_sites larger than the map.
pub fn aggregate(outcomes: Vec<ProbeOutcome>) -> RunReport {
    debug_assert!(
        targets_are_unique(&outcomes),
        "aggregate() needs one outcome per distinct target"
    );

    // Counting happens once here; the report never recounts
    let summary = Summary::count(&outcomes);

    RunReport {
        timestamp: Utc::now(),
        summary,
        details: Details(outcomes),
    }
}

fn targets_are_unique(outcomes: &[ProbeOutcome]) -> bool {
    let mut seen = HashSet::with_capacity(outcomes.len());
    outcomes.iter().all(|outcome| seen.insert(outcome.target()))
}

// Ordered "<url>": {...} map
#[derive(Debug, Clone)]
struct Details(Vec<ProbeOutcome>);

#[derive(serde::Serialize)]
struct DetailEntry {
    status: String,
    response_time: Option<f64>,
    status_code: Option<u16>,
}

impl Serialize for Details {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // collect_map writes entries in iteration order, so input order survives
        serializer.collect_map(self.0.iter().map(|outcome| {
            (
                outcome.target(),
                DetailEntry {
                    status: outcome.status_label(),
                    response_time: outcome.response_time_ms(),
                    status_code: outcome.status_code(),
                },
            )
        }))
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a custom Serialize for Details?
//    - The report wants a JSON object keyed by URL, in input order
//    - Deriving Serialize on Vec<ProbeOutcome> would give a JSON array
//    - collect_map turns the Vec into an object without reordering it
//
// 2. Why is DetailEntry separate from ProbeOutcome?
//    - The file format is fixed: status, response_time, status_code
//    - ProbeOutcome carries more (error_kind, message) for the table and logs
// -----------------------------------------------------------------------------
