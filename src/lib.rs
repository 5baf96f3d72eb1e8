// src/lib.rs
// =============================================================================
// The probing core as a library.
//
// Data flow:
//   TargetList -> run::run (bounded fan-out) -> Prober per target
//              -> ProbeRun -> report::aggregate -> RunReport
//
// The core never reads or writes files and never schedules itself. Callers
// (the site-prober CLI, a dashboard, a scheduler) own those concerns and
// invoke one run per monitoring cycle.
// =============================================================================

pub mod config;
pub mod error;
pub mod probe;
pub mod report;
pub mod run;
pub mod targets;

#[cfg(test)]
mod test_support;

pub use error::{Error, Result};
