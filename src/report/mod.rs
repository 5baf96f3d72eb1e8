// src/report/mod.rs
// =============================================================================
// This module turns a list of probe outcomes into a RunReport.
//
// Submodules:
// - aggregate: summary counts, ordered details, JSON shape of the report
// =============================================================================

mod aggregate;

pub use aggregate::{aggregate, RunReport, Summary};
