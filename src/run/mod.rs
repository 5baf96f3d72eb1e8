// src/run/mod.rs
// =============================================================================
// This module coordinates a probe run across all targets.
//
// Features:
// - Bounded number of probes in flight (resource protection, not correctness)
// - Every target probed exactly once, whatever happens to the others
// - Results attributed by input position, never by completion order
// - Cooperative cancellation with an explicit "incomplete run" result
// =============================================================================

mod coordinator;

pub use coordinator::{run, ProbeRun};
