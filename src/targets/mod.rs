// src/targets/mod.rs
// =============================================================================
// This module owns the Target List: the ordered, duplicate-free set of sites
// a run will probe.
//
// Submodules:
// - list: Target / TargetList types and their validation rules
// - file: Loading a target list from a JSON file (websites.json format)
//
// The probing core only ever sees a validated TargetList value. Reading files
// happens here, at the edge, never inside the coordinator or the prober.
// =============================================================================

mod file;
mod list;

pub use file::{assume_https, load_targets_file, DEFAULT_TARGETS_FILE};
pub use list::{Target, TargetList};
