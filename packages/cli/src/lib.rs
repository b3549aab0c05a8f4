//! Taskdeck CLI library
//!
//! Command handlers and terminal rendering for the `taskdeck` binary. The
//! tag listing dispatcher lives here so it can be tested headlessly.

pub mod tags;
pub mod ui;
