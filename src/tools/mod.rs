//! Helpers for the lzkn64 verification harness.
//!
//! The tools are:
//! - cli: Command line interface and log level selection.
//! - walk: Recursive file listing in the order the filesystem returns entries.
//!
pub mod cli;
pub mod walk;
