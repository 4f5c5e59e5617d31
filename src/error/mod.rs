//! Violation types for conformance failures.
//!
//! This module provides types for representing payload violations with their
//! paths, human-readable messages, and machine-readable codes.

mod violation;

pub use violation::{Violation, Violations};
