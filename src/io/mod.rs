//! Boundary input/output: command line, PNG texture sets, errors and progress

/// Command-line parsing and batch processing
pub mod cli;
/// Engine constants and defaults
pub mod configuration;
/// Error type and context helpers
pub mod error;
/// PNG decode/encode of texture sets
pub mod image;
/// Terminal progress display
pub mod progress;
