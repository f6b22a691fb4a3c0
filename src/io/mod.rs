//! File output for generated profiles.

/// CSV export of load profiles.
pub mod export;
