//! # Workflows Module
//!
//! Top-level entry points of the library.
//!
//! - **Single prediction** ([`analyze`]) - reads one scores file and its structure file and
//!   returns the classified chain-pair rows.
//! - **Batch** ([`batch`]) - runs many predictions independently, in parallel when the
//!   `parallel` feature is enabled, and collects rows, per-prediction failures, skipped
//!   pairs and the dataset anomalies reported by file matching.

pub mod analyze;
pub mod batch;
