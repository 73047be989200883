//! # Engine Module
//!
//! The numeric pipeline that turns one prediction's chains and error matrix into
//! classified chain-pair rows.
//!
//! ## Pipeline
//!
//! 1. [`boundaries`] - per-chain residue counts derived from the parsed structure
//! 2. [`blocks`] - partition of the error matrix into pooled per-pair distributions
//! 3. [`stats`] - minimum, median, mean, standard deviation, `signal` and `spread`
//! 4. [`classify`] - pair kind and the thresholded interaction call, with chain names from [`labels`]
//!
//! Shared types live in [`config`] (thresholds and labeling mode), [`error`] and
//! [`progress`].

pub mod blocks;
pub mod boundaries;
pub mod classify;
pub mod config;
pub mod error;
pub mod labels;
pub mod progress;
pub mod stats;
