//! # PAE-Pairwise Core Library
//!
//! Scores how confidently a structure predictor placed every pair of chains of a
//! multi-chain prediction relative to each other, using the predicted aligned error
//! (PAE) matrix emitted alongside each predicted model.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer layout so that parsing, numerics and orchestration
//! can be tested in isolation.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`ChainSeries`, `ErrorMatrix`,
//!   `PairRecord`) and readers for the fixed-column structure format and the JSON scores file.
//!
//! - **[`engine`]: The Numeric Pipeline.** Chain boundary extraction, partitioning of the
//!   error matrix into per-chain-pair distributions, distribution statistics and the
//!   interaction call, plus the configuration, error and progress types they share.
//!
//! - **[`workflows`]: The Public API.** Runs the pipeline for one prediction
//!   ([`workflows::analyze`]) or for a whole batch ([`workflows::batch`]) and collects
//!   rows, per-prediction failures and dataset anomalies.

pub mod core;
pub mod engine;
pub mod workflows;
