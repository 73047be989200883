//! Data structures describing one prediction as the pipeline sees it.
//!
//! - [`atom`] - A single parsed `ATOM` line
//! - [`chain`] - Representative-atom series per chain, in file order
//! - [`matrix`] - The square predicted-aligned-error matrix
//! - [`pair`] - Chain-pair distributions, statistics and output records

pub mod atom;
pub mod chain;
pub mod matrix;
pub mod pair;
