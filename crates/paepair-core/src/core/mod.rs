//! # Core Module
//!
//! Data models and file readers shared by the numeric pipeline.
//!
//! - **Models** ([`models`]) - Atom records, per-chain series, the error matrix and pair records
//! - **File I/O** ([`io`]) - The column table, the structure (PDB) reader and the scores (JSON) reader

pub mod io;
pub mod models;
