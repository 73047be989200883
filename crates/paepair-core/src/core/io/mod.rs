//! Provides input functionality for the two files that describe one prediction.
//!
//! A prediction is made of a fixed-column structure file, read by [`pdb::PdbFile`] through
//! the declarative table in [`columns`], and a JSON scores file carrying the error matrix and
//! the global confidence scores, read by [`scores::ScoresFile`]. Both implement the
//! [`traits::InputFile`] interface.

pub mod columns;
pub mod pdb;
pub mod scores;
pub mod traits;
