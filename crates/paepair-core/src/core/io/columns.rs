//! Declarative column table for the fixed-width `ATOM` record.
//!
//! Every field of an atom line is described once by a [`ColumnSpec`] (name, half-open
//! 0-indexed byte range and value kind). Readers never slice lines with literal offsets;
//! they ask the table for a field and the column performs extraction, trimming and typed
//! parsing with a uniform error.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Char,
    Integer,
    Float,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ColumnKind::Text => "text",
                ColumnKind::Char => "character",
                ColumnKind::Integer => "integer",
                ColumnKind::Float => "float",
            }
        )
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColumnError {
    #[error("Line is too short for field '{field}' (needs {required} chars, found {found})")]
    LineTooShort {
        field: &'static str,
        required: usize,
        found: usize,
    },
    #[error("Invalid {kind} format in columns {columns} for field '{field}' (value: '{value}')")]
    InvalidValue {
        field: &'static str,
        kind: ColumnKind,
        columns: String,
        value: String,
    },
}

/// One field of a fixed-width record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub field: &'static str,
    pub start: usize, // Inclusive, 0-indexed
    pub end: usize,   // Exclusive
    pub kind: ColumnKind,
}

impl ColumnSpec {
    pub const fn new(field: &'static str, start: usize, end: usize, kind: ColumnKind) -> Self {
        Self {
            field,
            start,
            end,
            kind,
        }
    }

    /// Human-readable 1-based inclusive column range, as written in format documentation.
    pub fn columns(&self) -> String {
        if self.end - self.start == 1 {
            format!("{}", self.end)
        } else {
            format!("{}-{}", self.start + 1, self.end)
        }
    }

    /// Returns the untrimmed slice covered by this column.
    pub fn raw<'a>(&self, line: &'a str) -> Result<&'a str, ColumnError> {
        if line.len() < self.end {
            return Err(ColumnError::LineTooShort {
                field: self.field,
                required: self.end,
                found: line.len(),
            });
        }
        line.get(self.start..self.end)
            .ok_or_else(|| self.invalid("<non-ASCII content>"))
    }

    pub fn text<'a>(&self, line: &'a str) -> Result<&'a str, ColumnError> {
        Ok(self.raw(line)?.trim())
    }

    /// Returns the first character of the column exactly as written, blanks included.
    pub fn character(&self, line: &str) -> Result<char, ColumnError> {
        self.raw(line)?
            .chars()
            .next()
            .ok_or_else(|| self.invalid(""))
    }

    /// Parses the trimmed column content into `T`.
    pub fn parse<T: FromStr>(&self, line: &str) -> Result<T, ColumnError> {
        let value = self.text(line)?;
        value.parse().map_err(|_| self.invalid(value))
    }

    fn invalid(&self, value: &str) -> ColumnError {
        ColumnError::InvalidValue {
            field: self.field,
            kind: self.kind,
            columns: self.columns(),
            value: value.to_string(),
        }
    }
}

/// Column layout of an `ATOM` record.
#[derive(Debug, Clone, Copy)]
pub struct AtomColumns {
    pub record: ColumnSpec,
    pub serial: ColumnSpec,
    pub atom_name: ColumnSpec,
    pub residue_name: ColumnSpec,
    pub chain_id: ColumnSpec,
    pub residue_number: ColumnSpec,
    pub insertion_code: ColumnSpec,
    pub x: ColumnSpec,
    pub y: ColumnSpec,
    pub z: ColumnSpec,
    pub occupancy: ColumnSpec,
    pub confidence: ColumnSpec,
}

pub const ATOM_COLUMNS: AtomColumns = AtomColumns {
    record: ColumnSpec::new("record", 0, 6, ColumnKind::Text),
    serial: ColumnSpec::new("serial", 6, 11, ColumnKind::Integer),
    atom_name: ColumnSpec::new("atom_name", 12, 16, ColumnKind::Text),
    residue_name: ColumnSpec::new("residue_name", 17, 20, ColumnKind::Text),
    chain_id: ColumnSpec::new("chain_id", 21, 22, ColumnKind::Char),
    residue_number: ColumnSpec::new("residue_number", 22, 26, ColumnKind::Integer),
    insertion_code: ColumnSpec::new("insertion_code", 26, 27, ColumnKind::Char),
    x: ColumnSpec::new("x", 30, 38, ColumnKind::Float),
    y: ColumnSpec::new("y", 38, 46, ColumnKind::Float),
    z: ColumnSpec::new("z", 46, 54, ColumnKind::Float),
    occupancy: ColumnSpec::new("occupancy", 54, 60, ColumnKind::Float),
    confidence: ColumnSpec::new("confidence", 60, 66, ColumnKind::Float),
};

impl AtomColumns {
    pub fn all(&self) -> [&ColumnSpec; 12] {
        [
            &self.record,
            &self.serial,
            &self.atom_name,
            &self.residue_name,
            &self.chain_id,
            &self.residue_number,
            &self.insertion_code,
            &self.x,
            &self.y,
            &self.z,
            &self.occupancy,
            &self.confidence,
        ]
    }

    /// Minimum line length needed to hold every field.
    pub fn required_width(&self) -> usize {
        self.all().iter().map(|c| c.end).max().unwrap_or(0)
    }

    /// Fails with [`ColumnError::LineTooShort`] unless `line` spans every field.
    pub fn check_width(&self, line: &str) -> Result<(), ColumnError> {
        let required = self.required_width();
        if line.len() < required {
            return Err(ColumnError::LineTooShort {
                field: "record",
                required,
                found: line.len(),
            });
        }
        Ok(())
    }
}
