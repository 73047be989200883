use std::ops::Range;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MatrixError {
    #[error("Row {row} has {found} values, expected {expected} for a square matrix")]
    NotSquare {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Value at ({row}, {col}) is not a finite non-negative number: {value}")]
    InvalidValue { row: usize, col: usize, value: f64 },
}

/// Square predicted-aligned-error matrix, stored row-major.
///
/// Entry `(i, j)` is the expected positional error of residue `j` when the prediction is
/// aligned on residue `i`. The matrix is not assumed to be symmetric.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorMatrix {
    dimension: usize,
    values: Vec<f64>,
}

impl ErrorMatrix {
    /// Builds a matrix from nested rows, validating shape and values.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, MatrixError> {
        let dimension = rows.len();
        let mut values = Vec::with_capacity(dimension * dimension);
        for (row, entries) in rows.into_iter().enumerate() {
            if entries.len() != dimension {
                return Err(MatrixError::NotSquare {
                    row,
                    expected: dimension,
                    found: entries.len(),
                });
            }
            for (col, value) in entries.into_iter().enumerate() {
                if !value.is_finite() || value < 0.0 {
                    return Err(MatrixError::InvalidValue { row, col, value });
                }
                values.push(value);
            }
        }
        Ok(Self { dimension, values })
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.dimension && col < self.dimension {
            Some(self.values[row * self.dimension + col])
        } else {
            None
        }
    }

    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.dimension;
        &self.values[start..start + self.dimension]
    }

    /// Appends the rectangular block `rows × cols` to `out`, row by row.
    ///
    /// Ranges must lie within the matrix dimension.
    pub fn extend_with_block(&self, rows: Range<usize>, cols: Range<usize>, out: &mut Vec<f64>) {
        out.reserve(rows.len() * cols.len());
        for row in rows {
            out.extend_from_slice(&self.row(row)[cols.clone()]);
        }
    }
}
