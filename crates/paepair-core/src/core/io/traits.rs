use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Defines the interface for reading one of the per-prediction input files.
///
/// Implementors handle the format-specific parsing; opening and buffering a file
/// on disk is shared through [`InputFile::read_from_path`].
pub trait InputFile {
    /// The in-memory representation produced by the reader.
    type Output;

    /// The error type for read operations.
    type Error: Error + From<io::Error>;

    /// Reads the file contents from a buffered reader.
    ///
    /// # Arguments
    ///
    /// * `reader` - The buffered reader to read from.
    ///
    /// # Return
    ///
    /// Returns the parsed representation of the file.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or the reader encounters an I/O failure.
    fn read_from(reader: &mut impl BufRead) -> Result<Self::Output, Self::Error>;

    /// Reads the file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self::Output, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }
}
