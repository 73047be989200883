use crate::core::io::columns::ColumnError;
use crate::core::io::traits::InputFile;
use crate::core::models::atom::AtomRecord;
use crate::core::models::chain::ChainSet;
use std::io::{self, BufRead};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Format error on line {line}: {kind}")]
    Format { line: usize, kind: ColumnError },
}

/// Reader for predicted structures in the fixed-column PDB layout.
///
/// Only `ATOM` lines are parsed; every other record is skipped. Each parsed atom is
/// offered to a [`ChainSet`], which keeps one representative atom per residue.
pub struct PdbFile;

impl PdbFile {
    /// Parses a single line, returning `None` for records that are not `ATOM` lines.
    pub fn parse_line(line: &str) -> Result<Option<AtomRecord>, ColumnError> {
        if !AtomRecord::is_atom_line(line) {
            return Ok(None);
        }
        AtomRecord::from_line(line).map(Some)
    }
}

impl InputFile for PdbFile {
    type Output = ChainSet;
    type Error = PdbError;

    fn read_from(reader: &mut impl BufRead) -> Result<Self::Output, Self::Error> {
        let mut chains = ChainSet::new();
        let mut atom_lines = 0usize;

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let atom = Self::parse_line(&line).map_err(|kind| PdbError::Format {
                line: line_num + 1,
                kind,
            })?;
            if let Some(atom) = atom {
                atom_lines += 1;
                chains.add_atom(&atom);
            }
        }

        debug!(
            atom_lines,
            chains = chains.len(),
            residues = chains.residue_count(),
            "Parsed structure."
        );
        Ok(chains)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const TWO_CHAINS: &str = "\
REMARK   1 PREDICTED MODEL
ATOM      1  N   MET A   1      -1.000   2.000   3.000  1.00 80.10           N
ATOM      2  CA  MET A   1      -1.500   2.500   3.500  1.00 80.10           C
ATOM      3  CB  MET A   1      -2.000   3.000   4.000  1.00 80.10           C
ATOM      4  N   GLY A   2       0.000   1.000   2.000  1.00 75.20           N
ATOM      5  CA  GLY A   2       0.500   1.500   2.500  1.00 75.20           C
TER       6      GLY A   2
ATOM      7  CA  ALA B   1       5.000   5.000   5.000  1.00 60.00           C
ATOM      8  CB  ALA B   1       5.500   5.500   5.500  1.00 60.00           C
HETATM    9  O   HOH B   2       9.000   9.000   9.000  1.00  0.00           O
END
";

    #[test]
    fn read_from_collects_representatives_per_chain() {
        let chains = PdbFile::read_from(&mut TWO_CHAINS.as_bytes()).unwrap();
        assert_eq!(chains.len(), 2);
        let a = chains.chain('A').unwrap();
        let b = chains.chain('B').unwrap();
        assert_eq!(a.len(), 2);
        assert_eq!(a.confidences(), &[80.10, 75.20]);
        assert_eq!(a.coordinates()[0].x, -2.0);
        assert_eq!(a.coordinates()[1].x, 0.5);
        assert_eq!(b.len(), 1);
        assert_eq!(b.confidences(), &[60.0]);
    }

    #[test]
    fn non_atom_records_are_skipped() {
        assert!(PdbFile::parse_line("TER       6      GLY A   2").unwrap().is_none());
        assert!(PdbFile::parse_line("END").unwrap().is_none());
        assert!(PdbFile::parse_line("").unwrap().is_none());
    }

    #[test]
    fn short_atom_line_reports_line_number() {
        let text = "REMARK\nATOM      1  CB  ALA A   1       1.000   2.000\n";
        let err = PdbFile::read_from(&mut text.as_bytes()).unwrap_err();
        match err {
            PdbError::Format { line, kind } => {
                assert_eq!(line, 2);
                assert!(matches!(kind, ColumnError::LineTooShort { .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_numeric_coordinate_is_a_format_error() {
        let text = "ATOM      1  CB  ALA A   1       1.000   abcde   3.000  1.00 50.00           C\n";
        let err = PdbFile::read_from(&mut text.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            PdbError::Format {
                line: 1,
                kind: ColumnError::InvalidValue { field: "y", .. }
            }
        ));
    }

    #[test]
    fn file_without_atoms_yields_no_chains() {
        let chains = PdbFile::read_from(&mut "REMARK only\nEND\n".as_bytes()).unwrap();
        assert!(chains.is_empty());
    }

    #[test]
    fn read_from_path_reads_file_on_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.pdb");
        fs::write(&path, TWO_CHAINS).unwrap();
        let chains = PdbFile::read_from_path(&path).unwrap();
        assert_eq!(chains.residue_count(), 3);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempdir().unwrap();
        let err = PdbFile::read_from_path(dir.path().join("absent.pdb")).unwrap_err();
        assert!(matches!(err, PdbError::Io(_)));
    }
}
