use super::error::AnalysisError;
use crate::core::models::chain::ChainSet;
use std::ops::Range;

/// Per-chain residue counts in structure-file order.
///
/// Chain `i` owns the contiguous index range `offset(i)..offset(i) + lengths[i]` of the
/// prediction's error matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainBoundaries {
    lengths: Vec<usize>,
}

impl ChainBoundaries {
    /// Derives the boundaries from parsed chains.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::EmptyStructure`] if no chain was found.
    pub fn from_chains(chains: &ChainSet) -> Result<Self, AnalysisError> {
        if chains.is_empty() {
            return Err(AnalysisError::EmptyStructure);
        }
        Ok(Self {
            lengths: chains.chains().iter().map(|c| c.len()).collect(),
        })
    }

    pub fn from_lengths(lengths: Vec<usize>) -> Self {
        Self { lengths }
    }

    pub fn lengths(&self) -> &[usize] {
        &self.lengths
    }

    /// Number of chains.
    pub fn len(&self) -> usize {
        self.lengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lengths.is_empty()
    }

    /// Total residue count over all chains.
    pub fn total(&self) -> usize {
        self.lengths.iter().sum()
    }

    /// Index ranges owned by each chain.
    pub fn ranges(&self) -> Vec<Range<usize>> {
        let mut start = 0;
        self.lengths
            .iter()
            .map(|&len| {
                let range = start..start + len;
                start += len;
                range
            })
            .collect()
    }

    /// Checks that the chains exactly cover a matrix of the given dimension.
    pub fn validate_against(&self, dimension: usize) -> Result<(), AnalysisError> {
        let chain_total = self.total();
        if chain_total != dimension {
            return Err(AnalysisError::BoundaryMismatch {
                chain_total,
                matrix_dimension: dimension,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::pdb::PdbFile;
    use crate::core::io::traits::InputFile;

    #[test]
    fn from_chains_counts_representatives_in_file_order() {
        let pdb = "\
ATOM      1  CB  ALA B   1       0.000   0.000   0.000  1.00 90.00           C
ATOM      2  CA  GLY B   2       0.000   0.000   0.000  1.00 90.00           C
ATOM      3  CB  ALA B   3       0.000   0.000   0.000  1.00 90.00           C
ATOM      4  CB  LEU A   1       0.000   0.000   0.000  1.00 90.00           C
";
        let chains = PdbFile::read_from(&mut pdb.as_bytes()).unwrap();
        let boundaries = ChainBoundaries::from_chains(&chains).unwrap();
        assert_eq!(boundaries.lengths(), &[3, 1]);
        assert_eq!(boundaries.total(), chains.residue_count());
    }

    #[test]
    fn empty_structure_is_rejected() {
        let err = ChainBoundaries::from_chains(&ChainSet::new()).unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyStructure));
    }

    #[test]
    fn ranges_are_contiguous_and_cover_every_index_once() {
        let boundaries = ChainBoundaries::from_lengths(vec![2, 0, 3, 4]);
        let ranges = boundaries.ranges();
        assert_eq!(ranges, vec![0..2, 2..2, 2..5, 5..9]);
        for residue in 0..boundaries.total() {
            let owners = ranges.iter().filter(|r| r.contains(&residue)).count();
            assert_eq!(owners, 1, "residue {residue}");
        }
    }

    #[test]
    fn validate_against_reports_both_sizes() {
        let boundaries = ChainBoundaries::from_lengths(vec![2, 3]);
        assert!(boundaries.validate_against(5).is_ok());
        assert!(matches!(
            boundaries.validate_against(6),
            Err(AnalysisError::BoundaryMismatch {
                chain_total: 5,
                matrix_dimension: 6
            })
        ));
    }
}
