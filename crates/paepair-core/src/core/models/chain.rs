use super::atom::AtomRecord;
use nalgebra::Point3;
use std::collections::HashMap;

/// Representative-atom series of one chain.
///
/// Holds one coordinate and one confidence value per residue, aligned by index
/// and ordered as the residues appear in the structure file.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainSeries {
    pub id: char,                              // Chain identifier (e.g., 'A', 'B')
    coordinates: Vec<Point3<f64>>,             // Representative-atom positions
    confidences: Vec<f64>,                     // Per-residue confidence, aligned with `coordinates`
    last_residue: Option<(i64, Option<char>)>, // Residue key of the last accepted atom
}

impl ChainSeries {
    pub(crate) fn new(id: char) -> Self {
        Self {
            id,
            coordinates: Vec::new(),
            confidences: Vec::new(),
            last_residue: None,
        }
    }

    /// Appends the atom if it represents a residue not yet recorded for this chain.
    ///
    /// Returns `true` when the atom was accepted.
    pub(crate) fn push_representative(&mut self, atom: &AtomRecord) -> bool {
        if !atom.is_representative() {
            return false;
        }
        let key = atom.residue_key();
        if self.last_residue == Some(key) {
            return false;
        }
        self.last_residue = Some(key);
        self.coordinates.push(atom.position);
        self.confidences.push(atom.confidence);
        true
    }

    pub fn coordinates(&self) -> &[Point3<f64>] {
        &self.coordinates
    }

    pub fn confidences(&self) -> &[f64] {
        &self.confidences
    }

    /// Number of residues, i.e. representative atoms.
    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    pub fn mean_confidence(&self) -> Option<f64> {
        if self.confidences.is_empty() {
            None
        } else {
            Some(self.confidences.iter().sum::<f64>() / self.confidences.len() as f64)
        }
    }
}

/// All chains of a structure, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChainSet {
    chains: Vec<ChainSeries>,
    index: HashMap<char, usize>,
}

impl ChainSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the atom if it represents a new residue of its chain.
    ///
    /// A chain is registered by its first representative atom, so chains made only of
    /// non-representative atoms never appear.
    pub fn add_atom(&mut self, atom: &AtomRecord) -> bool {
        if !atom.is_representative() {
            return false;
        }
        let slot = match self.index.get(&atom.chain_id) {
            Some(&slot) => slot,
            None => {
                self.chains.push(ChainSeries::new(atom.chain_id));
                let slot = self.chains.len() - 1;
                self.index.insert(atom.chain_id, slot);
                slot
            }
        };
        self.chains[slot].push_representative(atom)
    }

    pub fn chains(&self) -> &[ChainSeries] {
        &self.chains
    }

    pub fn chain(&self, id: char) -> Option<&ChainSeries> {
        self.index.get(&id).map(|&slot| &self.chains[slot])
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    pub fn residue_count(&self) -> usize {
        self.chains.iter().map(ChainSeries::len).sum()
    }
}
