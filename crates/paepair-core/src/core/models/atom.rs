use crate::core::io::columns::{ATOM_COLUMNS, ColumnError};
use nalgebra::Point3;

pub const ATOM_RECORD_TAG: &str = "ATOM";

const BETA_CARBON: &str = "CB";
const ALPHA_CARBON: &str = "CA";
const GLYCINE: &str = "GLY";

/// A single parsed `ATOM` line.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomRecord {
    pub record: String,               // Record tag, always "ATOM" for parsed lines
    pub serial: i64,                  // Atom serial number
    pub name: String,                 // Atom name (e.g., "CA", "CB")
    pub residue_name: String,         // Residue name (e.g., "GLY")
    pub chain_id: char,               // Chain identifier, blank preserved
    pub residue_number: i64,          // Residue sequence number
    pub insertion_code: Option<char>, // Insertion code, `None` when blank
    pub position: Point3<f64>,        // Cartesian coordinates
    pub occupancy: f64,               // Occupancy
    pub confidence: f64,              // Temperature-factor field (per-residue pLDDT for predictions)
}

impl AtomRecord {
    /// Returns `true` if the line carries the `ATOM` tag and should be parsed.
    pub fn is_atom_line(line: &str) -> bool {
        line.starts_with(ATOM_RECORD_TAG)
    }

    /// Parses one `ATOM` line using the column table.
    ///
    /// # Errors
    ///
    /// Returns [`ColumnError`] if the line is narrower than the widest field or a
    /// numeric field does not hold a number.
    pub fn from_line(line: &str) -> Result<Self, ColumnError> {
        let cols = &ATOM_COLUMNS;
        cols.check_width(line)?;

        let insertion_code = cols.insertion_code.character(line)?;
        Ok(Self {
            record: cols.record.text(line)?.to_string(),
            serial: cols.serial.parse(line)?,
            name: cols.atom_name.text(line)?.to_string(),
            residue_name: cols.residue_name.text(line)?.to_string(),
            chain_id: cols.chain_id.character(line)?,
            residue_number: cols.residue_number.parse(line)?,
            insertion_code: (!insertion_code.is_whitespace()).then_some(insertion_code),
            position: Point3::new(
                cols.x.parse(line)?,
                cols.y.parse(line)?,
                cols.z.parse(line)?,
            ),
            occupancy: cols.occupancy.parse(line)?,
            confidence: cols.confidence.parse(line)?,
        })
    }

    /// Whether this atom stands in for its residue: the beta carbon, or the alpha
    /// carbon of glycine, which has no beta carbon.
    pub fn is_representative(&self) -> bool {
        self.name == BETA_CARBON || (self.name == ALPHA_CARBON && self.residue_name == GLYCINE)
    }

    /// Key identifying the residue this atom belongs to within its chain.
    pub fn residue_key(&self) -> (i64, Option<char>) {
        (self.residue_number, self.insertion_code)
    }
}
