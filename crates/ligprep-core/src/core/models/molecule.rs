use super::topology::Bond;
use nalgebra::Point3;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("{coordinates} coordinate triples but {symbols} element symbols")]
    LengthMismatch { coordinates: usize, symbols: usize },
    #[error("atom {atom} has an empty element symbol")]
    EmptyElementSymbol { atom: usize },
    #[error("bond {bond} references atom {atom}, outside the declared range 1..={atom_count}")]
    BondIndexOutOfRange {
        bond: usize,
        atom: usize,
        atom_count: usize,
    },
}

/// A single molecule as described by a connection table.
///
/// Coordinates are in Angstroms and index-aligned with the element symbols. Bonds address
/// atoms by 1-based serial number. The constructor is the only way to obtain a record, so
/// every instance satisfies these invariants.
#[derive(Debug, Clone, PartialEq)]
pub struct MoleculeRecord {
    title: String,
    coordinates: Vec<Point3<f64>>,
    element_symbols: Vec<String>,
    bonds: Vec<Bond>,
}

impl MoleculeRecord {
    /// Validates and assembles a molecule record.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError`] if the coordinate and symbol lists differ in length, if a symbol
    /// is blank, or if any bond references an atom outside `1..=atom_count`.
    pub fn new(
        title: impl Into<String>,
        coordinates: Vec<Point3<f64>>,
        element_symbols: Vec<String>,
        bonds: Vec<Bond>,
    ) -> Result<Self, RecordError> {
        if coordinates.len() != element_symbols.len() {
            return Err(RecordError::LengthMismatch {
                coordinates: coordinates.len(),
                symbols: element_symbols.len(),
            });
        }
        if let Some(i) = element_symbols.iter().position(|s| s.trim().is_empty()) {
            return Err(RecordError::EmptyElementSymbol { atom: i + 1 });
        }

        let atom_count = coordinates.len();
        for (i, bond) in bonds.iter().enumerate() {
            for atom in [bond.atom1, bond.atom2] {
                if atom == 0 || atom > atom_count {
                    return Err(RecordError::BondIndexOutOfRange {
                        bond: i + 1,
                        atom,
                        atom_count,
                    });
                }
            }
        }

        Ok(Self {
            title: title.into(),
            coordinates,
            element_symbols,
            bonds,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn atom_count(&self) -> usize {
        self.coordinates.len()
    }

    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    pub fn coordinates(&self) -> &[Point3<f64>] {
        &self.coordinates
    }

    pub fn element_symbols(&self) -> &[String] {
        &self.element_symbols
    }

    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    /// Iterates `(serial, symbol, position)` with 1-based serial numbers.
    pub fn atoms(&self) -> impl Iterator<Item = (usize, &str, &Point3<f64>)> {
        self.element_symbols
            .iter()
            .zip(&self.coordinates)
            .enumerate()
            .map(|(i, (symbol, position))| (i + 1, symbol.as_str(), position))
    }
}
