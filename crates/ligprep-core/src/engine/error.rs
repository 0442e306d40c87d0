use thiserror::Error;

use crate::core::io::ctfile::CtFileError;
use crate::core::io::pdb::PdbError;

/// A caller-supplied value violates a constraint of the output format.
///
/// Always raised before any output is written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Residue name '{name}' is too long (maximum {max} characters)")]
    ResidueNameTooLong { name: String, max: usize },

    #[error("Generated atom name '{name}' does not fit the {max}-column PDB atom name field")]
    AtomNameTooLong { name: String, max: usize },

    #[error("Element symbol '{symbol}' of atom {atom} does not fit the {max}-column PDB element field")]
    ElementSymbolTooLong {
        atom: usize,
        symbol: String,
        max: usize,
    },

    #[error("Molecule contains no atoms")]
    EmptyMolecule,
}

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Malformed connection table: {0}")]
    Format(#[from] CtFileError),

    #[error("Failed to write PDB output: {0}")]
    Output(#[from] PdbError),
}

/// The structure could not be turned into atom spheres for volume estimation.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read PDB structure: {0}")]
    Pdb(#[from] PdbError),

    #[error("Failed to read connection table: {0}")]
    CtFile(#[from] CtFileError),

    #[error("Structure contains no atoms")]
    EmptyStructure,

    #[error("{positions} atom positions but {radii} radii")]
    LengthMismatch { positions: usize, radii: usize },

    #[error("No van der Waals radius known for element '{element}' (atom {serial})")]
    UnknownRadius { serial: usize, element: String },
}
