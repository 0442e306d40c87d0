use crate::core::io::ctfile::CtFile;
use crate::core::io::pdb::{PdbAtom, PdbFile, PdbStructure};
use crate::core::io::traits::StructureFile;
use crate::core::models::molecule::MoleculeRecord;
use crate::core::models::naming::assign_atom_names;
use crate::core::models::topology::NeighborMap;
use crate::engine::config::ConvertConfig;
use crate::engine::error::{ConvertError, ValidationError};
use std::path::Path;
use tracing::{info, instrument};

const MAX_ATOM_NAME_LEN: usize = 4;
const MAX_ELEMENT_LEN: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionSummary {
    pub atoms: usize,
    pub bonds: usize,
    pub conect_records: usize,
}

/// Builds the single-residue PDB content for a molecule.
///
/// Atoms keep their input order and serial numbers, are named per element (`C1`, `C2`,
/// `O1`, ...) and all belong to one residue called `residue_name`.
///
/// # Errors
///
/// Returns [`ValidationError`] if the molecule is empty or a generated name or element
/// symbol would not fit its PDB column.
pub fn build_structure(
    record: &MoleculeRecord,
    residue_name: &str,
) -> Result<PdbStructure, ValidationError> {
    if record.is_empty() {
        return Err(ValidationError::EmptyMolecule);
    }

    let names = assign_atom_names(record.element_symbols());
    let mut atoms = Vec::with_capacity(record.atom_count());
    for ((serial, symbol, position), name) in record.atoms().zip(names) {
        if name.chars().count() > MAX_ATOM_NAME_LEN {
            return Err(ValidationError::AtomNameTooLong {
                name,
                max: MAX_ATOM_NAME_LEN,
            });
        }
        if symbol.chars().count() > MAX_ELEMENT_LEN {
            return Err(ValidationError::ElementSymbolTooLong {
                atom: serial,
                symbol: symbol.to_string(),
                max: MAX_ELEMENT_LEN,
            });
        }
        atoms.push(PdbAtom {
            serial,
            name,
            residue_name: residue_name.to_string(),
            element: symbol.to_string(),
            position: *position,
        });
    }

    Ok(PdbStructure {
        atoms,
        connectivity: NeighborMap::from_bonds(record.bonds()),
    })
}

/// Converts a connection-table file into a PDB file with explicit connectivity.
///
/// The output file is replaced atomically; on any error it is left as it was.
///
/// # Errors
///
/// * [`ConvertError::Format`] if the input does not follow the connection-table layout.
/// * [`ConvertError::Validation`] if the molecule is empty or does not fit the PDB columns.
/// * [`ConvertError::Output`] if the output file cannot be written.
#[instrument(skip_all, name = "convert_workflow", fields(input = %input.display(), output = %output.display()))]
pub fn run(
    input: &Path,
    output: &Path,
    config: &ConvertConfig,
) -> Result<ConversionSummary, ConvertError> {
    info!("Reading connection table.");
    let record = CtFile::read_from_path(input)?;
    info!(
        title = record.title(),
        atoms = record.atom_count(),
        bonds = record.bond_count(),
        "Connection table parsed."
    );

    let structure = build_structure(&record, config.residue_name())?;
    PdbFile::write_to_path(&structure, output)?;

    let summary = ConversionSummary {
        atoms: structure.atoms.len(),
        bonds: record.bond_count(),
        conect_records: structure.connectivity.len(),
    };
    info!(
        atoms = summary.atoms,
        conect_records = summary.conect_records,
        "PDB file written."
    );
    Ok(summary)
}

/// Converts `input_path` to a PDB file at `output_path` using `residue_name` for every atom.
///
/// The residue name is validated before any file is opened.
pub fn convert<P: AsRef<Path>, Q: AsRef<Path>>(
    input_path: P,
    output_path: Q,
    residue_name: &str,
) -> Result<(), ConvertError> {
    let config = ConvertConfig::new(residue_name)?;
    run(input_path.as_ref(), output_path.as_ref(), &config).map(|_| ())
}
