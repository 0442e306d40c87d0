//! Provides input/output functionality for molecular file formats.
//!
//! Two formats are supported: the V2000 connection table used by MDL molfiles and SDF
//! files (read only), and PDB (written with explicit `CONECT` connectivity, read back for
//! volume estimation). Readers share the [`traits::StructureFile`] interface.

pub mod ctfile;
pub mod pdb;
pub mod traits;

use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureFormat {
    CtFile,
    Pdb,
}

impl StructureFormat {
    /// Infers the format from the file extension. Anything that is not a molfile or SDF
    /// extension is treated as PDB.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);
        match ext.as_deref() {
            Some("sdf" | "sd" | "mol") => Self::CtFile,
            _ => Self::Pdb,
        }
    }
}

impl fmt::Display for StructureFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CtFile => write!(f, "MDL connection table"),
            Self::Pdb => write!(f, "PDB"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_path_recognises_connection_table_extensions() {
        assert_eq!(StructureFormat::from_path(Path::new("lig.sdf")), StructureFormat::CtFile);
        assert_eq!(StructureFormat::from_path(Path::new("lig.MOL")), StructureFormat::CtFile);
        assert_eq!(StructureFormat::from_path(Path::new("a/b.sd")), StructureFormat::CtFile);
    }

    #[test]
    fn from_path_defaults_to_pdb() {
        assert_eq!(StructureFormat::from_path(Path::new("lig.pdb")), StructureFormat::Pdb);
        assert_eq!(StructureFormat::from_path(Path::new("lig.ent")), StructureFormat::Pdb);
        assert_eq!(StructureFormat::from_path(Path::new("noext")), StructureFormat::Pdb);
    }
}
