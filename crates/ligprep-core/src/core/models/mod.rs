//! # Core Models Module
//!
//! Data structures describing a single ligand as read from a connection-table file.
//!
//! - [`molecule`] - The validated [`MoleculeRecord`](molecule::MoleculeRecord) and its bonds
//! - [`topology`] - Bonds and the [`NeighborMap`](topology::NeighborMap) used for
//!   connectivity records
//! - [`naming`] - Per-conversion atom naming (`C1`, `C2`, `O1`, ...)
//!
//! ```ignore
//! use ligprep::core::models::molecule::MoleculeRecord;
//! use ligprep::core::models::topology::NeighborMap;
//!
//! let neighbors = NeighborMap::from_bonds(record.bonds());
//! let names = naming::assign_atom_names(record.element_symbols());
//! ```

pub mod molecule;
pub mod naming;
pub mod topology;
