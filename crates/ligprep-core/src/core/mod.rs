//! # Core Module
//!
//! Fundamental building blocks shared by the conversion and volume workflows.
//!
//! - **Molecular Representation** ([`models`]) - The validated connection-table record, bond
//!   orders, neighbor maps and atom naming
//! - **File I/O** ([`io`]) - Connection-table (molfile/SDF) reading and PDB reading/writing
//! - **Utilities** ([`utils`]) - Element radii and projection geometry

pub mod io;
pub mod models;
pub mod utils;
