//! # LigPrep Core Library
//!
//! Utilities for preparing a non-standard residue (a ligand) for molecular-dynamics setup
//! pipelines.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture so each concern can be tested on its own.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`MoleculeRecord`, `NeighborMap`),
//!   structure file readers and writers, and element data such as van der Waals radii.
//!
//! - **[`engine`]: The Logic Core.** Configuration, error types, progress reporting and the
//!   isotropic direction sampling used by the volume estimator.
//!
//! - **[`workflows`]: The Public API.** Complete procedures: translating a connection-table
//!   file into a PDB file with explicit connectivity, and estimating an upper bound for the
//!   molecular volume.

pub mod core;
pub mod engine;
pub mod workflows;
