//! # Workflows Module
//!
//! Top-level entry points that tie the `core` readers and writers to the `engine`.
//!
//! - **Conversion** ([`convert`]) - Connection table to PDB with generated atom names and
//!   `CONECT` records reflecting bond multiplicity.
//! - **Volume Estimation** ([`volume`]) - Upper-bound molecular volume from isotropic
//!   projection sampling over van der Waals spheres.
//!
//! The two workflows share no state; they compose only through the files they read and
//! write.

pub mod convert;
pub mod volume;
