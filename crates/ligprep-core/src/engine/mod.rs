//! # Engine Module
//!
//! Configuration, errors, progress reporting and random sampling shared by the workflows.
//!
//! - **Configuration** ([`config`]) - Residue naming for conversion and trial settings for
//!   volume estimation
//! - **Error Handling** ([`error`]) - Validation, conversion and load errors
//! - **Progress Monitoring** ([`progress`]) - Optional callbacks for long-running sampling
//! - **Sampling** ([`sampling`]) - Seedable isotropic direction sampling

pub mod config;
pub mod error;
pub mod progress;
pub mod sampling;
