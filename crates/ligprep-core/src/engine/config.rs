use super::error::ValidationError;
use thiserror::Error;

/// Residue name used when the caller does not supply one ("unknown ligand").
pub const DEFAULT_RESIDUE_NAME: &str = "UNL";
pub const MAX_RESIDUE_NAME_LEN: usize = 3;
pub const DEFAULT_TRIALS: usize = 1000;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertConfig {
    residue_name: String,
}

impl ConvertConfig {
    /// # Errors
    ///
    /// Returns [`ValidationError::ResidueNameTooLong`] for names longer than three characters.
    pub fn new(residue_name: &str) -> Result<Self, ValidationError> {
        if residue_name.chars().count() > MAX_RESIDUE_NAME_LEN {
            return Err(ValidationError::ResidueNameTooLong {
                name: residue_name.to_string(),
                max: MAX_RESIDUE_NAME_LEN,
            });
        }
        Ok(Self {
            residue_name: residue_name.to_string(),
        })
    }

    pub fn residue_name(&self) -> &str {
        &self.residue_name
    }
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            residue_name: DEFAULT_RESIDUE_NAME.to_string(),
        }
    }
}

/// Settings for the volume estimator. Built through [`VolumeConfigBuilder`], which
/// guarantees at least one trial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeConfig {
    trials: usize,
    seed: Option<u64>,
    parallel: bool,
}

impl VolumeConfig {
    /// Number of random directions to sample.
    pub fn trials(&self) -> usize {
        self.trials
    }

    /// Fixed seed for reproducible estimates; `None` seeds from the operating system.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Whether trials are evaluated on the rayon thread pool.
    pub fn parallel(&self) -> bool {
        self.parallel
    }
}

impl Default for VolumeConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            seed: None,
            parallel: false,
        }
    }
}

#[derive(Default)]
pub struct VolumeConfigBuilder {
    trials: Option<usize>,
    seed: Option<u64>,
    parallel: Option<bool>,
}

impl VolumeConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trials(mut self, trials: usize) -> Self {
        self.trials = Some(trials);
        self
    }
    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = Some(parallel);
        self
    }

    pub fn build(self) -> Result<VolumeConfig, ConfigError> {
        let trials = self.trials.unwrap_or(DEFAULT_TRIALS);
        if trials == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "trials",
                reason: "at least one trial is required".to_string(),
            });
        }
        Ok(VolumeConfig {
            trials,
            seed: self.seed,
            parallel: self.parallel.unwrap_or(false),
        })
    }
}
