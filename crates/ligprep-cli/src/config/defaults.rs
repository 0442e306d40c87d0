use ligprep::engine::config::{DEFAULT_RESIDUE_NAME, DEFAULT_TRIALS};

pub struct DefaultsConfig {
    pub residue_name: String,
    pub trials: usize,
    pub parallel: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            residue_name: DEFAULT_RESIDUE_NAME.to_string(),
            trials: DEFAULT_TRIALS,
            parallel: false,
        }
    }
}
