use ligprep::engine::config::{ConvertConfig, VolumeConfig};
use std::path::PathBuf;

pub struct ConvertAppConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub core_config: ConvertConfig,
}

pub struct VolumeAppConfig {
    pub input_path: PathBuf,
    pub core_config: VolumeConfig,
}
