mod builder;
mod defaults;
mod file;
mod models;

pub use builder::{build_convert_config, build_volume_config};
