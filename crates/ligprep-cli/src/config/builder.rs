use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::{ConvertAppConfig, VolumeAppConfig};
use crate::cli::{ConvertArgs, VolumeArgs};
use crate::error::{CliError, Result};
use ligprep::engine::config::{ConvertConfig, VolumeConfigBuilder};
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

fn load_file_config(path: Option<&Path>) -> Result<FileConfig> {
    match path {
        Some(path) => FileConfig::from_file(path),
        None => Ok(FileConfig::default()),
    }
}

/// Resolves the `convert` settings: defaults, then the config file, then `-S` overrides,
/// then dedicated flags.
pub fn build_convert_config(args: &ConvertArgs) -> Result<ConvertAppConfig> {
    let defaults = DefaultsConfig::default();
    let file_config = load_file_config(args.config.as_deref())?;
    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let convert_file = file_config.convert.take().unwrap_or_default();
    let residue_name = args
        .residue_name
        .clone()
        .or(convert_file.residue_name)
        .unwrap_or(defaults.residue_name);
    debug!(%residue_name, "Resolved convert configuration.");

    let core_config =
        ConvertConfig::new(&residue_name).map_err(|e| CliError::Argument(e.to_string()))?;

    Ok(ConvertAppConfig {
        input_path: args.input.clone(),
        output_path: args.output.clone(),
        core_config,
    })
}

/// Resolves the `volume` settings in the same order as [`build_convert_config`].
pub fn build_volume_config(args: &VolumeArgs) -> Result<VolumeAppConfig> {
    let defaults = DefaultsConfig::default();
    let file_config = load_file_config(args.config.as_deref())?;
    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let volume_file = file_config.volume.take().unwrap_or_default();
    let trials = args
        .trials
        .or(volume_file.trials)
        .unwrap_or(defaults.trials);
    let seed = args.seed.or(volume_file.seed);
    let parallel = args.parallel || volume_file.parallel.unwrap_or(defaults.parallel);
    debug!(trials, ?seed, parallel, "Resolved volume configuration.");

    let core_config = VolumeConfigBuilder::new()
        .trials(trials)
        .seed(seed)
        .parallel(parallel)
        .build()?;

    Ok(VolumeAppConfig {
        input_path: args.input.clone(),
        core_config,
    })
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value)))
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };

        match key {
            "convert.residue-name" => {
                config
                    .convert
                    .get_or_insert_with(Default::default)
                    .residue_name = Some(value_str.to_string());
            }
            "volume.trials" => {
                config.volume.get_or_insert_with(Default::default).trials =
                    Some(parse_value(key, value_str, "integer")?);
            }
            "volume.seed" => {
                config.volume.get_or_insert_with(Default::default).seed =
                    Some(parse_value(key, value_str, "integer")?);
            }
            "volume.parallel" => {
                config.volume.get_or_insert_with(Default::default).parallel =
                    Some(parse_value(key, value_str, "boolean")?);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}
