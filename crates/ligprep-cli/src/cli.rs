use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Tony Kan, Ted Yu, William A. Goddard III, Victor Wai Tak Kam",
    version,
    about = "ligprep - Prepare small-molecule ligands: convert connection tables to PDB with explicit connectivity and estimate molecular volumes.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel volume sampling.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert an MDL molfile/SDF connection table into a single-residue PDB file.
    Convert(ConvertArgs),
    /// Estimate the molecular volume of a PDB or SDF structure by random projections.
    Volume(VolumeArgs),
}

/// Arguments for the `convert` subcommand.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Path to the input connection-table file (e.g., ligand.sdf).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Path for the output PDB file. An existing file is replaced.
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Residue name given to every atom (at most three characters).
    #[arg(short = 'r', long = "resname", value_name = "NAME")]
    pub residue_name: Option<String>,

    /// Path to an optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S convert.residue-name=LIG
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `volume` subcommand.
#[derive(Args, Debug)]
pub struct VolumeArgs {
    /// Path to the structure file. `.sdf`, `.sd` and `.mol` are read as connection tables,
    /// anything else as PDB.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Number of random directions to sample.
    #[arg(short = 'n', long, value_name = "INT")]
    pub trials: Option<usize>,

    /// Seed for reproducible estimates.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,

    /// Evaluate trials on the thread pool.
    #[arg(long)]
    pub parallel: bool,

    /// Path to an optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S volume.trials=5000
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}
