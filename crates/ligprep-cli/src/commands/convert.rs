use crate::cli::ConvertArgs;
use crate::config::build_convert_config;
use crate::error::Result;
use ligprep::workflows;
use tracing::info;

pub fn run(args: ConvertArgs) -> Result<()> {
    let config = build_convert_config(&args)?;

    info!(
        input = %config.input_path.display(),
        residue_name = config.core_config.residue_name(),
        "Converting connection table to PDB."
    );
    let summary = workflows::convert::run(
        &config.input_path,
        &config.output_path,
        &config.core_config,
    )?;

    println!(
        "✓ Wrote {} atoms ({} with CONECT records) to: {}",
        summary.atoms,
        summary.conect_records,
        config.output_path.display()
    );
    Ok(())
}
