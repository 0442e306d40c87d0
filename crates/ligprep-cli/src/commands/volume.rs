use crate::cli::VolumeArgs;
use crate::config::build_volume_config;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use ligprep::engine::progress::ProgressReporter;
use ligprep::workflows;
use tracing::info;

pub fn run(args: VolumeArgs, show_progress: bool) -> Result<()> {
    let config = build_volume_config(&args)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = if show_progress {
        ProgressReporter::with_callback(progress_handler.get_callback())
    } else {
        ProgressReporter::new()
    };

    info!(
        input = %config.input_path.display(),
        trials = config.core_config.trials(),
        parallel = config.core_config.parallel(),
        "Estimating molecular volume."
    );
    let estimate = workflows::volume::run(&config.input_path, &config.core_config, &reporter)?;

    println!("Volume:      {:.3} Å³", estimate.volume);
    println!("Std. dev.:   {:.3} Å³", estimate.std_dev);
    println!("Mean radius: {:.3} Å", estimate.mean_radius);
    println!("Trials:      {}", estimate.trials);
    Ok(())
}
