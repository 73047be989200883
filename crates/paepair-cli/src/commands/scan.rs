use crate::cli::ScanArgs;
use crate::config::PartialAppConfig;
use crate::discovery;
use crate::error::{CliError, Result};
use crate::export;
use crate::report;
use crate::utils::progress::CliProgressHandler;
use paepair::{engine::progress::ProgressReporter, workflows};
use std::path::{Path, PathBuf};
use tracing::info;

pub fn run(args: ScanArgs) -> Result<()> {
    if !args.input.is_dir() {
        return Err(CliError::Argument(format!(
            "Input path is not a directory: {}",
            args.input.display()
        )));
    }

    info!("Merging configuration from file and CLI arguments...");
    let config = PartialAppConfig::load(args.analysis.config.as_deref())?
        .merge_with_cli(&args.analysis, args.expected_companions)?;

    info!("Scanning {:?} for predictions...", &args.input);
    let input = discovery::discover(&args.input, &config.discovery)?;
    info!(
        predictions = input.predictions.len(),
        unmatched = input.unmatched_structures.len(),
        "Discovery finished."
    );

    let output = match args.output {
        Some(path) => path,
        None => default_output_path(&args.input),
    };

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Invoking the core batch workflow...");
    let batch_report = workflows::batch::run(input, &config.analysis, &reporter);

    export::write_records_to_path(&output, &batch_report.records)?;
    print!("{}", report::render(&batch_report, &output));

    Ok(())
}

/// `Scores_pairwise_<dirname>.csv` in the parent of the input directory.
fn default_output_path(input: &Path) -> PathBuf {
    let resolved = input
        .canonicalize()
        .unwrap_or_else(|_| input.to_path_buf());
    let dir_name = resolved
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "results".to_string());
    let file_name = format!("Scores_pairwise_{}.csv", dir_name);
    match resolved.parent() {
        Some(parent) => parent.join(file_name),
        None => resolved.join(file_name),
    }
}
