//! Implementation of `pgx analyze` subcommand.

use std::{io::Write, path::Path, time::Instant};

use rayon::prelude::*;
use thousands::Separable;

use crate::common;

use super::{
    inference::RiskEngine,
    knowledge::parse_drug_list,
    pipeline,
    report::AnalysisReport,
    vcf::ParseMode,
};

/// Command line arguments for `pgx analyze` subcommand.
#[derive(Debug, clap::Parser)]
#[command(author, version, about = "Pharmacogenomic risk report from VCF", long_about = None)]
pub struct Args {
    /// Path to input VCF file(s), `@path` reads paths from a file.
    #[arg(long, required = true)]
    pub path_input: Vec<String>,
    /// Comma-separated list of drugs to report on.
    #[arg(long)]
    pub drugs: String,
    /// Layout of the input files.
    #[arg(long, value_enum, default_value_t = ParseMode::Auto)]
    pub parse_mode: ParseMode,
    /// Path to the trained model JSON.
    #[arg(long)]
    pub path_model: Option<String>,
    /// Path to the label encoder JSON.
    #[arg(long)]
    pub path_label_encoder: Option<String>,
    /// Path to the output JSON Lines file.
    #[arg(long)]
    pub path_output: String,
    /// Set the number of threads to use, defaults to number of cores.
    #[arg(long)]
    pub threads: Option<usize>,
}

/// Load the risk engine from the optional model paths.
pub fn load_engine(
    path_model: Option<&str>,
    path_label_encoder: Option<&str>,
) -> Result<RiskEngine, anyhow::Error> {
    let path_model = path_model.map(common::expand_path).transpose()?;
    let path_label_encoder = path_label_encoder.map(common::expand_path).transpose()?;
    Ok(RiskEngine::load(
        path_model.as_deref().map(Path::new),
        path_label_encoder.as_deref().map(Path::new),
    ))
}

/// Main entry point for `pgx analyze` sub command.
pub fn run(args_common: &crate::common::Args, args: &Args) -> Result<(), anyhow::Error> {
    let before_anything = Instant::now();
    tracing::info!("pgx-worker {}", common::worker_version());
    tracing::info!("args_common = {:#?}", &args_common);
    tracing::info!("args = {:#?}", &args);

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .map_err(|e| anyhow::anyhow!("building global Rayon thread pool failed: {}", e))?;
    }

    common::trace_rss_now();

    let path_input = common::expand_path_list(&args.path_input)?;
    let drugs = parse_drug_list(&args.drugs);
    if drugs.is_empty() {
        tracing::warn!("drug list is empty, reports will have no results");
    }
    tracing::info!(
        "analyzing {} input file(s) for {} drug(s)",
        path_input.len().separate_with_commas(),
        drugs.len()
    );

    tracing::info!("Loading model...");
    let before_loading = Instant::now();
    let engine = load_engine(
        args.path_model.as_deref(),
        args.path_label_encoder.as_deref(),
    )?;
    tracing::info!(
        "... done loading model in {:?} (available: {})",
        before_loading.elapsed(),
        engine.is_available()
    );

    tracing::info!("Analyzing inputs...");
    let before_analysis = Instant::now();
    let reports = path_input
        .par_iter()
        .map(|path| {
            pipeline::analyze_path(path, args.parse_mode, &drugs, &engine)
                .map(|results| AnalysisReport::new(path, results))
                .map_err(|e| anyhow::anyhow!("could not analyze {}: {}", path, e))
        })
        .collect::<Result<Vec<_>, _>>()?;
    tracing::info!(
        "... done analyzing {} input(s) in {:?}",
        reports.len().separate_with_commas(),
        before_analysis.elapsed()
    );

    common::trace_rss_now();

    tracing::info!("Writing output...");
    let path_output = common::expand_path(&args.path_output)?;
    let mut writer = std::fs::File::create(&path_output)
        .map(std::io::BufWriter::new)
        .map_err(|e| anyhow::anyhow!("could not create output file {}: {}", &path_output, e))?;
    for report in &reports {
        serde_json::to_writer(&mut writer, report)?;
        writeln!(writer)?;
    }
    writer.flush()?;
    tracing::info!("... done writing {}", &path_output);

    tracing::info!(
        "All of `pgx analyze` completed in {:?}",
        before_anything.elapsed()
    );
    Ok(())
}
