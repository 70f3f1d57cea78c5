//! Implementation of `model inspect` subcommand.

use std::io::Write;

use itertools::Itertools;

use crate::common;

use super::inference::{LoadedModel, RiskEngine};

/// Command line arguments for `model inspect` subcommand.
#[derive(Debug, clap::Parser)]
#[command(author, version, about = "Show feature schema and classes of a model", long_about = None)]
pub struct Args {
    /// Path to the trained model JSON.
    #[arg(long)]
    pub path_model: String,
    /// Path to the label encoder JSON.
    #[arg(long)]
    pub path_label_encoder: String,
}

/// Write the feature schema and class labels of the engine's model to `out`.
pub fn write_summary<W: Write>(engine: &RiskEngine, out: &mut W) -> Result<(), std::io::Error> {
    let features = engine.feature_schema();
    writeln!(out, "features ({}):", features.len())?;
    for (i, name) in features.iter().enumerate() {
        writeln!(out, "  {:>3}  {}", i, name)?;
    }
    writeln!(
        out,
        "classes ({}): {}",
        engine.classes().len(),
        engine.classes().iter().join(", ")
    )
}

/// Main entry point for `model inspect` sub command.
pub fn run(args_common: &crate::common::Args, args: &Args) -> Result<(), anyhow::Error> {
    tracing::info!("args_common = {:#?}", &args_common);
    tracing::info!("args = {:#?}", &args);

    let path_model = common::expand_path(&args.path_model)?;
    let path_label_encoder = common::expand_path(&args.path_label_encoder)?;
    let engine = LoadedModel::from_paths(&path_model, &path_label_encoder)
        .map(RiskEngine::new)
        .map_err(|e| anyhow::anyhow!("could not load model: {}", e))?;

    let stdout = std::io::stdout();
    write_summary(&engine, &mut stdout.lock())?;

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::pgx::inference::{
        model::test::{PATH_LABEL_ENCODER, PATH_MODEL},
        test::loaded_engine,
    };

    #[test]
    fn summary() -> Result<(), anyhow::Error> {
        let mut out = Vec::new();
        write_summary(&loaded_engine(), &mut out)?;

        insta::assert_snapshot!(String::from_utf8(out)?, @r###"
        features (8):
            0  CLOPIDOGREL
            1  CODEINE
            2  WARFARIN
            3  SIMVASTATIN
            4  CYP2C19_PM
            5  CYP2C19_URM
            6  CYP2D6_PM
            7  SLCO1B1_PM
        classes (3): Adjust Dosage, Safe, Toxic
        "###);

        Ok(())
    }

    #[test]
    fn run_smoke() -> Result<(), anyhow::Error> {
        let args = Args {
            path_model: PATH_MODEL.to_string(),
            path_label_encoder: PATH_LABEL_ENCODER.to_string(),
        };

        run(&crate::common::Args::default(), &args)
    }

    #[test]
    fn run_broken_model() {
        let args = Args {
            path_model: String::from("tests/pgx/model/broken.json"),
            path_label_encoder: PATH_LABEL_ENCODER.to_string(),
        };

        assert!(run(&crate::common::Args::default(), &args).is_err());
    }

    #[test]
    fn summary_without_model() -> Result<(), anyhow::Error> {
        let mut out = Vec::new();
        write_summary(&RiskEngine::unavailable(), &mut out)?;

        assert_eq!(String::from_utf8(out)?, "features (0):\nclasses (0): \n");

        Ok(())
    }
}
