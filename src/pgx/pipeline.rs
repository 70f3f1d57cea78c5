//! Driver from variant file to ordered per-drug results.

use std::path::Path;

use super::{
    features,
    inference::RiskEngine,
    phenotype::GenePhenotypeProfile,
    report::{self, DrugResult},
    vcf::{self, ParseMode, ParsedVariants},
};

/// Compute one result per drug, in the order of `drugs`.
pub fn results_for_profile(
    parsed: &ParsedVariants,
    profile: &GenePhenotypeProfile,
    drugs: &[String],
    engine: &RiskEngine,
) -> Vec<DrugResult> {
    let schema = engine.feature_schema();
    drugs
        .iter()
        .map(|drug| {
            let features = features::vectorize(schema, profile, drug);
            let risk = engine.infer(&features);
            tracing::debug!(
                "{}: {} ({}, {:?})",
                drug,
                &risk.risk_label,
                risk.confidence,
                &risk.outcome
            );
            report::assemble(drug, parsed, profile, &risk, engine.is_available())
        })
        .collect()
}

/// Derive the phenotype profile from `parsed` and compute the per-drug results.
pub fn analyze(parsed: &ParsedVariants, drugs: &[String], engine: &RiskEngine) -> Vec<DrugResult> {
    let profile = GenePhenotypeProfile::from_parsed(parsed);
    results_for_profile(parsed, &profile, drugs, engine)
}

/// Run the pipeline on raw variant file bytes.
pub fn analyze_bytes(
    bytes: &[u8],
    mode: ParseMode,
    drugs: &[String],
    engine: &RiskEngine,
) -> Vec<DrugResult> {
    analyze(&vcf::parse_bytes(bytes, mode), drugs, engine)
}

/// Run the pipeline on the variant file at `path`.
///
/// # Errors
///
/// Returns an error if the file does not exist or cannot be read.
pub fn analyze_path<P: AsRef<Path>>(
    path: P,
    mode: ParseMode,
    drugs: &[String],
    engine: &RiskEngine,
) -> Result<Vec<DrugResult>, vcf::Error> {
    let parsed = vcf::parse_path(path, mode)?;
    Ok(analyze(&parsed, drugs, engine))
}
