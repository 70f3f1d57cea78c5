//! Static pharmacogenomic knowledge: target genes, drug/gene pairs, and text templates.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The pharmacogenes considered for risk assessment.
#[derive(
    Serialize,
    Deserialize,
    enum_map::Enum,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Clone,
    Copy,
    Debug,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
pub enum Gene {
    /// CYP2C19
    #[serde(rename = "CYP2C19")]
    #[strum(serialize = "CYP2C19")]
    Cyp2c19,
    /// CYP2D6
    #[serde(rename = "CYP2D6")]
    #[strum(serialize = "CYP2D6")]
    Cyp2d6,
    /// CYP2C9
    #[serde(rename = "CYP2C9")]
    #[strum(serialize = "CYP2C9")]
    Cyp2c9,
    /// SLCO1B1
    #[serde(rename = "SLCO1B1")]
    #[strum(serialize = "SLCO1B1")]
    Slco1b1,
    /// TPMT
    #[serde(rename = "TPMT")]
    #[strum(serialize = "TPMT")]
    Tpmt,
    /// DPYD
    #[serde(rename = "DPYD")]
    #[strum(serialize = "DPYD")]
    Dpyd,
}

/// Gene reported for drugs that are not in `DRUG_GENES`.
pub const DEFAULT_PRIMARY_GENE: Gene = Gene::Cyp2c19;

/// Supported drugs and the gene whose phenotype drives their risk.
pub const DRUG_GENES: &[(&str, Gene)] = &[
    ("CLOPIDOGREL", Gene::Cyp2c19),
    ("WARFARIN", Gene::Cyp2c9),
    ("CODEINE", Gene::Cyp2d6),
    ("SIMVASTATIN", Gene::Slco1b1),
    ("AZATHIOPRINE", Gene::Tpmt),
    ("FLUOROURACIL", Gene::Dpyd),
];

/// Diplotype reported when no star alleles were called for the primary gene.
pub const PLACEHOLDER_DIPLOTYPE: &str = "*1/*1";

/// Return the primary gene for the given drug name, ignoring case.
pub fn primary_gene(drug: &str) -> Gene {
    let drug = drug.trim().to_uppercase();
    DRUG_GENES
        .iter()
        .find(|(name, _)| *name == drug)
        .map(|(_, gene)| *gene)
        .unwrap_or(DEFAULT_PRIMARY_GENE)
}

/// Parse a gene symbol from a VCF `INFO/GENE` value, returning `None` for non-target genes.
pub fn target_gene(symbol: &str) -> Option<Gene> {
    Gene::from_str(symbol).ok()
}

/// Clinical recommendation text for a drug.
pub fn recommendation_text(risk_label: &str, drug: &str) -> String {
    format!("Based on the {risk_label} risk for {drug}, please consult guidelines.")
}

/// Explanatory summary text for the primary gene's phenotype.
pub fn explanation_text(phenotype: &str, gene: Gene, drug: &str) -> String {
    format!("The patient is a {phenotype} for {gene}, which affects {drug} metabolism.")
}

/// Split a comma-separated drug list, trimming entries and dropping empty ones.
pub fn parse_drug_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
