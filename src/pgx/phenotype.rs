//! Derivation of per-gene metabolizer phenotypes from variant observations.
//!
//! Both rule sets are simplified and illustrative only.

use enum_map::EnumMap;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use super::{
    knowledge::Gene,
    vcf::{GenotypeCalls, ParsedVariants, StarAlleleCalls},
};

/// Metabolizer phenotype of a gene.
#[derive(
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Clone,
    Copy,
    Debug,
    Default,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
pub enum Phenotype {
    /// Normal metabolizer.
    #[default]
    #[serde(rename = "NM")]
    #[strum(serialize = "NM")]
    Normal,
    /// Poor metabolizer.
    #[serde(rename = "PM")]
    #[strum(serialize = "PM")]
    Poor,
    /// Intermediate metabolizer.
    #[serde(rename = "IM")]
    #[strum(serialize = "IM")]
    Intermediate,
    /// Rapid metabolizer.
    #[serde(rename = "RM")]
    #[strum(serialize = "RM")]
    Rapid,
    /// Ultra-rapid metabolizer.
    #[serde(rename = "URM")]
    #[strum(serialize = "URM")]
    UltraRapid,
}

impl Phenotype {
    /// Human-readable name.
    pub fn description(&self) -> &'static str {
        match self {
            Phenotype::Normal => "normal metabolizer",
            Phenotype::Poor => "poor metabolizer",
            Phenotype::Intermediate => "intermediate metabolizer",
            Phenotype::Rapid => "rapid metabolizer",
            Phenotype::UltraRapid => "ultra-rapid metabolizer",
        }
    }
}

/// Star alleles with no enzyme function.
pub const LOSS_OF_FUNCTION_ALLELES: &[&str] = &["*2", "*3", "*4", "*5"];
/// Star alleles with increased enzyme function.
pub const INCREASED_FUNCTION_ALLELES: &[&str] = &["*17"];

/// Variant IDs whose presence overrides a gene's phenotype.
///
/// Rules are checked per gene in order; the first present ID wins.
pub const PRESENCE_RULES: &[(Gene, &str, Phenotype)] = &[
    // CYP2C19*2
    (Gene::Cyp2c19, "rs4244285", Phenotype::Poor),
    // CYP2C19*17
    (Gene::Cyp2c19, "rs12248560", Phenotype::UltraRapid),
    // CYP2D6*4
    (Gene::Cyp2d6, "rs3892097", Phenotype::Poor),
    // SLCO1B1*5
    (Gene::Slco1b1, "rs4149056", Phenotype::Poor),
];

/// Phenotype for each of the target genes.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, Default)]
pub struct GenePhenotypeProfile {
    phenotypes: EnumMap<Gene, Phenotype>,
}

impl GenePhenotypeProfile {
    /// Construct profile from explicit phenotypes, all other genes are normal.
    pub fn with_phenotypes(phenotypes: &[(Gene, Phenotype)]) -> Self {
        let mut result = Self::default();
        for (gene, phenotype) in phenotypes {
            result.phenotypes[*gene] = *phenotype;
        }
        result
    }

    /// Apply the presence-based rule set to genotype calls.
    pub fn from_genotypes(calls: &GenotypeCalls) -> Self {
        let mut result = Self::default();
        for gene in Gene::iter() {
            if let Some((_, id, phenotype)) = PRESENCE_RULES
                .iter()
                .find(|(rule_gene, id, _)| *rule_gene == gene && calls.contains(id))
            {
                tracing::trace!("{} present, {} is {}", id, gene, phenotype.description());
                result.phenotypes[gene] = *phenotype;
            }
        }
        result
    }

    /// Apply the diplotype-based rule set to star allele calls.
    pub fn from_star_alleles(calls: &StarAlleleCalls) -> Self {
        let mut result = Self::default();
        for gene in Gene::iter() {
            if let Some(phenotype) = diplotype_phenotype(calls.alleles(gene)) {
                result.phenotypes[gene] = phenotype;
            }
        }
        result
    }

    /// Apply the rule set matching the layout the variants were parsed in.
    pub fn from_parsed(parsed: &ParsedVariants) -> Self {
        match parsed {
            ParsedVariants::Genotypes(calls) => Self::from_genotypes(calls),
            ParsedVariants::StarAlleles(calls) => Self::from_star_alleles(calls),
        }
    }

    /// The phenotype of `gene`.
    pub fn get(&self, gene: Gene) -> Phenotype {
        self.phenotypes[gene]
    }

    /// Iterate over all genes and their phenotypes.
    pub fn iter(&self) -> impl Iterator<Item = (Gene, Phenotype)> + '_ {
        self.phenotypes.iter().map(|(gene, phenotype)| (gene, *phenotype))
    }
}

/// Classify a gene's star alleles; `None` if no allele was called.
///
/// A single allele is paired with the reference `*1` allele.
pub fn diplotype_phenotype(alleles: &[String]) -> Option<Phenotype> {
    let (a1, a2) = match alleles {
        [] => return None,
        [single] => (single.as_str(), "*1"),
        [first, second, ..] => (first.as_str(), second.as_str()),
    };
    let is_lof = |allele: &str| LOSS_OF_FUNCTION_ALLELES.contains(&allele);
    let is_inc = |allele: &str| INCREASED_FUNCTION_ALLELES.contains(&allele);

    Some(if is_lof(a1) && is_lof(a2) {
        Phenotype::Poor
    } else if is_lof(a1) || is_lof(a2) {
        Phenotype::Intermediate
    } else if is_inc(a1) || is_inc(a2) {
        Phenotype::Rapid
    } else {
        Phenotype::Normal
    })
}
