//! Assembly of the per-drug result records.

use serde::{Deserialize, Serialize};

use super::{
    inference::{RiskInferenceResult, Severity},
    knowledge::{self, Gene},
    phenotype::{GenePhenotypeProfile, Phenotype},
    vcf::{ParsedVariants, VariantObservation},
};

/// Risk part of a `DrugResult`.
#[derive(Serialize, Deserialize, PartialEq, Clone, Debug)]
pub struct RiskAssessment {
    pub risk_label: String,
    pub confidence_score: f64,
    pub severity: Severity,
}

/// A detected variant as reported.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug)]
pub struct Variant {
    pub rsid: String,
    pub genotype: Option<String>,
}

impl From<VariantObservation> for Variant {
    fn from(val: VariantObservation) -> Self {
        Self {
            rsid: val.id,
            genotype: Some(val.genotype),
        }
    }
}

/// Pharmacogenomic profile projected to the drug's primary gene.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug)]
pub struct PharmacogenomicProfile {
    pub primary_gene: Gene,
    pub diplotype: String,
    pub phenotype: Phenotype,
    #[serde(default)]
    pub detected_variants: Vec<Variant>,
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug)]
pub struct ClinicalRecommendation {
    pub text: String,
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug)]
pub struct Explanation {
    pub summary: String,
}

/// Quality information on the analysis.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug)]
pub struct QualityMetrics {
    pub vcf_parsing_success: bool,
    pub variant_count: usize,
    pub model_available: bool,
}

/// Result record for one drug.
#[derive(Serialize, Deserialize, PartialEq, Clone, Debug)]
pub struct DrugResult {
    pub drug: String,
    pub risk_assessment: RiskAssessment,
    pub pharmacogenomic_profile: PharmacogenomicProfile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clinical_recommendation: Option<ClinicalRecommendation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm_generated_explanation: Option<Explanation>,
    pub quality_metrics: QualityMetrics,
}

/// Combine the pipeline outputs for one drug into a `DrugResult`.
pub fn assemble(
    drug: &str,
    parsed: &ParsedVariants,
    profile: &GenePhenotypeProfile,
    risk: &RiskInferenceResult,
    model_available: bool,
) -> DrugResult {
    let primary_gene = knowledge::primary_gene(drug);
    let phenotype = profile.get(primary_gene);
    let diplotype = parsed
        .diplotype(primary_gene)
        .unwrap_or_else(|| knowledge::PLACEHOLDER_DIPLOTYPE.to_string());

    DrugResult {
        drug: drug.to_string(),
        risk_assessment: RiskAssessment {
            risk_label: risk.risk_label.clone(),
            confidence_score: risk.confidence,
            severity: risk.severity,
        },
        pharmacogenomic_profile: PharmacogenomicProfile {
            primary_gene,
            diplotype,
            phenotype,
            detected_variants: parsed
                .observations()
                .into_iter()
                .map(Variant::from)
                .collect(),
        },
        clinical_recommendation: Some(ClinicalRecommendation {
            text: knowledge::recommendation_text(&risk.risk_label, drug),
        }),
        llm_generated_explanation: Some(Explanation {
            summary: knowledge::explanation_text(&phenotype.to_string(), primary_gene, drug),
        }),
        quality_metrics: QualityMetrics {
            vcf_parsing_success: true,
            variant_count: parsed.variant_count(),
            model_available,
        },
    }
}

/// Results for all drugs of one input file.
#[derive(Serialize, Deserialize, PartialEq, Clone, Debug)]
pub struct AnalysisReport {
    pub patient_id: String,
    /// RFC 3339 time of the analysis.
    pub timestamp: String,
    /// Path of the analyzed file.
    pub source: String,
    pub results: Vec<DrugResult>,
}

impl AnalysisReport {
    /// Wrap `results` with a fresh patient ID and the current time.
    pub fn new(source: &str, results: Vec<DrugResult>) -> Self {
        let uuid = uuid::Uuid::new_v4().simple().to_string();
        Self {
            patient_id: format!("PATIENT_{}", &uuid[..8]),
            timestamp: chrono::Local::now().to_rfc3339(),
            source: source.to_string(),
            results,
        }
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::pgx::{
        inference::RiskEngine,
        vcf::{self, ParseMode},
    };

    #[test]
    fn fallback_result_wire_shape() -> Result<(), anyhow::Error> {
        let parsed = vcf::parse_bytes(
            b"chr22\t1\trs3892097\tC\tT\t.\tPASS\t.\tGT\t0/1\n",
            ParseMode::Genotype,
        );
        let profile = GenePhenotypeProfile::from_parsed(&parsed);
        let risk = RiskEngine::unavailable().infer(&Default::default());
        let result = assemble("CODEINE", &parsed, &profile, &risk, false);

        assert_eq!(
            serde_json::to_value(&result)?,
            serde_json::json!({
                "drug": "CODEINE",
                "risk_assessment": {
                    "risk_label": "Safe",
                    "confidence_score": 0.5,
                    "severity": "low"
                },
                "pharmacogenomic_profile": {
                    "primary_gene": "CYP2D6",
                    "diplotype": "*1/*1",
                    "phenotype": "PM",
                    "detected_variants": [{"rsid": "rs3892097", "genotype": "CT"}]
                },
                "clinical_recommendation": {
                    "text": "Based on the Safe risk for CODEINE, please consult guidelines."
                },
                "llm_generated_explanation": {
                    "summary": "The patient is a PM for CYP2D6, which affects CODEINE metabolism."
                },
                "quality_metrics": {
                    "vcf_parsing_success": true,
                    "variant_count": 1,
                    "model_available": false
                }
            })
        );

        Ok(())
    }

    #[test]
    fn star_allele_diplotype() -> Result<(), anyhow::Error> {
        let parsed = vcf::parse_path("tests/pgx/star_alleles.vcf", ParseMode::Auto)?;
        let profile = GenePhenotypeProfile::from_parsed(&parsed);
        let risk = RiskEngine::unavailable().infer(&Default::default());

        let clopidogrel = assemble("CLOPIDOGREL", &parsed, &profile, &risk, false);
        assert_eq!(clopidogrel.pharmacogenomic_profile.diplotype, "*2/*17");
        assert_eq!(
            clopidogrel.pharmacogenomic_profile.phenotype,
            Phenotype::Intermediate
        );
        assert_eq!(clopidogrel.quality_metrics.variant_count, 5);

        let fluorouracil = assemble("FLUOROURACIL", &parsed, &profile, &risk, false);
        assert_eq!(fluorouracil.pharmacogenomic_profile.primary_gene, Gene::Dpyd);
        assert_eq!(fluorouracil.pharmacogenomic_profile.diplotype, "Unknown");
        assert_eq!(fluorouracil.pharmacogenomic_profile.phenotype, Phenotype::Normal);

        Ok(())
    }

    #[test]
    fn empty_input_quality_metrics() {
        let parsed = vcf::parse_bytes(b"", ParseMode::Auto);
        let profile = GenePhenotypeProfile::from_parsed(&parsed);
        let risk = RiskEngine::unavailable().infer(&Default::default());
        let result = assemble("WARFARIN", &parsed, &profile, &risk, false);

        assert_eq!(
            result.quality_metrics,
            QualityMetrics {
                vcf_parsing_success: true,
                variant_count: 0,
                model_available: false,
            }
        );
        assert!(result.pharmacogenomic_profile.detected_variants.is_empty());
        assert_eq!(result.pharmacogenomic_profile.primary_gene, Gene::Cyp2c9);
    }

    #[test]
    fn report_envelope() {
        let report = AnalysisReport::new("tests/pgx/empty.vcf", Vec::new());

        assert!(report.patient_id.starts_with("PATIENT_"));
        assert_eq!(report.patient_id.len(), "PATIENT_".len() + 8);
        assert!(chrono::DateTime::parse_from_rfc3339(&report.timestamp).is_ok());
        assert_eq!(report.source, "tests/pgx/empty.vcf");
    }
}
