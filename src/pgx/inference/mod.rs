//! Risk inference on top of a trained classifier.
//!
//! The engine degrades instead of failing: without a model, every drug gets
//! the fallback label, and a failing prediction only affects its own drug.

use std::{path::Path, sync::Arc};

use serde::{Deserialize, Serialize};

pub mod model;

pub use model::{Classifier, LabelDecoder, LoadedModel};

use super::features::FeatureVector;

/// Label used when no model is available.
pub const FALLBACK_LABEL: &str = "Safe";
/// Confidence used when no model is available.
pub const FALLBACK_CONFIDENCE: f64 = 0.5;
/// Label used when prediction fails.
pub const FAILURE_LABEL: &str = "Unknown";
/// Confidence used when prediction fails.
pub const FAILURE_CONFIDENCE: f64 = 0.0;

/// Severity tier derived from the risk label.
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
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    #[default]
    Low,
    Moderate,
    High,
}

impl Severity {
    /// Severity for the given risk label; unknown labels are low.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Toxic" | "High Risk" => Severity::High,
            "Adjust Dosage" | "Moderate Risk" => Severity::Moderate,
            _ => Severity::Low,
        }
    }
}

/// Why an inference result does not come from the model.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug)]
pub enum Degradation {
    /// No model was loaded.
    ModelUnavailable,
    /// The model failed on this input.
    InferenceFailed(String),
}

/// Whether the risk label was predicted or substituted.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug)]
pub enum InferenceOutcome {
    Predicted,
    Degraded(Degradation),
}

/// Risk label, confidence and severity for one drug.
#[derive(Serialize, Deserialize, PartialEq, Clone, Debug)]
pub struct RiskInferenceResult {
    pub risk_label: String,
    /// In `[0, 1]`, rounded to two decimals.
    pub confidence: f64,
    pub severity: Severity,
    pub outcome: InferenceOutcome,
}

impl RiskInferenceResult {
    fn new(risk_label: String, confidence: f64, outcome: InferenceOutcome) -> Self {
        Self {
            severity: Severity::from_label(&risk_label),
            risk_label,
            confidence: round_confidence(confidence),
            outcome,
        }
    }

    fn model_unavailable() -> Self {
        Self::new(
            FALLBACK_LABEL.to_string(),
            FALLBACK_CONFIDENCE,
            InferenceOutcome::Degraded(Degradation::ModelUnavailable),
        )
    }

    fn failed(error: model::Error) -> Self {
        Self::new(
            FAILURE_LABEL.to_string(),
            FAILURE_CONFIDENCE,
            InferenceOutcome::Degraded(Degradation::InferenceFailed(error.to_string())),
        )
    }

    /// Whether the label was predicted by the model.
    pub fn is_predicted(&self) -> bool {
        self.outcome == InferenceOutcome::Predicted
    }
}

/// Clamp to `[0, 1]` and round to two decimals.
fn round_confidence(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    (value.clamp(0.0, 1.0) * 100.0).round() / 100.0
}

/// Read-only wrapper around the optional model, shared between requests.
#[derive(Debug, Clone, Default)]
pub struct RiskEngine {
    model: Option<Arc<LoadedModel>>,
}

impl RiskEngine {
    /// Construct engine around a loaded model.
    pub fn new(model: LoadedModel) -> Self {
        Self {
            model: Some(Arc::new(model)),
        }
    }

    /// Construct engine without model; all results use the fallback label.
    pub fn unavailable() -> Self {
        Self { model: None }
    }

    /// Load model artifacts; a missing path or loading error yields an unavailable engine.
    pub fn load(path_model: Option<&Path>, path_label_encoder: Option<&Path>) -> Self {
        let (path_model, path_label_encoder) = match (path_model, path_label_encoder) {
            (Some(path_model), Some(path_label_encoder)) => (path_model, path_label_encoder),
            _ => {
                tracing::warn!("model or label encoder not given, risk inference is degraded");
                return Self::unavailable();
            }
        };
        match LoadedModel::from_paths(path_model, path_label_encoder) {
            Ok(model) => {
                tracing::info!(
                    "loaded model with {} features and {} classes",
                    model.classifier.feature_names().len(),
                    model.decoder.classes().len()
                );
                Self::new(model)
            }
            Err(e) => {
                tracing::warn!("could not load model, risk inference is degraded: {}", e);
                Self::unavailable()
            }
        }
    }

    /// Whether a model was loaded.
    pub fn is_available(&self) -> bool {
        self.model.is_some()
    }

    /// The trained feature schema; empty without model.
    pub fn feature_schema(&self) -> &[String] {
        self.model
            .as_ref()
            .map(|model| model.classifier.feature_names())
            .unwrap_or(&[])
    }

    /// Labels of the model's classes; empty without model.
    pub fn classes(&self) -> &[String] {
        self.model
            .as_ref()
            .map(|model| model.decoder.classes())
            .unwrap_or(&[])
    }

    /// Predict the risk label and confidence for `features`.
    pub fn infer(&self, features: &FeatureVector) -> RiskInferenceResult {
        let model = match self.model.as_ref() {
            Some(model) if !features.is_empty() => model,
            _ => return RiskInferenceResult::model_unavailable(),
        };

        let predicted = model.classifier.predict_proba(features).and_then(|proba| {
            let index = model::argmax(&proba).ok_or(model::Error::EmptyDistribution)?;
            let label = model.decoder.decode(index)?;
            Ok((label, proba[index]))
        });
        match predicted {
            Ok((label, confidence)) => {
                RiskInferenceResult::new(label, confidence, InferenceOutcome::Predicted)
            }
            Err(e) => {
                tracing::warn!("prediction failed, using {:?}: {}", FAILURE_LABEL, e);
                RiskInferenceResult::failed(e)
            }
        }
    }
}
