//! Adapters for trained classifier and label encoder artifacts.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::pgx::features::FeatureVector;

/// Error type for loading and applying model artifacts.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("could not open model artifact {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse model artifact {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid model artifact: {0}")]
    Invalid(String),
    #[error("feature vector has {actual} features but the model expects {expected}")]
    ShapeMismatch { expected: usize, actual: usize },
    #[error("model produced an empty probability distribution")]
    EmptyDistribution,
    #[error("class index {index} out of range for {count} labels")]
    UnknownClassIndex { index: usize, count: usize },
}

/// A trained classifier over a fixed feature schema.
///
/// Implementations must be safe for concurrent reads.
pub trait Classifier: Send + Sync {
    /// The trained feature schema, in the order the model expects.
    fn feature_names(&self) -> &[String];

    /// Class probability distribution for `features`.
    fn predict_proba(&self, features: &FeatureVector) -> Result<Vec<f64>, Error>;

    /// Index of the most probable class for `features`.
    fn predict(&self, features: &FeatureVector) -> Result<usize, Error> {
        let proba = self.predict_proba(features)?;
        argmax(&proba).ok_or(Error::EmptyDistribution)
    }
}

/// Decoder from class index to label.
pub trait LabelDecoder: Send + Sync {
    /// The label of class `index`.
    fn decode(&self, index: usize) -> Result<String, Error>;

    /// All labels in class index order.
    fn classes(&self) -> &[String];
}

/// Index of the largest value; the first one wins on ties.
pub fn argmax(values: &[f64]) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, &v)| match best {
            Some((_, best_v)) if best_v >= v => best,
            _ => Some((i, v)),
        })
        .map(|(i, _)| i)
}

/// Load a JSON artifact from `path`.
fn load_json<T, P>(path: P) -> Result<T, Error>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let reader = std::fs::File::open(path)
        .map(std::io::BufReader::new)
        .map_err(|source| Error::Open {
            path: path.to_path_buf(),
            source,
        })?;
    serde_json::from_reader(reader).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Multinomial logistic regression model.
#[derive(Serialize, Deserialize, PartialEq, Clone, Debug)]
pub struct LinearClassifier {
    /// Trained feature schema.
    feature_names: Vec<String>,
    /// One row of weights per class, one column per feature.
    coefficients: Vec<Vec<f64>>,
    /// One intercept per class.
    intercepts: Vec<f64>,
}

impl LinearClassifier {
    /// Construct a model, checking that the shapes agree.
    pub fn new(
        feature_names: Vec<String>,
        coefficients: Vec<Vec<f64>>,
        intercepts: Vec<f64>,
    ) -> Result<Self, Error> {
        let result = Self {
            feature_names,
            coefficients,
            intercepts,
        };
        result.validate()?;
        Ok(result)
    }

    /// Load model from JSON file at `path`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let result: Self = load_json(path)?;
        result.validate()?;
        Ok(result)
    }

    /// Number of classes.
    pub fn n_classes(&self) -> usize {
        self.intercepts.len()
    }

    fn validate(&self) -> Result<(), Error> {
        if self.intercepts.is_empty() {
            return Err(Error::Invalid(String::from("model has no classes")));
        }
        if self.coefficients.len() != self.intercepts.len() {
            return Err(Error::Invalid(format!(
                "{} coefficient rows for {} intercepts",
                self.coefficients.len(),
                self.intercepts.len()
            )));
        }
        if let Some((i, row)) = self
            .coefficients
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != self.feature_names.len())
        {
            return Err(Error::Invalid(format!(
                "coefficient row {} has {} weights for {} features",
                i,
                row.len(),
                self.feature_names.len()
            )));
        }
        Ok(())
    }
}

impl Classifier for LinearClassifier {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn predict_proba(&self, features: &FeatureVector) -> Result<Vec<f64>, Error> {
        if features.len() != self.feature_names.len() {
            return Err(Error::ShapeMismatch {
                expected: self.feature_names.len(),
                actual: features.len(),
            });
        }
        let x = features.to_dense();
        let logits = self
            .coefficients
            .iter()
            .zip(self.intercepts.iter())
            .map(|(row, intercept)| {
                intercept + row.iter().zip(x.iter()).map(|(w, x)| w * x).sum::<f64>()
            })
            .collect::<Vec<_>>();
        Ok(softmax(&logits))
    }
}

/// Numerically stable softmax.
fn softmax(logits: &[f64]) -> Vec<f64> {
    let max = logits.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let exps = logits.iter().map(|l| (l - max).exp()).collect::<Vec<_>>();
    let sum = exps.iter().sum::<f64>();
    exps.into_iter().map(|e| e / sum).collect()
}

/// Label encoder mapping class indices to labels.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, derive_new::new)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    /// Load encoder from JSON file at `path`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        load_json(path)
    }
}

impl LabelDecoder for LabelEncoder {
    fn decode(&self, index: usize) -> Result<String, Error> {
        self.classes
            .get(index)
            .cloned()
            .ok_or(Error::UnknownClassIndex {
                index,
                count: self.classes.len(),
            })
    }

    fn classes(&self) -> &[String] {
        &self.classes
    }
}

/// A classifier together with the decoder for its class indices.
pub struct LoadedModel {
    pub classifier: Box<dyn Classifier>,
    pub decoder: Box<dyn LabelDecoder>,
}

impl std::fmt::Debug for LoadedModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedModel")
            .field("features", &self.classifier.feature_names().len())
            .field("classes", &self.decoder.classes())
            .finish()
    }
}

impl LoadedModel {
    pub fn new(classifier: Box<dyn Classifier>, decoder: Box<dyn LabelDecoder>) -> Self {
        Self {
            classifier,
            decoder,
        }
    }

    /// Load linear classifier and label encoder from JSON artifacts.
    pub fn from_paths<P, Q>(path_model: P, path_label_encoder: Q) -> Result<Self, Error>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let classifier = LinearClassifier::from_path(path_model)?;
        let decoder = LabelEncoder::from_path(path_label_encoder)?;
        if classifier.n_classes() != decoder.classes().len() {
            tracing::warn!(
                "model has {} classes but label encoder has {} labels",
                classifier.n_classes(),
                decoder.classes().len()
            );
        }
        Ok(Self::new(Box::new(classifier), Box::new(decoder)))
    }
}
