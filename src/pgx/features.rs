//! Construction of classifier input from a phenotype profile and a drug.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::phenotype::GenePhenotypeProfile;

/// One-hot feature vector over a classifier's trained feature schema.
///
/// The keys are exactly the schema names, in schema order.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, Default)]
pub struct FeatureVector {
    values: IndexMap<String, u8>,
}

impl FeatureVector {
    /// Construct vector with all `schema` features set to zero.
    pub fn zeros<S: AsRef<str>>(schema: &[S]) -> Self {
        Self {
            values: schema.iter().map(|name| (name.as_ref().to_string(), 0)).collect(),
        }
    }

    /// Set feature `name` to one; returns `false` if `name` is not in the schema.
    pub fn set(&mut self, name: &str) -> bool {
        if let Some(value) = self.values.get_mut(name) {
            *value = 1;
            true
        } else {
            false
        }
    }

    /// The value of feature `name`, if in the schema.
    pub fn get(&self, name: &str) -> Option<u8> {
        self.values.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Feature names in schema order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Names of the features that are set.
    pub fn active(&self) -> impl Iterator<Item = &str> {
        self.values
            .iter()
            .filter(|(_, value)| **value == 1)
            .map(|(name, _)| name.as_str())
    }

    /// Values in schema order, as consumed by numeric models.
    pub fn to_dense(&self) -> Vec<f64> {
        self.values.values().map(|value| *value as f64).collect()
    }
}

/// Build the feature vector for `drug` given the patient's `profile`.
///
/// The upper-cased drug name and `GENE_PHENOTYPE` pairs are set if the schema
/// knows them; other derived names are dropped.
pub fn vectorize<S: AsRef<str>>(
    schema: &[S],
    profile: &GenePhenotypeProfile,
    drug: &str,
) -> FeatureVector {
    let mut result = FeatureVector::zeros(schema);

    let drug_feature = drug.trim().to_uppercase();
    if !result.set(&drug_feature) {
        tracing::trace!("drug feature {} not in schema", &drug_feature);
    }
    for (gene, phenotype) in profile.iter() {
        let feature = format!("{}_{}", gene, phenotype);
        if !result.set(&feature) {
            tracing::trace!("phenotype feature {} not in schema", &feature);
        }
    }

    result
}
