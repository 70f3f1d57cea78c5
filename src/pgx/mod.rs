//! Pharmacogenomic risk assessment from patient variant files.
//!
//! The pipeline reads a VCF, maps the calls of the target genes to
//! metabolizer phenotypes, and reports a risk label per requested drug.

pub mod analyze;
pub mod features;
pub mod inference;
pub mod inspect;
pub mod knowledge;
pub mod phenotype;
pub mod pipeline;
pub mod report;
pub mod vcf;
