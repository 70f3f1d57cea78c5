//! Extraction of variant observations from VCF-style text.
//!
//! Two record layouts are supported.  In the sample-genotype layout, the
//! `FORMAT/GT` call of the first sample is resolved to bases, keyed by the
//! variant ID.  In the star-allele layout, each record carries `GENE` and
//! `STAR` keys in the `INFO` column and contributes one star allele to its
//! gene.
//!
//! Malformed lines are skipped, never fatal.

use std::{
    io::Read,
    path::{Path, PathBuf},
};

use enum_map::EnumMap;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thousands::Separable;

use super::knowledge::{self, Gene};

/// Minimal number of columns for a record with one sample.
const MIN_SAMPLE_COLUMNS: usize = 10;
/// Minimal number of columns for a record with an `INFO` column.
const MIN_INFO_COLUMNS: usize = 8;
/// Maximal number of star alleles kept per gene.
const MAX_STAR_ALLELES: usize = 2;

/// Selection of the record layout to assume.
#[derive(
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Clone,
    Copy,
    Debug,
    Default,
    clap::ValueEnum,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ParseMode {
    /// Detect the layout from the file contents.
    #[default]
    Auto,
    /// Resolve `FORMAT/GT` of the first sample to bases.
    Genotype,
    /// Collect `INFO/STAR` alleles per `INFO/GENE`.
    StarAllele,
}

/// One observed variant, keyed by its identifier.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, derive_new::new)]
pub struct VariantObservation {
    /// Variant identifier, e.g., `rs4244285`.
    pub id: String,
    /// Observed call, bases for genotype records and the star allele otherwise.
    pub genotype: String,
}

/// Genotype calls from the sample-genotype layout, in order of first appearance.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, Default)]
pub struct GenotypeCalls {
    calls: IndexMap<String, String>,
}

impl GenotypeCalls {
    /// Record the genotype for `id`; a repeated `id` keeps its position and takes the new value.
    pub fn insert(&mut self, id: String, genotype: String) {
        self.calls.insert(id, genotype);
    }

    /// Whether a call was made for the variant `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.calls.contains_key(id)
    }

    /// The genotype call for `id`, if any.
    pub fn get(&self, id: &str) -> Option<&str> {
        self.calls.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Iterate over `(id, genotype)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.calls.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Star alleles from the star-allele layout.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, Default)]
pub struct StarAlleleCalls {
    /// Up to two star alleles per gene, in file order.
    alleles: EnumMap<Gene, Vec<String>>,
    /// One observation per kept star allele.
    observations: Vec<VariantObservation>,
}

impl StarAlleleCalls {
    /// Add a star allele for `gene`; returns `false` if the gene already has two.
    pub fn push(&mut self, gene: Gene, star: &str, variant_id: &str) -> bool {
        if self.alleles[gene].len() >= MAX_STAR_ALLELES {
            return false;
        }
        self.alleles[gene].push(star.to_string());
        let id = if variant_id.is_empty() || variant_id == "." {
            format!("{}:{}", gene, star)
        } else {
            variant_id.to_string()
        };
        self.observations
            .push(VariantObservation::new(id, star.to_string()));
        true
    }

    /// The star alleles called for `gene`.
    pub fn alleles(&self, gene: Gene) -> &[String] {
        &self.alleles[gene]
    }

    /// Diplotype string for `gene`; a single allele is paired with `*1`.
    pub fn diplotype(&self, gene: Gene) -> String {
        match self.alleles[gene].as_slice() {
            [] => String::from("Unknown"),
            [single] => format!("{}/*1", single),
            [first, second, ..] => format!("{}/{}", first, second),
        }
    }

    pub fn observations(&self) -> &[VariantObservation] {
        &self.observations
    }
}

/// Result of parsing one variant file.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug)]
pub enum ParsedVariants {
    /// Parsed in sample-genotype layout.
    Genotypes(GenotypeCalls),
    /// Parsed in star-allele layout.
    StarAlleles(StarAlleleCalls),
}

impl Default for ParsedVariants {
    fn default() -> Self {
        ParsedVariants::Genotypes(GenotypeCalls::default())
    }
}

impl ParsedVariants {
    /// Project all observations to `(id, genotype)` records.
    pub fn observations(&self) -> Vec<VariantObservation> {
        match self {
            ParsedVariants::Genotypes(calls) => calls
                .iter()
                .map(|(id, gt)| VariantObservation::new(id.to_string(), gt.to_string()))
                .collect(),
            ParsedVariants::StarAlleles(calls) => calls.observations().to_vec(),
        }
    }

    /// Number of observations.
    pub fn variant_count(&self) -> usize {
        match self {
            ParsedVariants::Genotypes(calls) => calls.len(),
            ParsedVariants::StarAlleles(calls) => calls.observations().len(),
        }
    }

    /// Diplotype for `gene` when parsed from star alleles.
    pub fn diplotype(&self, gene: Gene) -> Option<String> {
        match self {
            ParsedVariants::Genotypes(_) => None,
            ParsedVariants::StarAlleles(calls) => Some(calls.diplotype(gene)),
        }
    }
}

/// Error type for parsing variant files from paths.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("variant file not found: {0:?}")]
    FileNotFound(PathBuf),
    #[error("could not read variant file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Reason for skipping a single record line.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LineError {
    #[error("expected at least {expected} columns but found {actual}")]
    TooFewColumns { expected: usize, actual: usize },
    #[error("missing variant ID")]
    MissingId,
    #[error("no GT key in FORMAT {0:?}")]
    MissingGtKey(String),
    #[error("no GT value in sample {0:?}")]
    MissingGtValue(String),
    #[error("no-call in genotype {0:?}")]
    NoCall(String),
    #[error("invalid allele index {0:?}")]
    InvalidAlleleIndex(String),
    #[error("allele index {index} out of range for {count} alleles")]
    AlleleIndexOutOfRange { index: usize, count: usize },
    #[error("expected two alleles in genotype {0:?}")]
    NotDiploid(String),
    #[error("no target gene and star allele in INFO")]
    NoStarAllele,
}

/// Line counters, logged after parsing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct ParseStats {
    lines: usize,
    comments: usize,
    skipped: usize,
    kept: usize,
}

impl ParseStats {
    fn log(&self, layout: &str) {
        tracing::debug!(
            "parsed {} lines in {} layout: {} comments, {} skipped, {} kept",
            self.lines.separate_with_commas(),
            layout,
            self.comments.separate_with_commas(),
            self.skipped.separate_with_commas(),
            self.kept.separate_with_commas(),
        );
    }
}

/// Iterate over data lines, counting comment and blank lines in `stats`.
fn data_lines<'a>(
    text: &'a str,
    stats: &'a mut ParseStats,
) -> impl Iterator<Item = &'a str> + 'a {
    text.lines().filter_map(move |line| {
        stats.lines += 1;
        let line = line.trim();
        if line.starts_with('#') || line.is_empty() {
            stats.comments += 1;
            None
        } else {
            Some(line)
        }
    })
}

/// Resolve the first sample's `GT` of one record line to `(id, bases)`.
///
/// The bases are the two called alleles concatenated, so SNVs give two
/// characters while indel alleles give longer strings (e.g. `ATA`).  A
/// missing `ALT` (`.`) contributes no allele.
pub fn parse_genotype_line(line: &str) -> Result<(String, String), LineError> {
    let columns = line.split('\t').collect::<Vec<_>>();
    if columns.len() < MIN_SAMPLE_COLUMNS {
        return Err(LineError::TooFewColumns {
            expected: MIN_SAMPLE_COLUMNS,
            actual: columns.len(),
        });
    }
    let id = columns[2];
    if id.is_empty() || id == "." {
        return Err(LineError::MissingId);
    }
    let ref_allele = columns[3];
    let alt_alleles = columns[4];
    let format = columns[8];
    let sample = columns[9];

    let gt_idx = format
        .split(':')
        .position(|key| key == "GT")
        .ok_or_else(|| LineError::MissingGtKey(format.to_string()))?;
    let gt = sample
        .split(':')
        .nth(gt_idx)
        .ok_or_else(|| LineError::MissingGtValue(sample.to_string()))?;

    let alleles = std::iter::once(ref_allele)
        .chain(alt_alleles.split(',').filter(|alt| *alt != "."))
        .collect::<Vec<_>>();
    let bases = gt
        .split(|c| c == '/' || c == '|')
        .map(|token| {
            if token == "." {
                return Err(LineError::NoCall(gt.to_string()));
            }
            let index = token
                .parse::<usize>()
                .map_err(|_| LineError::InvalidAlleleIndex(token.to_string()))?;
            alleles
                .get(index)
                .copied()
                .ok_or(LineError::AlleleIndexOutOfRange {
                    index,
                    count: alleles.len(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    match bases.as_slice() {
        [first, second] => Ok((id.to_string(), format!("{}{}", first, second))),
        _ => Err(LineError::NotDiploid(gt.to_string())),
    }
}

/// Parse sample-genotype layout text.
pub fn parse_genotypes(text: &str) -> GenotypeCalls {
    let mut stats = ParseStats::default();
    let mut calls = GenotypeCalls::default();
    let mut skipped = 0;
    for line in data_lines(text, &mut stats) {
        match parse_genotype_line(line) {
            Ok((id, genotype)) => calls.insert(id, genotype),
            Err(e) => {
                tracing::trace!("skipping line {:?}: {}", line, e);
                skipped += 1;
            }
        }
    }
    stats.skipped = skipped;
    stats.kept = calls.len();
    stats.log("genotype");
    calls
}

/// Parse the `INFO` column into `key=value` pairs; flags without value are ignored.
pub fn parse_info(info: &str) -> IndexMap<&str, &str> {
    info.split(';')
        .filter_map(|part| part.split_once('='))
        .collect()
}

/// Extract `(variant id, gene, star allele)` from one record line.
pub fn parse_star_allele_line(line: &str) -> Result<(&str, Gene, &str), LineError> {
    let columns = line.split('\t').collect::<Vec<_>>();
    if columns.len() < MIN_INFO_COLUMNS {
        return Err(LineError::TooFewColumns {
            expected: MIN_INFO_COLUMNS,
            actual: columns.len(),
        });
    }
    let info = parse_info(columns[7]);
    let gene = info.get("GENE").and_then(|symbol| knowledge::target_gene(symbol));
    let star = info.get("STAR").filter(|star| !star.is_empty());
    match (gene, star) {
        (Some(gene), Some(star)) => Ok((columns[2], gene, *star)),
        _ => Err(LineError::NoStarAllele),
    }
}

/// Parse star-allele layout text.
pub fn parse_star_alleles(text: &str) -> StarAlleleCalls {
    let mut stats = ParseStats::default();
    let mut calls = StarAlleleCalls::default();
    let mut skipped = 0;
    for line in data_lines(text, &mut stats) {
        match parse_star_allele_line(line) {
            Ok((id, gene, star)) => {
                if !calls.push(gene, star, id) {
                    tracing::trace!("ignoring extra star allele {} for {}", star, gene);
                }
            }
            Err(e) => {
                tracing::trace!("skipping line {:?}: {}", line, e);
                skipped += 1;
            }
        }
    }
    stats.skipped = skipped;
    stats.kept = calls.observations().len();
    stats.log("star-allele");
    calls
}

/// Non-comment, non-blank lines of `text`.
fn record_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.starts_with('#') && !line.is_empty())
}

/// Whether any record line carries a target gene and star allele in `INFO`.
pub fn looks_like_star_alleles(text: &str) -> bool {
    record_lines(text).any(|line| parse_star_allele_line(line).is_ok())
}

/// Parse text in the given layout, detecting the layout for `ParseMode::Auto`.
pub fn parse_text(text: &str, mode: ParseMode) -> ParsedVariants {
    let mode = match mode {
        ParseMode::Auto if looks_like_star_alleles(text) => {
            let ignored = record_lines(text)
                .filter(|line| parse_star_allele_line(line).is_err())
                .count();
            if ignored > 0 {
                tracing::debug!(
                    "detected star-allele layout, ignoring {} record(s) without star allele",
                    ignored.separate_with_commas()
                );
            }
            ParseMode::StarAllele
        }
        ParseMode::Auto => ParseMode::Genotype,
        mode => mode,
    };
    tracing::debug!("parsing variants in {} layout", mode);
    match mode {
        ParseMode::StarAllele => ParsedVariants::StarAlleles(parse_star_alleles(text)),
        _ => ParsedVariants::Genotypes(parse_genotypes(text)),
    }
}

/// Parse raw file bytes; invalid UTF-8 is replaced rather than rejected.
pub fn parse_bytes(bytes: &[u8], mode: ParseMode) -> ParsedVariants {
    parse_text(&String::from_utf8_lossy(bytes), mode)
}

/// Read and parse the (possibly gzip-compressed) file at `path`.
pub fn parse_path<P>(path: P, mode: ParseMode) -> Result<ParsedVariants, Error>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }
    let io_error = |source: std::io::Error| {
        if source.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound(path.to_path_buf())
        } else {
            Error::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    };

    let mut reader = crate::common::open_read_maybe_gz(path).map_err(io_error)?;
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes).map_err(io_error)?;
    tracing::debug!(
        "read {} bytes from {:?}",
        bytes.len().separate_with_commas(),
        path
    );

    Ok(parse_bytes(&bytes, mode))
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    const HEADER: &str = "##fileformat=VCFv4.2\n#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tSAMPLE\n";

    fn record(id: &str, ref_allele: &str, alt: &str, format: &str, sample: &str) -> String {
        format!("chr1\t100\t{id}\t{ref_allele}\t{alt}\t.\tPASS\t.\t{format}\t{sample}\n")
    }

    #[test]
    fn single_het_call() {
        let text = record("rs1", "A", "G", "GT", "0/1");
        let calls = parse_genotypes(&text);

        assert_eq!(calls.len(), 1);
        assert_eq!(calls.get("rs1"), Some("AG"));
    }

    #[rstest::rstest]
    #[case::unphased("0/1", "AG")]
    #[case::phased("1|0", "GA")]
    #[case::hom_ref("0/0", "AA")]
    #[case::hom_alt("1/1", "GG")]
    fn resolve_genotype(#[case] gt: &str, #[case] expected: &str) {
        let line = record("rs1", "A", "G", "GT", gt);
        let (id, genotype) = parse_genotype_line(line.trim()).unwrap();

        assert_eq!(id, "rs1");
        assert_eq!(genotype, expected);
        assert_eq!(genotype.len(), 2);
    }

    #[rstest::rstest]
    #[case::deletion("AT", "A", "0/1", "ATA")]
    #[case::insertion("C", "CTT", "1/1", "CTTCTT")]
    #[case::missing_alt_hom_ref("A", ".", "0/0", "AA")]
    fn resolve_non_snv_genotype(
        #[case] ref_allele: &str,
        #[case] alt: &str,
        #[case] gt: &str,
        #[case] expected: &str,
    ) {
        let line = record("rs1", ref_allele, alt, "GT", gt);
        assert_eq!(
            parse_genotype_line(line.trim()),
            Ok((String::from("rs1"), expected.to_string()))
        );
    }

    #[test]
    fn multi_allelic_and_gt_not_first() {
        let line = record("rs7", "C", "T,G", "DP:GT:GQ", "12:2|1:99");
        assert_eq!(
            parse_genotype_line(line.trim()),
            Ok((String::from("rs7"), String::from("GT")))
        );
    }

    #[rstest::rstest]
    #[case::no_call(record("rs1", "A", "G", "GT", "./1"), LineError::NoCall(String::from("./1")))]
    #[case::out_of_range(
        record("rs1", "A", "G", "GT", "0/2"),
        LineError::AlleleIndexOutOfRange { index: 2, count: 2 }
    )]
    #[case::haploid(record("rs1", "A", "G", "GT", "1"), LineError::NotDiploid(String::from("1")))]
    #[case::triploid(
        record("rs1", "A", "G", "GT", "0/1/1"),
        LineError::NotDiploid(String::from("0/1/1"))
    )]
    #[case::no_gt_key(
        record("rs1", "A", "G", "DP:GQ", "10:20"),
        LineError::MissingGtKey(String::from("DP:GQ"))
    )]
    #[case::no_gt_value(
        record("rs1", "A", "G", "DP:GT", "10"),
        LineError::MissingGtValue(String::from("10"))
    )]
    #[case::bad_index(
        record("rs1", "A", "G", "GT", "0/x"),
        LineError::InvalidAlleleIndex(String::from("x"))
    )]
    #[case::no_id(record(".", "A", "G", "GT", "0/1"), LineError::MissingId)]
    #[case::missing_alt(
        record("rs9", "A", ".", "GT", "0/1"),
        LineError::AlleleIndexOutOfRange { index: 1, count: 1 }
    )]
    #[case::truncated(
        String::from("chr1\t100\trs1\tA\tG"),
        LineError::TooFewColumns { expected: 10, actual: 5 }
    )]
    fn genotype_line_errors(#[case] line: String, #[case] expected: LineError) {
        assert_eq!(parse_genotype_line(line.trim()), Err(expected));
    }

    #[test]
    fn malformed_lines_do_not_abort() {
        let text = format!(
            "{}{}chr1\t5\trs2\tA\n{}{}",
            HEADER,
            record("rs1", "A", "G", "GT", "0/1"),
            record("rs3", "C", "T", "GT", "./."),
            record("rs4", "C", "T", "GT:DP", "1/1:30"),
        );
        let calls = parse_genotypes(&text);

        assert_eq!(
            calls.iter().collect::<Vec<_>>(),
            vec![("rs1", "AG"), ("rs4", "TT")]
        );
    }

    #[test]
    fn repeated_id_keeps_position_takes_last_value() {
        let text = format!(
            "{}{}{}",
            record("rs1", "A", "G", "GT", "0/1"),
            record("rs2", "C", "T", "GT", "0/1"),
            record("rs1", "A", "G", "GT", "1/1"),
        );
        let calls = parse_genotypes(&text);

        assert_eq!(
            calls.iter().collect::<Vec<_>>(),
            vec![("rs1", "GG"), ("rs2", "CT")]
        );
    }

    #[rstest::rstest]
    #[case::empty("")]
    #[case::comments_only(HEADER)]
    #[case::blank_lines("\n\n\r\n")]
    fn empty_inputs(#[case] text: &str) {
        for mode in [ParseMode::Auto, ParseMode::Genotype, ParseMode::StarAllele] {
            let parsed = parse_text(text, mode);
            assert_eq!(parsed.variant_count(), 0);
            assert!(parsed.observations().is_empty());
        }
    }

    #[test]
    fn crlf_line_endings() {
        let text = "chr1\t100\trs1\tA\tG\t.\tPASS\t.\tGT\t0/1\r\n";
        assert_eq!(parse_genotypes(text).get("rs1"), Some("AG"));
    }

    #[test]
    fn invalid_utf8_is_tolerated() {
        let mut bytes = b"##comment \xff\xfe\n".to_vec();
        bytes.extend_from_slice(record("rs1", "A", "G", "GT", "0/1").as_bytes());
        let parsed = parse_bytes(&bytes, ParseMode::Genotype);

        assert_eq!(
            parsed.observations(),
            vec![VariantObservation::new(
                String::from("rs1"),
                String::from("AG")
            )]
        );
    }

    #[test]
    fn parsing_is_idempotent() -> Result<(), anyhow::Error> {
        let bytes = std::fs::read("tests/pgx/genotypes.vcf")?;
        let first = parse_bytes(&bytes, ParseMode::Genotype);
        let second = parse_bytes(&bytes, ParseMode::Genotype);

        assert_eq!(first, second);

        Ok(())
    }

    #[test]
    fn parse_info_pairs() {
        let info = parse_info("GENE=CYP2C19;STAR=*2;DB;AF=0.1=x");
        assert_eq!(
            info.into_iter().collect::<Vec<_>>(),
            vec![("GENE", "CYP2C19"), ("STAR", "*2"), ("AF", "0.1=x")]
        );
    }

    #[test]
    fn star_alleles_capped_and_diplotypes() {
        let text = "\
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO
10\t1\trs4244285\tG\tA\t.\tPASS\tGENE=CYP2C19;STAR=*2
10\t2\trs12248560\tC\tT\t.\tPASS\tGENE=CYP2C19;STAR=*17
10\t3\trs4986893\tG\tA\t.\tPASS\tGENE=CYP2C19;STAR=*3
22\t4\t.\tC\tT\t.\tPASS\tGENE=CYP2D6;STAR=*4
1\t5\trs1\tC\tT\t.\tPASS\tGENE=VKORC1;STAR=*2
1\t6\trs2\tC\tT\t.\tPASS\tGENE=TPMT
1\t7\trs3\tC\tT
";
        let calls = parse_star_alleles(text);

        assert_eq!(calls.alleles(Gene::Cyp2c19), &["*2", "*17"]);
        assert_eq!(calls.alleles(Gene::Cyp2d6), &["*4"]);
        assert!(calls.alleles(Gene::Tpmt).is_empty());
        assert_eq!(calls.diplotype(Gene::Cyp2c19), "*2/*17");
        assert_eq!(calls.diplotype(Gene::Cyp2d6), "*4/*1");
        assert_eq!(calls.diplotype(Gene::Dpyd), "Unknown");
        assert_eq!(
            calls.observations(),
            &[
                VariantObservation::new(String::from("rs4244285"), String::from("*2")),
                VariantObservation::new(String::from("rs12248560"), String::from("*17")),
                VariantObservation::new(String::from("CYP2D6:*4"), String::from("*4")),
            ]
        );
    }

    #[rstest::rstest]
    #[case::star_file("tests/pgx/star_alleles.vcf", true)]
    #[case::genotype_file("tests/pgx/genotypes.vcf", false)]
    fn auto_detection(#[case] path: &str, #[case] is_star: bool) -> Result<(), anyhow::Error> {
        let parsed = parse_path(path, ParseMode::Auto)?;
        assert_eq!(matches!(parsed, ParsedVariants::StarAlleles(_)), is_star);
        assert_eq!(parsed.diplotype(Gene::Cyp2c19).is_some(), is_star);

        Ok(())
    }

    #[test]
    fn parse_path_genotypes_snapshot() -> Result<(), anyhow::Error> {
        let parsed = parse_path("tests/pgx/genotypes.vcf", ParseMode::Genotype)?;
        let calls = parsed
            .observations()
            .into_iter()
            .map(|obs| format!("{}={}", obs.id, obs.genotype))
            .collect::<Vec<_>>();

        insta::assert_debug_snapshot!(calls, @r###"
        [
            "rs3892097=CT",
            "rs1057910=AA",
            "rs1799853=CT",
        ]
        "###);

        Ok(())
    }

    #[tracing_test::traced_test]
    #[test]
    fn auto_star_layout_reports_ignored_records() {
        let text = format!(
            "10\t1\trs4244285\tG\tA\t.\tPASS\tGENE=CYP2C19;STAR=*2\n{}",
            record("rs3892097", "C", "T", "GT", "0/1"),
        );
        let parsed = parse_text(&text, ParseMode::Auto);

        assert_eq!(
            parsed.observations(),
            vec![VariantObservation::new(
                String::from("rs4244285"),
                String::from("*2")
            )]
        );
        assert!(logs_contain("ignoring 1 record(s) without star allele"));
    }

    #[test]
    fn parse_path_missing_file() {
        let res = parse_path("tests/pgx/does-not-exist.vcf", ParseMode::Auto);
        assert!(matches!(res, Err(Error::FileNotFound(_))));
    }

    #[test]
    fn parse_mode_names() {
        assert_eq!(ParseMode::StarAllele.to_string(), "star-allele");
        assert_eq!("genotype".parse::<ParseMode>().ok(), Some(ParseMode::Genotype));
        assert_eq!(ParseMode::default(), ParseMode::Auto);
    }
}
