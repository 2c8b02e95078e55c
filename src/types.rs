//src/types.rs

use std::fmt;

/// Column names of a feature record, in table order.
pub static FEATURE_NAMES: [&str; 27] = [
    "%A",
    "%T",
    "%C",
    "%G",
    "GC_content",
    "Shannon_entropy",
    "Quartile1_GC",
    "Quartile2_GC",
    "Quartile3_GC",
    "Quartile4_GC",
    "Length",
    "Quartile1_%A",
    "Quartile1_%T",
    "Quartile1_%C",
    "Quartile1_%G",
    "Quartile2_%A",
    "Quartile2_%T",
    "Quartile2_%C",
    "Quartile2_%G",
    "Quartile3_%A",
    "Quartile3_%T",
    "Quartile3_%C",
    "Quartile3_%G",
    "Quartile4_%A",
    "Quartile4_%T",
    "Quartile4_%C",
    "Quartile4_%G",
];

/// One record read from a FASTA file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRecord {
    /// First whitespace-delimited token of the header (the accession).
    pub id: String,
    /// Full header without the leading '>'.
    pub header_line: String,
    pub seq: String,
}

/// A single numeric cell of a feature record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureValue {
    Fraction(f64),
    Count(usize),
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureValue::Fraction(v) => write!(f, "{}", v),
            FeatureValue::Count(n) => write!(f, "{}", n),
        }
    }
}

/// Composition of one contiguous quarter of a sequence.
/// Fractions are relative to the quarter's own length, all zero if it is empty.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct QuartileStats {
    pub length: usize,
    pub percent_a: f64,
    pub percent_t: f64,
    pub percent_c: f64,
    pub percent_g: f64,
    pub gc_content: f64,
}

/// Whole-sequence composition features.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceFeatures {
    pub percent_a: f64,
    pub percent_t: f64,
    pub percent_c: f64,
    pub percent_g: f64,
    pub gc_content: f64,
    pub shannon_entropy: f64,
    pub length: usize,
    pub quartiles: [QuartileStats; 4],
}

impl SequenceFeatures {
    /// All values, aligned with `FEATURE_NAMES`.
    pub fn values(&self) -> [FeatureValue; 27] {
        use FeatureValue::{Count, Fraction};
        let q = &self.quartiles;
        [
            Fraction(self.percent_a),
            Fraction(self.percent_t),
            Fraction(self.percent_c),
            Fraction(self.percent_g),
            Fraction(self.gc_content),
            Fraction(self.shannon_entropy),
            Fraction(q[0].gc_content),
            Fraction(q[1].gc_content),
            Fraction(q[2].gc_content),
            Fraction(q[3].gc_content),
            Count(self.length),
            Fraction(q[0].percent_a),
            Fraction(q[0].percent_t),
            Fraction(q[0].percent_c),
            Fraction(q[0].percent_g),
            Fraction(q[1].percent_a),
            Fraction(q[1].percent_t),
            Fraction(q[1].percent_c),
            Fraction(q[1].percent_g),
            Fraction(q[2].percent_a),
            Fraction(q[2].percent_t),
            Fraction(q[2].percent_c),
            Fraction(q[2].percent_g),
            Fraction(q[3].percent_a),
            Fraction(q[3].percent_t),
            Fraction(q[3].percent_c),
            Fraction(q[3].percent_g),
        ]
    }
}

/// Feature-name -> value mapping for one sequence.
///
/// An empty record (no keys) stands for a sequence with no usable data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureRecord {
    features: Option<SequenceFeatures>,
}

impl FeatureRecord {
    pub fn empty() -> Self {
        Self { features: None }
    }

    pub fn from_features(features: SequenceFeatures) -> Self {
        Self {
            features: Some(features),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_none()
    }

    /// Number of keys: 0 for an empty record, `FEATURE_NAMES.len()` otherwise.
    pub fn len(&self) -> usize {
        if self.features.is_some() {
            FEATURE_NAMES.len()
        } else {
            0
        }
    }

    pub fn features(&self) -> Option<&SequenceFeatures> {
        self.features.as_ref()
    }

    pub fn get(&self, name: &str) -> Option<FeatureValue> {
        let features = self.features.as_ref()?;
        let idx = FEATURE_NAMES.iter().position(|&n| n == name)?;
        Some(features.values()[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, FeatureValue)> + '_ {
        self.features
            .iter()
            .flat_map(|f| FEATURE_NAMES.iter().copied().zip(f.values()))
    }
}

/// One row of the output table: a featurized FASTA record tagged with its virus.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    pub virus_name: String,
    pub accession: String,
    pub sequence: String,
    pub features: FeatureRecord,
}
