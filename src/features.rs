// src/features.rs

use crate::types::{FeatureRecord, QuartileStats, SequenceFeatures};

/// Raw A/T/C/G tallies over a slice of uppercase bases.
/// Any other symbol is ignored here but still counts toward the slice length.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BaseCounts {
    pub a: usize,
    pub t: usize,
    pub c: usize,
    pub g: usize,
}

impl BaseCounts {
    pub fn tally(bases: &[u8]) -> Self {
        let mut counts = BaseCounts::default();
        for &b in bases {
            match b {
                b'A' => counts.a += 1,
                b'T' => counts.t += 1,
                b'C' => counts.c += 1,
                b'G' => counts.g += 1,
                _ => {}
            }
        }
        counts
    }

    /// `[A, T, C, G]` as fractions of `length`; all zero when `length == 0`.
    pub fn fractions(&self, length: usize) -> [f64; 4] {
        if length == 0 {
            return [0.0; 4];
        }
        let len = length as f64;
        [
            self.a as f64 / len,
            self.t as f64 / len,
            self.c as f64 / len,
            self.g as f64 / len,
        ]
    }
}

/// Shannon entropy in bits. The frequencies are rescaled to sum to 1 first;
/// zero probabilities contribute nothing and an all-zero input gives 0.
pub fn shannon_entropy(freqs: &[f64]) -> f64 {
    let total: f64 = freqs.iter().sum();
    if total <= 0.0 {
        return 0.0;
    }
    freqs
        .iter()
        .map(|&p| p / total)
        .filter(|&p| p > 0.0)
        .fold(0.0, |acc, p| acc - p * p.log2())
}

/// Half-open `[start, end)` bounds of the four quartiles of a sequence.
/// Uses floor division, so the last quartile absorbs any remainder.
pub fn quartile_bounds(length: usize) -> [(usize, usize); 4] {
    let mut bounds = [(0, 0); 4];
    for (i, b) in bounds.iter_mut().enumerate() {
        *b = (i * length / 4, (i + 1) * length / 4);
    }
    bounds
}

fn quartile_stats(slice: &[u8]) -> QuartileStats {
    let length = slice.len();
    if length == 0 {
        return QuartileStats::default();
    }
    let counts = BaseCounts::tally(slice);
    let [a, t, c, g] = counts.fractions(length);
    QuartileStats {
        length,
        percent_a: a,
        percent_t: t,
        percent_c: c,
        percent_g: g,
        gc_content: (counts.g + counts.c) as f64 / length as f64,
    }
}

/// Turns a nucleotide sequence into its composition feature record.
///
/// The sequence is uppercased first. An empty sequence yields an empty record.
pub fn calculate_features(seq: &str) -> FeatureRecord {
    let seq = seq.to_ascii_uppercase();
    let bases = seq.as_bytes();
    let length = bases.len();

    if length == 0 {
        return FeatureRecord::empty();
    }

    let counts = BaseCounts::tally(bases);
    let freqs = counts.fractions(length);
    let [a, t, c, g] = freqs;

    let mut quartiles = [QuartileStats::default(); 4];
    for (q, (start, end)) in quartiles.iter_mut().zip(quartile_bounds(length)) {
        *q = quartile_stats(&bases[start..end]);
    }

    FeatureRecord::from_features(SequenceFeatures {
        percent_a: a,
        percent_t: t,
        percent_c: c,
        percent_g: g,
        gc_content: g + c,
        shannon_entropy: shannon_entropy(&freqs),
        length,
        quartiles,
    })
}
