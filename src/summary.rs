// src/summary.rs

use std::fmt::Write as FmtWrite;

use ahash::AHashMap;

use crate::table::FeatureTable;

/// Aggregated composition of all records belonging to one virus.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VirusSummaryRow {
    pub virus_name: String,
    pub records: usize,
    /// Records whose sequence was empty (no features).
    pub empty_records: usize,
    pub total_length: usize,
    /// Means over non-empty records only; 0 when there are none.
    pub mean_gc: f64,
    pub mean_entropy: f64,
}

#[derive(Default)]
struct Accumulator {
    records: usize,
    empty_records: usize,
    total_length: usize,
    gc_sum: f64,
    entropy_sum: f64,
}

/// Groups the table by virus name, sorted by name.
pub fn summarize(table: &FeatureTable) -> Vec<VirusSummaryRow> {
    let mut by_virus: AHashMap<&str, Accumulator> = AHashMap::new();

    for row in &table.rows {
        let acc = by_virus.entry(row.virus_name.as_str()).or_default();
        acc.records += 1;
        match row.features.features() {
            Some(f) => {
                acc.total_length += f.length;
                acc.gc_sum += f.gc_content;
                acc.entropy_sum += f.shannon_entropy;
            }
            None => acc.empty_records += 1,
        }
    }

    let mut rows: Vec<VirusSummaryRow> = by_virus
        .into_iter()
        .map(|(name, acc)| {
            let usable = acc.records - acc.empty_records;
            let mean = |sum: f64| if usable == 0 { 0.0 } else { sum / usable as f64 };
            VirusSummaryRow {
                virus_name: name.to_string(),
                records: acc.records,
                empty_records: acc.empty_records,
                total_length: acc.total_length,
                mean_gc: mean(acc.gc_sum),
                mean_entropy: mean(acc.entropy_sum),
            }
        })
        .collect();
    rows.sort_by(|a, b| a.virus_name.cmp(&b.virus_name));
    rows
}

/// Generate the summary report text on demand.
pub fn summary_report_text(rows: &[VirusSummaryRow]) -> String {
    let mut output = String::new();
    output.push_str("virus\trecords\tempty\ttotal_length\tmean_gc\tmean_entropy\n");
    for row in rows {
        writeln!(
            output,
            "{}\t{}\t{}\t{}\t{:.4}\t{:.4}",
            row.virus_name,
            row.records,
            row.empty_records,
            row.total_length,
            row.mean_gc,
            row.mean_entropy
        )
        .unwrap();
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::calculate_features;
    use crate::types::FeatureRow;

    fn row(virus: &str, seq: &str) -> FeatureRow {
        FeatureRow {
            virus_name: virus.to_string(),
            accession: format!("{virus}-{seq}"),
            sequence: seq.to_string(),
            features: calculate_features(seq),
        }
    }

    #[test]
    fn test_summarize() {
        let table = FeatureTable::new(vec![
            row("maize streak virus", "GGCC"),
            row("bean golden mosaic virus", "AATT"),
            row("maize streak virus", "AATTGGCC"),
            row("maize streak virus", ""),
        ]);
        let rows = summarize(&table);
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].virus_name, "bean golden mosaic virus");
        assert_eq!(rows[0].records, 1);
        assert_eq!(rows[0].mean_gc, 0.0);
        assert_eq!(rows[0].mean_entropy, 1.0);

        let maize = &rows[1];
        assert_eq!(maize.records, 3);
        assert_eq!(maize.empty_records, 1);
        assert_eq!(maize.total_length, 12);
        assert_eq!(maize.mean_gc, 0.75);
        assert_eq!(maize.mean_entropy, 1.5);
    }

    #[test]
    fn test_all_empty_virus_has_zero_means() {
        let rows = summarize(&FeatureTable::new(vec![row("x", "")]));
        assert_eq!(rows[0].records, 1);
        assert_eq!(rows[0].empty_records, 1);
        assert_eq!(rows[0].mean_gc, 0.0);
    }

    #[test]
    fn test_report_text() {
        let rows = summarize(&FeatureTable::new(vec![row("maize streak virus", "AATTGGCC")]));
        let text = summary_report_text(&rows);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "virus\trecords\tempty\ttotal_length\tmean_gc\tmean_entropy");
        assert_eq!(lines[1], "maize streak virus\t1\t0\t8\t0.5000\t2.0000");
    }
}
