// src/lib.rs
pub mod error;
pub mod types;
pub mod fasta;
pub mod features;
pub mod scanner;
pub mod table;
pub mod name_match;
pub mod summary;

pub use crate::error::{Result, VirfeatError};
pub use crate::features::calculate_features;
pub use crate::scanner::{scan_directory, ScanConfig};
pub use crate::table::FeatureTable;
pub use crate::types::{FeatureRecord, FeatureRow, FeatureValue, SequenceFeatures};

use crate::summary::{summarize, summary_report_text, VirusSummaryRow};

/// Output of one directory featurization: the feature table, plus the
/// per-virus summary when it was requested.
pub struct FeaturizationResults {
    pub table: FeatureTable,
    pub summary_rows: Option<Vec<VirusSummaryRow>>,
}

impl FeaturizationResults {
    /// Generate the feature table CSV on demand
    pub fn get_features_csv(&self) -> Result<String> {
        self.table.to_csv_string()
    }

    /// Generate the summary report text on demand
    pub fn get_summary_report(&self) -> Option<String> {
        self.summary_rows.as_deref().map(summary_report_text)
    }
}

/// Scan a directory of FASTA files and featurize every record
pub fn featurize_directory(config: &ScanConfig, generate_summary: bool) -> Result<FeaturizationResults> {
    // 1. Featurize every record of every recognised file
    let table = FeatureTable::new(scan_directory(config)?);
    log::info!(
        "Featurized {} record(s) across {} virus(es)",
        table.len(),
        table.virus_names().len()
    );

    let empty = table.empty_rows().count();
    if empty > 0 {
        log::warn!("{} of {} record(s) had an empty sequence", empty, table.len());
    }

    // 2. Aggregate per virus if requested
    let summary_rows = generate_summary.then(|| summarize(&table));

    Ok(FeaturizationResults {
        table,
        summary_rows,
    })
}
