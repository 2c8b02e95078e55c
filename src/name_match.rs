// src/name_match.rs

use std::fmt;
use std::path::Path;

use ahash::AHashSet;

use crate::error::{Result, VirfeatError};
use crate::scanner::{list_sequence_files, virus_name_from_path, ScanConfig};

/// Default metadata column holding the scraped virus name.
pub const DEFAULT_NAME_COLUMN: &str = "Virus Name";

/// Scraped names are only case-folded and trimmed.
pub fn normalize_metadata_name(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Reads the normalised set of virus names from a metadata CSV.
/// Blank cells are skipped.
pub fn read_metadata_names<P: AsRef<Path>>(csv_path: P, column: &str) -> Result<AHashSet<String>> {
    let path = csv_path.as_ref();
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| VirfeatError::csv(path, e))?;

    let headers = rdr.headers().map_err(|e| VirfeatError::csv(path, e))?;
    let idx = headers
        .iter()
        .position(|h| h.trim() == column)
        .ok_or_else(|| VirfeatError::MissingColumn {
            path: path.to_path_buf(),
            column: column.to_string(),
        })?;

    let mut names = AHashSet::new();
    for result in rdr.records() {
        let record = result.map_err(|e| VirfeatError::csv(path, e))?;
        let Some(raw) = record.get(idx) else {
            continue;
        };
        let name = normalize_metadata_name(raw);
        if !name.is_empty() {
            names.insert(name);
        }
    }
    log::debug!("{} distinct virus name(s) in {}", names.len(), path.display());
    Ok(names)
}

/// Virus names derived from every recognised sequence file in the directory.
pub fn read_fasta_virus_names(config: &ScanConfig) -> Result<AHashSet<String>> {
    let files = list_sequence_files(config)?;
    Ok(files
        .iter()
        .filter_map(|p| virus_name_from_path(config, p))
        .collect())
}

/// Names present on only one side of the metadata / sequence-file join.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameMismatchReport {
    pub metadata_only: Vec<String>,
    pub fasta_only: Vec<String>,
}

impl NameMismatchReport {
    pub fn is_clean(&self) -> bool {
        self.metadata_only.is_empty() && self.fasta_only.is_empty()
    }
}

impl fmt::Display for NameMismatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Viruses in metadata but not in sequence files:")?;
        for name in &self.metadata_only {
            writeln!(f, "{}", name)?;
        }
        writeln!(f)?;
        writeln!(f, "Viruses in sequence files but not in metadata:")?;
        for name in &self.fasta_only {
            writeln!(f, "{}", name)?;
        }
        Ok(())
    }
}

/// Set differences in both directions, sorted. Nothing is corrected.
pub fn compare_virus_names(
    metadata_names: &AHashSet<String>,
    fasta_names: &AHashSet<String>,
) -> NameMismatchReport {
    let mut metadata_only: Vec<String> = metadata_names.difference(fasta_names).cloned().collect();
    let mut fasta_only: Vec<String> = fasta_names.difference(metadata_names).cloned().collect();
    metadata_only.sort();
    fasta_only.sort();
    NameMismatchReport {
        metadata_only,
        fasta_only,
    }
}

/// Loads both name sets and compares them.
pub fn compare_metadata_with_directory<P: AsRef<Path>>(
    csv_path: P,
    column: &str,
    config: &ScanConfig,
) -> Result<NameMismatchReport> {
    let metadata = read_metadata_names(csv_path, column)?;
    let fasta = read_fasta_virus_names(config)?;
    let report = compare_virus_names(&metadata, &fasta);
    if !report.is_clean() {
        log::warn!(
            "{} metadata-only and {} file-only virus name(s)",
            report.metadata_only.len(),
            report.fasta_only.len()
        );
    }
    Ok(report)
}
