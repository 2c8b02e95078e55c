// src/table.rs

use std::fs::File;
use std::io::Write;
use std::path::Path;

use ahash::AHashSet;

use crate::error::{Result, VirfeatError};
use crate::types::{FeatureRow, FEATURE_NAMES};

/// Columns appended after the feature columns.
pub static TAG_COLUMNS: [&str; 3] = ["Virus_Name", "Accession", "Sequence"];

/// Full header of the feature table, as the warehouse loader expects it.
pub fn table_columns() -> Vec<&'static str> {
    FEATURE_NAMES.iter().chain(TAG_COLUMNS.iter()).copied().collect()
}

/// All featurized rows of one directory scan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureTable {
    pub rows: Vec<FeatureRow>,
}

impl FeatureTable {
    pub fn new(rows: Vec<FeatureRow>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows whose feature record is empty (sequence had no bases).
    pub fn empty_rows(&self) -> impl Iterator<Item = &FeatureRow> {
        self.rows.iter().filter(|r| r.features.is_empty())
    }

    /// Distinct virus names present in the table.
    pub fn virus_names(&self) -> AHashSet<String> {
        self.rows.iter().map(|r| r.virus_name.clone()).collect()
    }

    /// Writes the table as CSV. Empty feature records leave their feature cells blank.
    pub fn write_csv<W: Write>(&self, writer: W) -> csv::Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(table_columns())?;

        for row in &self.rows {
            let mut cells: Vec<String> = match row.features.features() {
                Some(f) => f.values().iter().map(ToString::to_string).collect(),
                None => vec![String::new(); FEATURE_NAMES.len()],
            };
            cells.push(row.virus_name.clone());
            cells.push(row.accession.clone());
            cells.push(row.sequence.clone());
            wtr.write_record(&cells)?;
        }

        wtr.flush()?;
        Ok(())
    }

    pub fn write_csv_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| VirfeatError::io(path, e))?;
        self.write_csv(file).map_err(|e| VirfeatError::csv(path, e))?;
        log::info!("Wrote {} row(s) to {}", self.rows.len(), path.display());
        Ok(())
    }

    /// Generate the CSV text on demand.
    pub fn to_csv_string(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)
            .map_err(|e| VirfeatError::csv("<memory>", e))?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}
