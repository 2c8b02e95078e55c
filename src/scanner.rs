// src/scanner.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, VirfeatError};
use crate::fasta::read_fasta_records;
use crate::features::calculate_features;
use crate::types::FeatureRow;

/// Where to look for sequence files and which ones count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    pub input_dir: PathBuf,
    /// Recognised extensions, without the dot, matched case-insensitively.
    pub extensions: Vec<String>,
    /// Also accept `<name>.<ext>.gz`.
    pub allow_gzip: bool,
}

impl ScanConfig {
    pub fn new<P: Into<PathBuf>>(input_dir: P) -> Self {
        Self {
            input_dir: input_dir.into(),
            extensions: vec!["fa".to_string(), "fasta".to_string()],
            allow_gzip: true,
        }
    }

    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|e| e.as_ref().trim_start_matches('.').to_ascii_lowercase())
            .collect();
        self
    }

    pub fn with_gzip(mut self, allow_gzip: bool) -> Self {
        self.allow_gzip = allow_gzip;
        self
    }

    /// Returns the file stem if `file_name` carries a recognised extension.
    pub fn match_file_name<'a>(&self, file_name: &'a str) -> Option<&'a str> {
        let lower = file_name.to_ascii_lowercase();
        let (base, lower_base) = match lower.strip_suffix(".gz") {
            Some(stripped) if self.allow_gzip => (&file_name[..stripped.len()], stripped),
            _ => (file_name, lower.as_str()),
        };

        self.extensions.iter().find_map(|ext| {
            let suffix_len = ext.len() + 1;
            let matches = lower_base.len() > suffix_len
                && lower_base.ends_with(ext.as_str())
                && lower_base.as_bytes()[lower_base.len() - suffix_len] == b'.';
            matches.then(|| &base[..base.len() - suffix_len])
        })
    }
}

/// Normalises a raw name into the virus-name join key: case-folded,
/// underscores turned into spaces, surrounding whitespace trimmed.
pub fn normalize_virus_name(raw: &str) -> String {
    raw.to_lowercase().replace('_', " ").trim().to_string()
}

/// Derives the virus name from a sequence file path, e.g.
/// `Tomato_Yellow_Leaf_Curl_Virus.fa` -> `tomato yellow leaf curl virus`.
/// Returns `None` if the file extension is not recognised.
pub fn virus_name_from_path(config: &ScanConfig, path: &Path) -> Option<String> {
    let file_name = path.file_name()?.to_str()?;
    config.match_file_name(file_name).map(normalize_virus_name)
}

/// Lists recognised sequence files in the input directory, in enumeration order.
pub fn list_sequence_files(config: &ScanConfig) -> Result<Vec<PathBuf>> {
    let dir = &config.input_dir;
    if !dir.is_dir() {
        return Err(VirfeatError::NotADirectory { path: dir.clone() });
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| VirfeatError::io(dir, e))? {
        let entry = entry.map_err(|e| VirfeatError::io(dir, e))?;
        let path = entry.path();
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            log::debug!("Skipping non UTF-8 file name {}", path.display());
            continue;
        };
        if config.match_file_name(name).is_none() {
            log::debug!("Skipping {} (unrecognised extension)", path.display());
            continue;
        }
        if !path.is_file() {
            log::debug!("Skipping {} (not a regular file)", path.display());
            continue;
        }
        files.push(path);
    }
    Ok(files)
}

/// Featurizes every record of every recognised file in the input directory.
///
/// A malformed file aborts the whole scan.
pub fn scan_directory(config: &ScanConfig) -> Result<Vec<FeatureRow>> {
    let files = list_sequence_files(config)?;
    let mut rows = Vec::new();

    for path in &files {
        let Some(virus_name) = virus_name_from_path(config, path) else {
            continue;
        };
        let records = read_fasta_records(path)?;
        log::debug!(
            "{}: {} record(s) for '{}'",
            path.display(),
            records.len(),
            virus_name
        );

        for record in records {
            let features = calculate_features(&record.seq);
            if features.is_empty() {
                log::warn!(
                    "Empty sequence for accession '{}' in {}",
                    record.id,
                    path.display()
                );
            }
            rows.push(FeatureRow {
                virus_name: virus_name.clone(),
                accession: record.id,
                sequence: record.seq,
                features,
            });
        }
    }

    log::info!(
        "Scanned {} sequence file(s) in {}, {} record(s)",
        files.len(),
        config.input_dir.display(),
        rows.len()
    );
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn write(dir: &Path, name: &str, contents: &str) {
        fs::write(dir.join(name), contents).expect("could not write fixture");
    }

    #[test]
    fn test_virus_name_from_path() {
        let config = ScanConfig::new(".");
        assert_eq!(
            virus_name_from_path(&config, Path::new("genome/Tomato_Yellow_Leaf_Curl_Virus.fa")),
            Some("tomato yellow leaf curl virus".to_string())
        );
        assert_eq!(
            virus_name_from_path(&config, Path::new("_Maize_Streak_Virus_.FASTA.gz")),
            Some("maize streak virus".to_string())
        );
        assert_eq!(virus_name_from_path(&config, Path::new("notes.txt")), None);
        assert_eq!(virus_name_from_path(&config, Path::new("x.fa.fai")), None);
    }

    #[test]
    fn test_match_file_name_respects_config() {
        let config = ScanConfig::new(".").with_extensions([".fna"]).with_gzip(false);
        assert_eq!(config.match_file_name("abc.fna"), Some("abc"));
        assert_eq!(config.match_file_name("abc.fa"), None);
        assert_eq!(config.match_file_name("abc.fna.gz"), None);
        assert_eq!(config.match_file_name(".fna"), None);
        assert_eq!(config.match_file_name("abcfna"), None);
    }

    #[test]
    fn test_scan_directory_rows() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "Tomato_Yellow_Leaf_Curl_Virus.fa",
            ">NC_004005.1 segment A\nAATT\nGGCC\n>NC_004006.1\nACGT\n",
        );
        write(dir.path(), "Maize_streak_virus.fasta", ">NC_001346\naaaa\n");
        write(dir.path(), "readme.txt", "ignore me");
        write(dir.path(), "Tomato_Yellow_Leaf_Curl_Virus.fa.fai", "NC_004005.1\t8\n");

        let rows = scan_directory(&ScanConfig::new(dir.path())).expect("scan failed");
        assert_eq!(rows.len(), 3);

        let keys: HashSet<(String, String)> = rows
            .iter()
            .map(|r| (r.virus_name.clone(), r.accession.clone()))
            .collect();
        let expected: HashSet<(String, String)> = [
            ("tomato yellow leaf curl virus", "NC_004005.1"),
            ("tomato yellow leaf curl virus", "NC_004006.1"),
            ("maize streak virus", "NC_001346"),
        ]
        .iter()
        .map(|(v, a)| (v.to_string(), a.to_string()))
        .collect();
        assert_eq!(keys, expected);

        let first = rows.iter().find(|r| r.accession == "NC_004005.1").unwrap();
        assert_eq!(first.sequence, "AATTGGCC");
        let gc = first.features.features().unwrap().gc_content;
        assert_eq!(gc, 0.5);

        let maize = rows.iter().find(|r| r.accession == "NC_001346").unwrap();
        assert_eq!(maize.sequence, "aaaa");
        assert_eq!(maize.features.features().unwrap().percent_a, 1.0);
    }

    #[test]
    fn test_empty_sequence_row_has_empty_record() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "Bean_golden_mosaic_virus.fa", ">empty_acc\n>full\nGC\n");
        let rows = scan_directory(&ScanConfig::new(dir.path())).unwrap();
        assert_eq!(rows.len(), 2);
        let empty = rows.iter().find(|r| r.accession == "empty_acc").unwrap();
        assert!(empty.features.is_empty());
        assert_eq!(empty.virus_name, "bean golden mosaic virus");
    }

    #[test]
    fn test_malformed_file_aborts_scan() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "good.fa", ">a\nACGT\n");
        write(dir.path(), "bad.fa", "ACGT\n>a\nACGT\n");
        let err = scan_directory(&ScanConfig::new(dir.path())).unwrap_err();
        match err {
            VirfeatError::MalformedFasta { path, .. } => {
                assert!(path.ends_with("bad.fa"));
            }
            other => panic!("expected MalformedFasta, got {other:?}"),
        }
    }

    #[test]
    fn test_directory_named_like_fasta_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("nested.fa")).unwrap();
        write(dir.path(), "real.fa", ">x\nA\n");
        let files = list_sequence_files(&ScanConfig::new(dir.path())).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("real.fa"));
    }

    #[test]
    fn test_missing_directory() {
        let err = scan_directory(&ScanConfig::new("/no/such/genome/dir")).unwrap_err();
        assert!(matches!(err, VirfeatError::NotADirectory { .. }));
    }
}
