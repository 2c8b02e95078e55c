// src/fasta.rs

use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::error::{Result, VirfeatError};
use crate::types::SequenceRecord;

/// Reads every record of a FASTA file, transparently decompressing `.gz`.
///
/// Any line that cannot be read or parsed fails the whole file.
pub fn read_fasta_records<P: AsRef<Path>>(path: P) -> Result<Vec<SequenceRecord>> {
    let path = path.as_ref();
    let f = File::open(path).map_err(|e| VirfeatError::io(path, e))?;

    let is_gz = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("gz"))
        .unwrap_or(false);

    let reader: Box<dyn BufRead> = if is_gz {
        Box::new(BufReader::new(MultiGzDecoder::new(f)))
    } else {
        Box::new(BufReader::new(f))
    };

    parse_fasta(reader, path)
}

/// Parses FASTA text from any buffered reader. `path` is only used in errors.
pub fn parse_fasta<R: BufRead>(mut reader: R, path: &Path) -> Result<Vec<SequenceRecord>> {
    let mut records = Vec::new();
    let mut current: Option<SequenceRecord> = None;
    let mut line = String::new();
    let mut line_no = 0usize;

    loop {
        line.clear();
        let n = reader.read_line(&mut line).map_err(|e| {
            if e.kind() == ErrorKind::InvalidData {
                VirfeatError::MalformedFasta {
                    path: path.to_path_buf(),
                    line: line_no + 1,
                    reason: "invalid UTF-8".to_string(),
                }
            } else {
                VirfeatError::io(path, e)
            }
        })?;
        if n == 0 {
            break; // EOF
        }
        line_no += 1;

        let trimmed = line.trim_end();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(header) = trimmed.strip_prefix('>') {
            if let Some(done) = current.take() {
                records.push(done);
            }
            current = Some(SequenceRecord {
                id: header.split_whitespace().next().unwrap_or("").to_string(),
                header_line: header.to_string(),
                seq: String::new(),
            });
            continue;
        }

        match current.as_mut() {
            Some(record) => record.seq.extend(trimmed.chars().filter(|&c| c != ' ')),
            None => {
                return Err(VirfeatError::MalformedFasta {
                    path: path.to_path_buf(),
                    line: line_no,
                    reason: "sequence data before the first '>' header".to_string(),
                });
            }
        }
    }

    if let Some(done) = current.take() {
        records.push(done);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::{Cursor, Write};

    fn parse(text: &str) -> Result<Vec<SequenceRecord>> {
        parse_fasta(Cursor::new(text.as_bytes()), Path::new("test.fa"))
    }

    #[test]
    fn test_multi_record_wrapped_lines() {
        let records = parse(">NC_001 Tomato yellow leaf curl virus\nACGT\nAC GT\n\n>NC_002\nTTTT\r\nGG\n")
            .expect("parse failed");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "NC_001");
        assert_eq!(records[0].header_line, "NC_001 Tomato yellow leaf curl virus");
        assert_eq!(records[0].seq, "ACGTACGT");
        assert_eq!(records[1].id, "NC_002");
        assert_eq!(records[1].seq, "TTTTGG");
    }

    #[test]
    fn test_header_without_sequence() {
        let records = parse(">empty\n>full\nACGT\n").unwrap();
        assert_eq!(records.len(), 2);
        assert!(records[0].seq.is_empty());
        assert_eq!(records[1].seq, "ACGT");
    }

    #[test]
    fn test_empty_input_has_no_records() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("\n\n").unwrap().is_empty());
    }

    #[test]
    fn test_data_before_header_is_malformed() {
        match parse("ACGT\n>x\nAC\n") {
            Err(VirfeatError::MalformedFasta { line, .. }) => assert_eq!(line, 1),
            other => panic!("expected MalformedFasta, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_utf8_is_malformed() {
        let bytes: &[u8] = b">x\nAC\xff\xfeGT\n";
        let err = parse_fasta(Cursor::new(bytes), Path::new("bad.fa")).unwrap_err();
        assert!(matches!(err, VirfeatError::MalformedFasta { line: 2, .. }));
    }

    #[test]
    fn test_read_gz_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("virus.fa.gz");
        let mut enc = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
        enc.write_all(b">acc1\nAATT\nGGCC\n").unwrap();
        enc.finish().unwrap();

        let records = read_fasta_records(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "acc1");
        assert_eq!(records[0].seq, "AATTGGCC");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = read_fasta_records("/definitely/not/here.fa").unwrap_err();
        assert!(matches!(err, VirfeatError::Io { .. }));
    }
}
