//! FASTA input and output using noodles.
//!
//! Reading yields one [`SequenceRecord`] per sequence: the first word of the
//! definition line, the full length, and a leading sample of the bases for GC
//! estimation (or the whole sequence when no limit is given).
//!
//! Supported inputs:
//! - `.fa`, `.fasta`, `.fna` (uncompressed)
//! - `.gz`, `.bgz` (gzip or bgzip, decoded as multi-member gzip)
//! - `-` for standard input

use std::ffi::OsStr;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use noodles::fasta;

use crate::core::types::SequenceRecord;
use crate::parsing::ParseError;

/// Default number of leading bases kept per record for GC estimation
pub const DEFAULT_SAMPLE_LIMIT: usize = 10_000;

/// Check if the path has a FASTA extension (optionally gzip/bgzip compressed)
pub fn is_fasta_file(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    let stem = path_str
        .strip_suffix(".gz")
        .or_else(|| path_str.strip_suffix(".bgz"))
        .unwrap_or(&path_str);

    matches!(
        Path::new(stem).extension().and_then(OsStr::to_str),
        Some("fa" | "fasta" | "fna")
    )
}

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

fn open_input(path: &Path) -> Result<Box<dyn BufRead>, ParseError> {
    if path == Path::new("-") {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }

    let file = File::open(path)?;
    if is_gzipped(path) {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Parse a FASTA file into sequence records.
///
/// `sample_limit` caps the number of bases kept in each record's sample;
/// `None` keeps full sequences (needed for extraction and telomere scans).
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, `ParseError::Noodles` if
/// parsing fails, or `ParseError::InvalidFormat` if no sequences are found.
pub fn parse_fasta_file(
    path: &Path,
    sample_limit: Option<usize>,
) -> Result<Vec<SequenceRecord>, ParseError> {
    let reader = open_input(path)?;
    parse_fasta_reader(reader, sample_limit)
}

/// Parse FASTA records from any buffered reader
///
/// # Errors
///
/// Returns `ParseError::Noodles` if parsing fails or `ParseError::InvalidFormat`
/// if no sequences are found.
pub fn parse_fasta_reader<R: BufRead>(
    reader: R,
    sample_limit: Option<usize>,
) -> Result<Vec<SequenceRecord>, ParseError> {
    let mut fasta_reader = fasta::io::Reader::new(reader);
    let mut records = Vec::new();

    for result in fasta_reader.records() {
        let record = result
            .map_err(|e| ParseError::Noodles(format!("Failed to parse FASTA record: {e}")))?;

        let name = String::from_utf8_lossy(record.name()).to_string();
        let bases = record.sequence().as_ref();
        let sample = match sample_limit {
            Some(limit) => &bases[..bases.len().min(limit)],
            None => bases,
        };

        records.push(SequenceRecord::new(
            name,
            bases.len() as u64,
            String::from_utf8_lossy(sample).into_owned(),
        ));
    }

    if records.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No sequences found in FASTA file".to_string(),
        ));
    }

    Ok(records)
}

/// Write `(name, sequence)` pairs as FASTA
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be created or written.
pub fn write_fasta<'s, I>(path: &Path, sequences: I) -> Result<usize, ParseError>
where
    I: IntoIterator<Item = (&'s str, &'s str)>,
{
    let file = File::create(path)?;
    let mut writer = fasta::io::Writer::new(BufWriter::new(file));
    let mut written = 0;

    for (name, sequence) in sequences {
        let definition = fasta::record::Definition::new(name, None);
        let sequence = fasta::record::Sequence::from(sequence.as_bytes().to_vec());
        writer.write_record(&fasta::Record::new(definition, sequence))?;
        written += 1;
    }

    writer.get_mut().flush()?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use tempfile::NamedTempFile;

    #[test]
    fn test_is_fasta_file() {
        assert!(is_fasta_file(Path::new("test.fa")));
        assert!(is_fasta_file(Path::new("test.fasta")));
        assert!(is_fasta_file(Path::new("test.fna")));
        assert!(is_fasta_file(Path::new("test.fa.gz")));
        assert!(is_fasta_file(Path::new("test.fasta.gz")));
        assert!(is_fasta_file(Path::new("test.fna.bgz")));
        assert!(is_fasta_file(Path::new("/path/to/Assembly.FA")));

        assert!(!is_fasta_file(Path::new("test.bam")));
        assert!(!is_fasta_file(Path::new("test.txt.gz")));
        assert!(!is_fasta_file(Path::new("test.fai")));
    }

    #[test]
    fn test_parse_fasta_file() {
        let mut temp = NamedTempFile::with_suffix(".fa").unwrap();
        temp.write_all(b">chr1 description\nACGTACGT\nACGT\n>ctg2\nGGGG\n").unwrap();
        temp.flush().unwrap();

        let records = parse_fasta_file(temp.path(), Some(DEFAULT_SAMPLE_LIMIT)).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "chr1");
        assert_eq!(records[0].length, 12);
        assert_eq!(records[0].sequence_sample, "ACGTACGTACGT");
        assert_eq!(records[1].name, "ctg2");
        assert_eq!(records[1].length, 4);
    }

    #[test]
    fn test_sample_limit() {
        let data = b">s1\nAAAACCCCGGGG\n>s2\nTT\n";

        let records = parse_fasta_reader(&data[..], Some(5)).unwrap();
        assert_eq!(records[0].length, 12);
        assert_eq!(records[0].sequence_sample, "AAAAC");
        assert_eq!(records[1].sequence_sample, "TT");

        let records = parse_fasta_reader(&data[..], None).unwrap();
        assert_eq!(records[0].sequence_sample, "AAAACCCCGGGG");
    }

    #[test]
    fn test_parse_gzipped() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b">scaffold_1\nACGTNNNN\n").unwrap();
        let compressed = encoder.finish().unwrap();

        let mut temp = NamedTempFile::with_suffix(".fa.gz").unwrap();
        temp.write_all(&compressed).unwrap();
        temp.flush().unwrap();

        let records = parse_fasta_file(temp.path(), None).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "scaffold_1");
        assert_eq!(records[0].length, 8);
    }

    #[test]
    fn test_parse_multi_member_gzip() {
        let mut data = Vec::new();
        for chunk in [&b">a\nAC\n"[..], &b">b\nGT\n"[..]] {
            let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(chunk).unwrap();
            data.extend(encoder.finish().unwrap());
        }

        let mut temp = NamedTempFile::with_suffix(".fa.bgz").unwrap();
        temp.write_all(&data).unwrap();
        temp.flush().unwrap();

        let records = parse_fasta_file(temp.path(), None).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].name, "b");
    }

    #[test]
    fn test_parse_empty_fasta() {
        let result = parse_fasta_reader(&b""[..], None);
        assert!(matches!(result, Err(ParseError::InvalidFormat(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = parse_fasta_file(Path::new("/nonexistent/assembly.fa"), None);
        assert!(matches!(result, Err(ParseError::Io(_))));
    }

    #[test]
    fn test_write_then_read() {
        let temp = NamedTempFile::with_suffix(".fa").unwrap();
        let written = write_fasta(temp.path(), [("chr1", "ACGT"), ("chr2", "GGCC")]).unwrap();
        assert_eq!(written, 2);

        let records = parse_fasta_file(temp.path(), None).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].name, "chr2");
        assert_eq!(records[1].sequence_sample, "GGCC");
    }
}
