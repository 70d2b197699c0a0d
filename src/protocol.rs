//! Line-oriented merge protocol for transporting a partial aggregate
//! across an address-space boundary.
//!
//! One record per line: an 8-column right-aligned decimal count, a tab,
//! the word, a newline. End-of-stream is the only termination signal; a
//! line that fails to parse is logged and dropped without aborting the
//! decode loop. The decoder rejects a word field containing any
//! whitespace, not just an embedded tab; the encoder never produces one.
//! Records fold with `increment(word, count)`, never overwrite, so
//! merging partial stores is commutative.

use std::io::{self, BufRead, Write};

use thiserror::Error;
use tracing::warn;

use crate::store::{WordRecord, WordStore};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("missing tab-separated word field")]
    MissingField,

    #[error("unparsable count field: {0:?}")]
    BadCount(String),

    #[error("count must be at least 1")]
    ZeroCount,

    #[error("word field is empty or contains whitespace")]
    BadWord,
}

/// Counters for one decoded transport stream.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MergeStats {
    pub records: usize,
    pub malformed: usize,
}

/// Encodes one record as a wire line, `"{:8}\t{}\n"`.
pub fn encode_record(record: &WordRecord) -> String {
    format!("{:8}\t{}\n", record.count, record.word)
}

/// Writes `records` to `out` in wire encoding. Also the final output
/// format, so a worker's transport is itself a valid result listing.
pub fn write_records<W: Write>(out: &mut W, records: &[WordRecord]) -> io::Result<()> {
    for record in records {
        out.write_all(encode_record(record).as_bytes())?;
    }
    Ok(())
}

/// Parses one wire line (without the trailing newline).
pub fn parse_line(line: &str) -> Result<WordRecord, ProtocolError> {
    let (count_field, word) = line.split_once('\t').ok_or(ProtocolError::MissingField)?;
    let count: u64 = count_field
        .trim()
        .parse()
        .map_err(|_| ProtocolError::BadCount(count_field.to_string()))?;
    if count == 0 {
        return Err(ProtocolError::ZeroCount);
    }
    if word.is_empty() || word.contains(|c: char| c.is_whitespace()) {
        return Err(ProtocolError::BadWord);
    }
    Ok(WordRecord::new(word, count))
}

/// Reads `reader` line by line until end-of-stream, folding every
/// well-formed record into `store`. Malformed lines are dropped after a
/// warning; I/O errors on the transport propagate.
pub fn decode_into<R: BufRead>(store: &mut WordStore, reader: R) -> io::Result<MergeStats> {
    let mut stats = MergeStats::default();
    for line in reader.lines() {
        let line = line?;
        match parse_line(&line) {
            Ok(record) => {
                store.increment(&record.word, record.count);
                stats.records += 1;
            }
            Err(err) => {
                warn!("dropping ill-formed merge line {:?}: {}", line, err);
                stats.malformed += 1;
            }
        }
    }
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_count_right_aligned_in_eight_columns() {
        assert_eq!(encode_record(&WordRecord::new("foo", 3)), "       3\tfoo\n");
        assert_eq!(encode_record(&WordRecord::new("big", 123456789)), "123456789\tbig\n");
    }

    #[test]
    fn parses_padded_and_unpadded_counts() {
        assert_eq!(parse_line("       3\tfoo"), Ok(WordRecord::new("foo", 3)));
        assert_eq!(parse_line("3\tfoo"), Ok(WordRecord::new("foo", 3)));
        assert_eq!(parse_line("123456789\tbig"), Ok(WordRecord::new("big", 123456789)));
    }

    #[test]
    fn rejects_lines_missing_the_word_field() {
        assert_eq!(parse_line("       3"), Err(ProtocolError::MissingField));
        assert_eq!(parse_line("       3\t"), Err(ProtocolError::BadWord));
        assert_eq!(parse_line("       3\ta b"), Err(ProtocolError::BadWord));
    }

    #[test]
    fn rejects_bad_counts() {
        assert!(matches!(parse_line("x\tfoo"), Err(ProtocolError::BadCount(_))));
        assert_eq!(parse_line("       0\tfoo"), Err(ProtocolError::ZeroCount));
        assert!(matches!(parse_line("-3\tfoo"), Err(ProtocolError::BadCount(_))));
    }

    #[test]
    fn decode_folds_by_increment_not_overwrite() {
        let mut store = WordStore::new();
        store.increment("foo", 2);
        let stats = decode_into(&mut store, "       3\tfoo\n       1\tbar\n".as_bytes()).unwrap();
        assert_eq!(stats, MergeStats { records: 2, malformed: 0 });
        assert_eq!(store.lookup("foo"), Some(5));
        assert_eq!(store.lookup("bar"), Some(1));
    }

    #[test]
    fn malformed_line_does_not_abort_the_stream() {
        let mut store = WordStore::new();
        let wire = "       3\tfoo\nnot a record\n       2\tbar\n";
        let stats = decode_into(&mut store, wire.as_bytes()).unwrap();
        assert_eq!(stats, MergeStats { records: 2, malformed: 1 });
        assert_eq!(store.lookup("foo"), Some(3));
        assert_eq!(store.lookup("bar"), Some(2));
    }

    #[test]
    fn empty_stream_is_a_clean_zero_record_transport() {
        let mut store = WordStore::new();
        let stats = decode_into(&mut store, "".as_bytes()).unwrap();
        assert_eq!(stats, MergeStats::default());
        assert!(store.is_empty());
    }

    #[test]
    fn merging_partial_stores_commutes() {
        let wires = ["       2\tthe\n       1\tcat\n", "       1\tthe\n       1\tdog\n"];

        let mut forward = WordStore::new();
        decode_into(&mut forward, wires[0].as_bytes()).unwrap();
        decode_into(&mut forward, wires[1].as_bytes()).unwrap();

        let mut reverse = WordStore::new();
        decode_into(&mut reverse, wires[1].as_bytes()).unwrap();
        decode_into(&mut reverse, wires[0].as_bytes()).unwrap();

        let sorted = |store: WordStore| {
            let mut records: Vec<_> = store.into_records().collect();
            records.sort_by(|a, b| a.word.cmp(&b.word));
            records
        };
        assert_eq!(sorted(forward), sorted(reverse));
    }
}
