//! Splits raw text into words by character classification.
//!
//! A word is a maximal run of ASCII alphabetic bytes, lowercased. Runs
//! shorter than two characters are skipped. Bytes are classified directly,
//! so inputs need not be valid UTF-8.

use std::io::BufRead;

const MIN_WORD_LEN: usize = 2;

/// Reads `reader` to end-of-stream, invoking `f` once per word.
pub fn for_each_word<R, F>(mut reader: R, mut f: F) -> std::io::Result<()>
where
    R: BufRead,
    F: FnMut(&str),
{
    let mut word = String::new();
    loop {
        let buf = reader.fill_buf()?;
        if buf.is_empty() {
            break;
        }
        let consumed = buf.len();
        for &byte in buf {
            if byte.is_ascii_alphabetic() {
                word.push(byte.to_ascii_lowercase() as char);
            } else if !word.is_empty() {
                if word.len() >= MIN_WORD_LEN {
                    f(&word);
                }
                word.clear();
            }
        }
        reader.consume(consumed);
    }
    if word.len() >= MIN_WORD_LEN {
        f(&word);
    }
    Ok(())
}
