//! Format-detecting record decoder.
//!
//! Input is either one JSON array of records or JSONL (one JSON object
//! per line). Detection looks at the first non-whitespace byte: `[`
//! selects the array form, anything else the line form. The array form
//! necessarily buffers the whole document and a malformed one is fatal;
//! the line form is lazy, skipping blank lines, `#` comment lines, and
//! malformed lines (counted, warned about in verbose mode).

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use serde_json::Value;
use thiserror::Error;
use vigil_eval::Record;

/// Errors that make the whole input undecodable.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),
}

enum Source {
    Empty,
    Array(std::vec::IntoIter<Value>),
    Lines {
        reader: Box<dyn BufRead>,
        pending: Option<String>,
    },
}

/// A lazy stream of decoded records. Single-pass, not restartable.
pub struct RecordStream {
    source: Source,
    index: usize,
    skipped: u64,
    verbose: bool,
}

impl RecordStream {
    /// Number of malformed lines skipped so far (JSONL form only).
    pub fn skipped(&self) -> u64 {
        self.skipped
    }
}

/// Open a log file and decode it as a record stream.
pub fn decode_file(path: &Path, verbose: bool) -> Result<RecordStream, DecodeError> {
    let file = File::open(path)?;
    decode_reader(BufReader::new(file), verbose)
}

/// Decode records from any buffered reader (e.g. locked stdin).
pub fn decode_reader<R>(reader: R, verbose: bool) -> Result<RecordStream, DecodeError>
where
    R: BufRead + 'static,
{
    let mut reader: Box<dyn BufRead> = Box::new(reader);

    // Peek past leading whitespace to detect the format.
    let first = loop {
        let mut byte = [0u8; 1];
        if reader.read(&mut byte)? == 0 {
            return Ok(RecordStream {
                source: Source::Empty,
                index: 0,
                skipped: 0,
                verbose,
            });
        }
        if !byte[0].is_ascii_whitespace() {
            break byte[0] as char;
        }
    };

    let source = if first == '[' {
        let mut rest = String::new();
        reader.read_to_string(&mut rest)?;
        let items: Vec<Value> = serde_json::from_str(&format!("[{rest}"))?;
        Source::Array(items.into_iter())
    } else {
        let mut first_line = String::new();
        reader.read_line(&mut first_line)?;
        Source::Lines {
            reader,
            pending: Some(format!("{first}{first_line}")),
        }
    };

    Ok(RecordStream {
        source,
        index: 0,
        skipped: 0,
        verbose,
    })
}

impl Iterator for RecordStream {
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        loop {
            let value = match &mut self.source {
                Source::Empty => return None,
                Source::Array(items) => items.next()?,
                Source::Lines { reader, pending } => {
                    let line = match pending.take() {
                        Some(line) => line,
                        None => {
                            let mut buf = String::new();
                            match reader.read_line(&mut buf) {
                                Ok(0) => return None,
                                Ok(_) => buf,
                                Err(e) => {
                                    self.skipped += 1;
                                    if self.verbose {
                                        eprintln!("warning: skipping unreadable line: {e}");
                                    }
                                    continue;
                                }
                            }
                        }
                    };
                    let trimmed = line.trim();
                    if trimmed.is_empty() || trimmed.starts_with('#') {
                        continue;
                    }
                    match serde_json::from_str::<Value>(trimmed) {
                        Ok(value) => value,
                        Err(e) => {
                            self.skipped += 1;
                            if self.verbose {
                                eprintln!("warning: skipping invalid JSON line: {e}");
                            }
                            continue;
                        }
                    }
                }
            };

            let record = Record::from_value(value, self.index);
            self.index += 1;
            return Some(record);
        }
    }
}
