//! Flat-file ingestion.
//!
//! Catalog files are comma-delimited UTF-8 text whose first line names the
//! columns. [`parse_delimited`] turns such a blob into [`RawRecord`]s (an
//! untyped field-name to value mapping), and [`project`] maps those into
//! typed catalog records.
//!
//! The parser splits on every comma. Quoted fields are not recognised, so a
//! value containing a comma spills into the following columns; data files
//! use `;` inside values instead.
//!
//! ```
//! use research_bank::ingest::parse_delimited;
//!
//! let rows = parse_delimited("name,year\nFoo\nBar,2020\n");
//! assert_eq!(rows.len(), 2);
//! assert_eq!(rows[0].get("year"), "");
//! assert_eq!(rows[1].get("year"), "2020");
//! ```

mod projection;

pub use projection::{lenient_int, project, FieldNames, FromRawRecord, HeaderLocale};

use std::collections::HashMap;

/// Column delimiter
pub const DELIMITER: char = ',';

const BOM: char = '\u{feff}';

/// One data row, keyed by header field name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    /// 1-based line offset after the header
    pub line: usize,

    fields: HashMap<String, String>,
}

impl RawRecord {
    /// Value for a field; missing fields read as empty
    pub fn get(&self, field: &str) -> &str {
        self.fields.get(field).map(String::as_str).unwrap_or("")
    }

    /// Whether the header declared this field
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Number of fields (the header width)
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

fn split_fields(line: &str) -> Vec<String> {
    line.split(DELIMITER).map(|v| v.trim().to_string()).collect()
}

/// Parse a delimited text blob into raw records.
///
/// The first line is the header. Every following non-blank line becomes one
/// record: values map to header names by position, short rows leave the
/// remaining fields empty and surplus values are ignored. Input without at
/// least a header and one data line yields no records.
pub fn parse_delimited(text: &str) -> Vec<RawRecord> {
    let text = text.trim_start_matches(BOM).trim();
    let mut lines = text.split('\n');

    let header = match lines.next() {
        Some(line) if !line.trim().is_empty() => split_fields(line),
        _ => return Vec::new(),
    };

    let mut records = Vec::new();
    for (offset, line) in lines.enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let mut values = split_fields(line).into_iter();
        let fields = header
            .iter()
            .map(|name| (name.clone(), values.next().unwrap_or_default()))
            .collect();

        records.push(RawRecord {
            line: offset + 1,
            fields,
        });
    }

    tracing::debug!(
        columns = header.len(),
        rows = records.len(),
        "Parsed delimited text"
    );

    records
}

/// Parse raw bytes, decoding invalid UTF-8 lossily
pub fn parse_bytes(bytes: &[u8]) -> Vec<RawRecord> {
    parse_delimited(&String::from_utf8_lossy(bytes))
}
