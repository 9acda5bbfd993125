pub mod files;
pub mod hgnc;
pub mod phenopacket;
pub mod raw_result;

pub use files::{list_files, open_maybe_gz};
pub use hgnc::IdentifierMap;

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing input: {0}")]
    MissingInput(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("malformed result file {path}: {reason}")]
    Malformed { path: String, reason: String },
}

/// Splits a header line into trimmed column names.
pub(crate) fn header_columns(line: &str) -> Vec<String> {
    line.trim_end_matches(['\r', '\n'])
        .split('\t')
        .map(|s| s.trim().to_string())
        .collect()
}

pub(crate) fn column_index(columns: &[String], name: &str) -> Option<usize> {
    columns.iter().position(|c| c == name)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
