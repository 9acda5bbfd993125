use std::collections::{HashMap, HashSet};
use std::io::BufRead;
use std::path::Path;

use crate::input::{InputError, column_index, header_columns, open_maybe_gz};
use crate::model::IdentifierKind;

const SYMBOL_COLUMN: &str = "symbol";
const PREV_SYMBOL_COLUMN: &str = "prev_symbol";

/// Immutable gene symbol to stable identifier lookup.
///
/// Current approved symbols take precedence over previous symbols, so a
/// retired symbol that was later reassigned resolves to the gene that holds
/// it today. A current symbol with a blank identifier stays unmapped.
#[derive(Debug, Clone, Default)]
pub struct IdentifierMap {
    current: HashMap<String, String>,
    /// Current symbols whose row has no identifier of the selected kind.
    unidentified: HashSet<String>,
    previous: HashMap<String, String>,
}

impl IdentifierMap {
    #[cfg(test)]
    pub fn from_pairs<I, S, T>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        let mut map = Self::default();
        for (symbol, identifier) in pairs {
            map.insert_current(symbol.into(), identifier.into());
        }
        map
    }

    /// Loads an HGNC complete-set table (`hgnc_complete_set.txt`, optionally gzipped).
    pub fn load_hgnc(path: &Path, kind: IdentifierKind) -> Result<Self, InputError> {
        let mut reader = open_maybe_gz(path)?;
        let mut buf = String::new();

        if reader.read_line(&mut buf)? == 0 {
            return Err(InputError::Parse(format!(
                "HGNC table {} is empty",
                path.display()
            )));
        }
        let header = header_columns(&buf);
        let symbol_idx = column_index(&header, SYMBOL_COLUMN).ok_or_else(|| {
            InputError::Parse(format!(
                "HGNC table {} has no '{}' column",
                path.display(),
                SYMBOL_COLUMN
            ))
        })?;
        let id_idx = column_index(&header, kind.column()).ok_or_else(|| {
            InputError::Parse(format!(
                "HGNC table {} has no '{}' column",
                path.display(),
                kind.column()
            ))
        })?;
        let prev_idx = column_index(&header, PREV_SYMBOL_COLUMN);

        let mut map = IdentifierMap::default();
        loop {
            buf.clear();
            if reader.read_line(&mut buf)? == 0 {
                break;
            }
            let line = buf.trim_end_matches(['\r', '\n']);
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split('\t').collect();
            let symbol = fields.get(symbol_idx).map(|s| unquote(s)).unwrap_or("");
            let identifier = fields.get(id_idx).map(|s| unquote(s)).unwrap_or("");
            if symbol.is_empty() {
                continue;
            }
            map.insert_current(symbol.to_string(), identifier.to_string());
            if identifier.is_empty() {
                continue;
            }
            if let Some(prev) = prev_idx.and_then(|i| fields.get(i)) {
                for old in unquote(prev).split('|').map(str::trim) {
                    if !old.is_empty() {
                        map.previous
                            .entry(old.to_string())
                            .or_insert_with(|| identifier.to_string());
                    }
                }
            }
        }

        Ok(map)
    }

    fn insert_current(&mut self, symbol: String, identifier: String) {
        if identifier.is_empty() {
            self.unidentified.insert(symbol);
        } else {
            self.current.insert(symbol, identifier);
        }
    }

    pub fn get(&self, symbol: &str) -> Option<&str> {
        if let Some(identifier) = self.current.get(symbol) {
            return Some(identifier);
        }
        if self.unidentified.contains(symbol) {
            return None;
        }
        self.previous.get(symbol).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }
}

fn unquote(s: &str) -> &str {
    let t = s.trim();
    t.strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(t)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/hgnc.rs"]
mod tests;
