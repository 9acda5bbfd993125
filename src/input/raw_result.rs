use std::io::BufRead;
use std::path::Path;

use crate::input::{InputError, column_index, header_columns, open_maybe_gz};
use crate::model::RawScoreRecord;

const GENE_COLUMN: &str = "Gene";
const SCORE_COLUMN: &str = "Score";
const RANK_COLUMN: &str = "Rank";
const ID_COLUMN: &str = "ID";
const STATUS_COLUMN: &str = "Status";

struct RawColumns {
    gene: usize,
    score: usize,
    rank: Option<usize>,
    id: Option<usize>,
    status: Option<usize>,
}

/// Reads a Phen2Gene output table. Rows keep file order.
pub fn read_raw_result(path: &Path) -> Result<Vec<RawScoreRecord>, InputError> {
    let mut reader = open_maybe_gz(path)?;
    let mut buf = String::new();
    let malformed = |reason: String| InputError::Malformed {
        path: path.display().to_string(),
        reason,
    };

    let read = reader
        .read_line(&mut buf)
        .map_err(|e| read_error(e, path))?;
    if read == 0 {
        return Err(malformed("file is empty (missing header)".to_string()));
    }
    let header = header_columns(&buf);
    let columns = RawColumns {
        gene: column_index(&header, GENE_COLUMN)
            .ok_or_else(|| malformed(format!("missing required column '{GENE_COLUMN}'")))?,
        score: column_index(&header, SCORE_COLUMN)
            .ok_or_else(|| malformed(format!("missing required column '{SCORE_COLUMN}'")))?,
        rank: column_index(&header, RANK_COLUMN),
        id: column_index(&header, ID_COLUMN),
        status: column_index(&header, STATUS_COLUMN),
    };

    let mut records = Vec::new();
    let mut line_no = 1usize;
    loop {
        buf.clear();
        let read = reader
            .read_line(&mut buf)
            .map_err(|e| read_error(e, path))?;
        if read == 0 {
            break;
        }
        line_no += 1;
        let line = buf.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        records.push(parse_row(&fields, &columns).map_err(|reason| {
            malformed(format!("line {line_no}: {reason}"))
        })?);
    }

    Ok(records)
}

fn parse_row(fields: &[&str], columns: &RawColumns) -> Result<RawScoreRecord, String> {
    // Symbols are kept verbatim, surrounding whitespace included.
    let gene_symbol = fields
        .get(columns.gene)
        .map(|s| s.to_string())
        .ok_or_else(|| format!("missing '{GENE_COLUMN}' field"))?;
    let score_raw = fields
        .get(columns.score)
        .map(|s| s.trim())
        .ok_or_else(|| format!("missing '{SCORE_COLUMN}' field"))?;
    let score: f64 = score_raw
        .parse()
        .map_err(|_| format!("'{SCORE_COLUMN}' value '{score_raw}' is not numeric"))?;
    if score.is_nan() {
        return Err(format!("'{SCORE_COLUMN}' value is NaN"));
    }

    let optional = |idx: Option<usize>| {
        idx.and_then(|i| fields.get(i))
            .map(|s| s.trim().to_string())
            .unwrap_or_default()
    };
    // Upstream ranks are recomputed during standardization.
    let rank_hint = optional(columns.rank).parse().unwrap_or(0);

    Ok(RawScoreRecord {
        rank_hint,
        gene_symbol,
        external_id: optional(columns.id),
        score,
        status: optional(columns.status),
    })
}

fn read_error(err: std::io::Error, path: &Path) -> InputError {
    if err.kind() == std::io::ErrorKind::InvalidData {
        InputError::Malformed {
            path: path.display().to_string(),
            reason: "not valid UTF-8 delimited text".to_string(),
        }
    } else {
        InputError::Io(err)
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/raw_result.rs"]
mod tests;
