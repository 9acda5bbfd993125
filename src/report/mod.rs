use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::model::StandardizedResult;

pub const RESULT_HEADER: [&str; 4] = ["rank", "score", "gene_symbol", "gene_identifier"];

/// Shortest round-trip decimal, always with a fractional part (`1.0`, `0.2984`).
pub fn format_score(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 {
        format!("{:.1}", v)
    } else {
        format!("{}", v)
    }
}

pub fn write_standardized_tsv(path: &Path, results: &[StandardizedResult]) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    writeln!(w, "{}", RESULT_HEADER.join("\t"))?;
    for result in results {
        writeln!(
            w,
            "{}\t{}\t{}\t{}",
            result.rank,
            format_score(result.score),
            result.gene_symbol,
            result.gene_identifier
        )?;
    }
    w.flush()
}
