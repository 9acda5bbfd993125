use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

use crate::input::files::file_stem;
use crate::input::raw_result::read_raw_result;
use crate::input::{IdentifierMap, InputError, list_files};
use crate::model::{RawScoreRecord, SortOrder, StandardizedResult, TOOL_TAG};
use crate::report::write_standardized_tsv;

pub const GENE_RESULTS_DIR: &str = "pheval_gene_results";

#[derive(Debug, Clone, Default)]
pub struct Stage4Output {
    pub files_written: Vec<PathBuf>,
    pub records: usize,
    pub unmapped: usize,
}

/// Empty when `gene_symbol` has no mapping.
pub fn map_gene_identifier(gene_symbol: &str, identifier_map: &IdentifierMap) -> String {
    identifier_map
        .get(gene_symbol)
        .map(str::to_string)
        .unwrap_or_default()
}

/// Rounds to 4 decimal places. The exact binary value is rounded to the
/// nearest decimal, so `2.00005` (stored just below) becomes `2.0`.
pub fn round_score(score: f64) -> f64 {
    if !score.is_finite() {
        return score;
    }
    format!("{:.4}", score).parse().unwrap_or(score)
}

pub fn standardize(
    raw_records: &[RawScoreRecord],
    identifier_map: &IdentifierMap,
    sort_order: SortOrder,
) -> Vec<StandardizedResult> {
    let mut results: Vec<StandardizedResult> = raw_records
        .iter()
        .map(|record| StandardizedResult {
            gene_symbol: record.gene_symbol.clone(),
            gene_identifier: map_gene_identifier(&record.gene_symbol, identifier_map),
            score: round_score(record.score),
            rank: 0,
        })
        .collect();

    // Stable sort on score only; tied entries keep input order.
    results.sort_by(|a, b| {
        let ord = a.score.partial_cmp(&b.score).unwrap_or(Ordering::Equal);
        match sort_order {
            SortOrder::Ascending => ord,
            SortOrder::Descending => ord.reverse(),
        }
    });

    assign_competition_ranks(&mut results);
    results
}

/// Standard competition ("1224") ranking over an already sorted slice.
pub fn assign_competition_ranks(results: &mut [StandardizedResult]) {
    results.iter_mut().fold(
        (0u32, 0u32, None::<f64>),
        |(rank, count, previous), result| {
            let count = count + 1;
            let (rank, count, previous) = if previous != Some(result.score) {
                (rank + count, 0, Some(result.score))
            } else {
                (rank, count, previous)
            };
            result.rank = rank;
            (rank, count, previous)
        },
    );
}

pub fn standardized_result_path(output_dir: &Path, raw_result: &Path) -> PathBuf {
    output_dir.join(GENE_RESULTS_DIR).join(format!(
        "{}-{}-pheval_gene_result.tsv",
        file_stem(raw_result),
        TOOL_TAG
    ))
}

/// Standardizes one raw result file and writes it under `output_dir`.
pub fn standardize_file(
    raw_result: &Path,
    output_dir: &Path,
    sort_order: SortOrder,
    identifier_map: &IdentifierMap,
) -> Result<(PathBuf, Vec<StandardizedResult>), InputError> {
    let raw_records = read_raw_result(raw_result)?;
    let results = standardize(&raw_records, identifier_map, sort_order);
    let out_path = standardized_result_path(output_dir, raw_result);
    write_standardized_tsv(&out_path, &results)?;
    Ok((out_path, results))
}

/// Writes one standardized table per raw result found in `results_dir`.
///
/// The first failing file aborts the batch; tables already written stay on disk.
pub fn create_standardized_results(
    results_dir: &Path,
    output_dir: &Path,
    sort_order: SortOrder,
    identifier_map: &IdentifierMap,
) -> Result<Stage4Output, InputError> {
    let raw_results = list_files(results_dir)?;
    fs::create_dir_all(output_dir.join(GENE_RESULTS_DIR))?;

    let mut out = Stage4Output::default();
    for raw_result in &raw_results {
        let (path, results) = standardize_file(raw_result, output_dir, sort_order, identifier_map)?;
        let unmapped = results
            .iter()
            .filter(|r| r.gene_identifier.is_empty())
            .count();
        if unmapped > 0 {
            tracing::warn!(
                file = %raw_result.display(),
                unmapped,
                total = results.len(),
                "gene symbols without a stable identifier"
            );
        }
        out.records += results.len();
        out.unmapped += unmapped;
        out.files_written.push(path);
    }

    tracing::info!(
        results_dir = %results_dir.display(),
        files = out.files_written.len(),
        records = out.records,
        unmapped = out.unmapped,
        ?sort_order,
        "standardized gene results written"
    );
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_standardize.rs"]
mod tests;
