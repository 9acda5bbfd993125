use std::fs;
use std::path::{Path, PathBuf};

use crate::input::files::file_name;
use crate::input::phenopacket::extract_proband_hpo_ids;
use crate::input::{InputError, list_files};

/// Writes the observed HPO ids of one phenopacket as a Phen2Gene `--file` input.
///
/// The output is `<output_dir>/<phenopacket file name>.txt`, one id per line
/// with no trailing newline.
pub fn prepare_input(phenopacket_path: &Path, output_dir: &Path) -> Result<PathBuf, InputError> {
    fs::create_dir_all(output_dir)?;
    let hpo_ids = extract_proband_hpo_ids(phenopacket_path)?;
    let output_path = output_dir.join(format!("{}.txt", file_name(phenopacket_path)));
    fs::write(&output_path, hpo_ids.join("\n"))?;
    Ok(output_path)
}

pub fn prepare_inputs(phenopacket_dir: &Path, output_dir: &Path) -> Result<Vec<PathBuf>, InputError> {
    let phenopackets = list_files(phenopacket_dir)?;
    let mut written = Vec::with_capacity(phenopackets.len());
    for phenopacket_path in &phenopackets {
        written.push(prepare_input(phenopacket_path, output_dir)?);
    }
    tracing::info!(
        phenopacket_dir = %phenopacket_dir.display(),
        output_dir = %output_dir.display(),
        inputs = written.len(),
        "phen2gene inputs prepared"
    );
    Ok(written)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_inputs.rs"]
mod tests;
