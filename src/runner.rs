use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;

use crate::config::{INPUT_DIR_CONFIG, InputDirConfig};
use crate::input::files::file_name;
use crate::input::{IdentifierMap, InputError};
use crate::model::Environment;
use crate::pipeline::RunError;
use crate::pipeline::stage2_commands::{
    CaseDirectory, CommandBatchParams, InvocationTarget, prepare_commands,
};
use crate::pipeline::stage3_run::{CONTAINER_RESULTS_DIR, run_docker, run_local};
use crate::pipeline::stage4_standardize::{Stage4Output, create_standardized_results};

pub const TOOL_INPUT_COMMANDS_DIR: &str = "tool_input_commands";
pub const RAW_RESULTS_DIR: &str = "raw_results";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Phase {
    All,
    Prepare,
    Run,
    PostProcess,
}

#[derive(Debug, Clone)]
pub struct Phen2GeneRunner {
    pub input_dir: PathBuf,
    pub testdata_dir: PathBuf,
    pub tmp_dir: PathBuf,
    pub output_dir: PathBuf,
    pub config: InputDirConfig,
}

impl Phen2GeneRunner {
    pub fn new(
        input_dir: PathBuf,
        testdata_dir: PathBuf,
        tmp_dir: PathBuf,
        output_dir: PathBuf,
    ) -> Result<Self, RunError> {
        let config = InputDirConfig::load(&input_dir.join(INPUT_DIR_CONFIG))?;
        Ok(Self {
            input_dir,
            testdata_dir,
            tmp_dir,
            output_dir,
            config,
        })
    }

    pub fn tool_input_commands_dir(&self) -> PathBuf {
        self.output_dir.join(TOOL_INPUT_COMMANDS_DIR)
    }

    pub fn raw_results_dir(&self) -> PathBuf {
        self.output_dir.join(RAW_RESULTS_DIR)
    }

    pub fn execute(&self, phase: Phase) -> Result<(), RunError> {
        match phase {
            Phase::Prepare => self.prepare(),
            Phase::Run => self.run(),
            Phase::PostProcess => self.post_process().map(|_| ()),
            Phase::All => {
                self.prepare()?;
                self.run()?;
                self.post_process().map(|_| ())
            }
        }
    }

    pub fn prepare(&self) -> Result<(), RunError> {
        for dir in [
            self.tmp_dir.clone(),
            self.tool_input_commands_dir(),
            self.raw_results_dir(),
        ] {
            fs::create_dir_all(&dir)?;
        }
        tracing::info!(
            tool = %self.config.tool,
            version = %self.config.tool_version,
            output_dir = %self.output_dir.display(),
            "runner prepared"
        );
        Ok(())
    }

    /// Batch parameters for this run; docker writes to the container mount.
    pub fn command_batch_params(&self) -> Result<CommandBatchParams, RunError> {
        let options = &self.config.tool_specific_configuration_options;
        let target = InvocationTarget::from_environment(
            options.environment,
            options.phen2gene_python_executable.as_deref(),
        )?;
        let results_dir = match options.environment {
            Environment::Local => self.raw_results_dir(),
            Environment::Docker => PathBuf::from(CONTAINER_RESULTS_DIR),
        };
        Ok(CommandBatchParams {
            target,
            file_prefix: file_name(&self.testdata_dir),
            output_dir: self.tool_input_commands_dir(),
            results_dir,
            cases: CaseDirectory::Phenopackets(find_phenopacket_dir(&self.testdata_dir)?),
        })
    }

    pub fn run(&self) -> Result<(), RunError> {
        let params = self.command_batch_params()?;
        let batch_file = prepare_commands(&params)?;
        match params.target {
            InvocationTarget::Local { .. } => run_local(&batch_file),
            InvocationTarget::Docker => run_docker(&batch_file, &self.raw_results_dir()).map(|_| ()),
        }
    }

    pub fn post_process(&self) -> Result<Stage4Output, RunError> {
        let options = &self.config.tool_specific_configuration_options;
        let hgnc_path = self.config.hgnc_data_path(&self.input_dir);
        let identifier_map = IdentifierMap::load_hgnc(&hgnc_path, options.identifier)?;
        if identifier_map.is_empty() {
            tracing::warn!(hgnc_data = %hgnc_path.display(), "identifier map is empty; all identifiers will be blank");
        }
        tracing::info!(
            hgnc_data = %hgnc_path.display(),
            symbols = identifier_map.len(),
            "identifier map loaded"
        );
        Ok(create_standardized_results(
            &self.raw_results_dir(),
            &self.output_dir,
            options.post_process.score_order,
            &identifier_map,
        )?)
    }
}

/// First subdirectory of `testdata_dir` (by name) whose name contains `phenopacket`.
pub fn find_phenopacket_dir(testdata_dir: &Path) -> Result<PathBuf, InputError> {
    let mut candidates = Vec::new();
    for entry in fs::read_dir(testdata_dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() && entry.file_name().to_string_lossy().contains("phenopacket") {
            candidates.push(entry.path());
        }
    }
    candidates.sort();
    candidates.into_iter().next().ok_or_else(|| {
        InputError::MissingInput(format!(
            "no phenopacket directory found in {}",
            testdata_dir.display()
        ))
    })
}

#[cfg(test)]
#[path = "../tests/src_inline/runner.rs"]
mod tests;
