use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::input::files::file_stem;
use crate::input::phenopacket::extract_proband_hpo_ids;
use crate::input::{InputError, list_files};
use crate::model::Environment;

pub const BATCH_FILES_DIR: &str = "phen2gene_batch_files";

/// How Phen2Gene receives the phenotype profile of one case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhenotypeSource {
    /// A prepared input file, passed with `--file`.
    File(PathBuf),
    /// HPO ids listed with `--manual`.
    Hpo(Vec<String>),
}

/// A case as found on disk, before its phenotypes are resolved.
#[derive(Debug, Clone, Copy)]
pub enum CaseInput<'a> {
    InputFile(&'a Path),
    Phenopacket(&'a Path),
}

impl CaseInput<'_> {
    pub fn resolve(self) -> Result<PhenotypeSource, InputError> {
        match self {
            CaseInput::InputFile(path) => Ok(PhenotypeSource::File(path.to_path_buf())),
            CaseInput::Phenopacket(path) => Ok(PhenotypeSource::Hpo(extract_proband_hpo_ids(path)?)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationTarget {
    Local { python_executable: PathBuf },
    Docker,
}

impl InvocationTarget {
    pub fn from_environment(
        environment: Environment,
        python_executable: Option<&Path>,
    ) -> Result<Self, InputError> {
        match environment {
            Environment::Local => python_executable
                .map(|p| InvocationTarget::Local {
                    python_executable: p.to_path_buf(),
                })
                .ok_or_else(|| {
                    InputError::MissingInput(
                        "the local environment requires the Phen2Gene python executable"
                            .to_string(),
                    )
                }),
            Environment::Docker => Ok(InvocationTarget::Docker),
        }
    }
}

/// Minimal arguments required to run Phen2Gene on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phen2GeneCommandLineArguments {
    pub path_to_phen2gene_py: PathBuf,
    pub output_dir: PathBuf,
    pub output_file_name: String,
    pub phenotypes: PhenotypeSource,
}

/// Minimal arguments required to run Phen2Gene inside its container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phen2GeneDockerArguments {
    pub output_dir: PathBuf,
    pub output_file_name: String,
    pub phenotypes: PhenotypeSource,
}

pub fn create_command_line_arguments(
    path_to_phen2gene_py: &Path,
    output_dir: &Path,
    output_file_name: &str,
    case: CaseInput<'_>,
) -> Result<Phen2GeneCommandLineArguments, InputError> {
    Ok(Phen2GeneCommandLineArguments {
        path_to_phen2gene_py: path_to_phen2gene_py.to_path_buf(),
        output_dir: output_dir.to_path_buf(),
        output_file_name: output_file_name.to_string(),
        phenotypes: case.resolve()?,
    })
}

pub fn create_docker_arguments(
    output_dir: &Path,
    output_file_name: &str,
    case: CaseInput<'_>,
) -> Result<Phen2GeneDockerArguments, InputError> {
    Ok(Phen2GeneDockerArguments {
        output_dir: output_dir.to_path_buf(),
        output_file_name: output_file_name.to_string(),
        phenotypes: case.resolve()?,
    })
}

fn phen2gene_arguments(phenotypes: &PhenotypeSource, output_dir: &Path, name: &str) -> String {
    let profile = match phenotypes {
        PhenotypeSource::File(path) => format!("--file {}", path.display()),
        PhenotypeSource::Hpo(ids) => format!("--manual {}", ids.join(" ")),
    };
    format!("{} -out {} --name {}", profile, output_dir.display(), name)
}

impl Phen2GeneCommandLineArguments {
    pub fn command_line(&self) -> String {
        format!(
            "python3 {} {}",
            self.path_to_phen2gene_py.display(),
            phen2gene_arguments(&self.phenotypes, &self.output_dir, &self.output_file_name)
        )
    }
}

impl Phen2GeneDockerArguments {
    /// Arguments handed to the container entrypoint.
    pub fn command_line(&self) -> String {
        phen2gene_arguments(&self.phenotypes, &self.output_dir, &self.output_file_name)
    }
}

/// Writes one command per line to a batch file, truncating it on creation.
pub struct CommandWriter {
    w: BufWriter<File>,
    written: usize,
}

impl CommandWriter {
    pub fn create(path: &Path) -> std::io::Result<Self> {
        Ok(Self {
            w: BufWriter::new(File::create(path)?),
            written: 0,
        })
    }

    pub fn write_local_command(&mut self, args: &Phen2GeneCommandLineArguments) -> std::io::Result<()> {
        writeln!(self.w, "{}", args.command_line())?;
        self.written += 1;
        Ok(())
    }

    pub fn write_docker_command(&mut self, args: &Phen2GeneDockerArguments) -> std::io::Result<()> {
        writeln!(self.w, "{}", args.command_line())?;
        self.written += 1;
        Ok(())
    }

    pub fn finish(mut self) -> std::io::Result<usize> {
        self.w.flush()?;
        Ok(self.written)
    }
}

/// Where the cases of a batch come from.
#[derive(Debug, Clone)]
pub enum CaseDirectory {
    Phenopackets(PathBuf),
    Inputs(PathBuf),
}

impl CaseDirectory {
    /// Exactly one of the two directories must be given.
    pub fn from_options(
        phenopacket_dir: Option<PathBuf>,
        input_dir: Option<PathBuf>,
    ) -> Result<Self, InputError> {
        match (phenopacket_dir, input_dir) {
            (Some(dir), None) => Ok(CaseDirectory::Phenopackets(dir)),
            (None, Some(dir)) => Ok(CaseDirectory::Inputs(dir)),
            (Some(_), Some(_)) => Err(InputError::InvalidInput(
                "phenopacket directory and input directory are mutually exclusive".to_string(),
            )),
            (None, None) => Err(InputError::MissingInput(
                "either a phenopacket directory or an input directory is required".to_string(),
            )),
        }
    }

    fn dir(&self) -> &Path {
        match self {
            CaseDirectory::Phenopackets(dir) | CaseDirectory::Inputs(dir) => dir,
        }
    }

    fn case<'a>(&self, path: &'a Path) -> CaseInput<'a> {
        match self {
            CaseDirectory::Phenopackets(_) => CaseInput::Phenopacket(path),
            CaseDirectory::Inputs(_) => CaseInput::InputFile(path),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CommandBatchParams {
    pub target: InvocationTarget,
    pub file_prefix: String,
    /// Directory receiving `phen2gene_batch_files/`.
    pub output_dir: PathBuf,
    /// Directory Phen2Gene writes its results to (`-out`).
    pub results_dir: PathBuf,
    pub cases: CaseDirectory,
}

pub fn batch_file_path(output_dir: &Path, file_prefix: &str) -> PathBuf {
    output_dir
        .join(BATCH_FILES_DIR)
        .join(format!("{}-phen2gene_batch.txt", file_prefix))
}

pub fn write_commands(
    params: &CommandBatchParams,
    inputs: &[PathBuf],
    writer: &mut CommandWriter,
) -> Result<(), InputError> {
    for input in inputs {
        let name = file_stem(input);
        let case = params.cases.case(input);
        match &params.target {
            InvocationTarget::Local { python_executable } => {
                let args =
                    create_command_line_arguments(python_executable, &params.results_dir, &name, case)?;
                writer.write_local_command(&args)?;
            }
            InvocationTarget::Docker => {
                let args = create_docker_arguments(&params.results_dir, &name, case)?;
                writer.write_docker_command(&args)?;
            }
        }
    }
    Ok(())
}

/// Writes the batch file for every case and returns its path.
pub fn prepare_commands(params: &CommandBatchParams) -> Result<PathBuf, InputError> {
    fs::create_dir_all(params.output_dir.join(BATCH_FILES_DIR))?;
    let batch_path = batch_file_path(&params.output_dir, &params.file_prefix);

    let inputs = list_files(params.cases.dir())?;
    let mut writer = CommandWriter::create(&batch_path)?;
    write_commands(params, &inputs, &mut writer)?;
    let written = writer.finish()?;

    tracing::info!(
        batch_file = %batch_path.display(),
        commands = written,
        invocation = ?params.target,
        "phen2gene batch file written"
    );
    Ok(batch_path)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_commands.rs"]
mod tests;
