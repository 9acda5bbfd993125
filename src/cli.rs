use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::model::{Environment, IdentifierKind, SortOrder};
use crate::runner::Phase;

#[derive(Debug, Parser)]
#[command(
    name = "pheval-phen2gene",
    version,
    about = "PhEval runner plugin for Phen2Gene"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Write a Phen2Gene input file from one phenopacket.
    PrepareInput(PrepareInputArgs),
    /// Write Phen2Gene input files for a directory of phenopackets.
    PrepareInputs(PrepareInputsArgs),
    /// Write a batch file of Phen2Gene commands.
    PrepareCommands(PrepareCommandsArgs),
    /// Convert raw Phen2Gene results into ranked PhEval gene results.
    PostProcess(PostProcessArgs),
    /// Run the runner phases against a PhEval directory layout.
    Run(RunArgs),
}

#[derive(Debug, Args)]
pub struct PrepareInputArgs {
    #[arg(short = 'p', long, value_name = "FILE", help = "Path to phenopacket.")]
    pub phenopacket_path: PathBuf,

    #[arg(short = 'o', long, value_name = "PATH", help = "Path to output directory.")]
    pub output_dir: PathBuf,
}

#[derive(Debug, Args)]
pub struct PrepareInputsArgs {
    #[arg(short = 'p', long, value_name = "PATH", help = "Path to phenopacket directory.")]
    pub phenopacket_dir: PathBuf,

    #[arg(short = 'o', long, value_name = "PATH", help = "Path to output directory.")]
    pub output_dir: PathBuf,
}

#[derive(Debug, Args)]
pub struct PrepareCommandsArgs {
    #[arg(short = 'e', long, value_enum, default_value_t = Environment::Local)]
    pub environment: Environment,

    #[arg(
        short = 'P',
        long,
        value_name = "PATH",
        conflicts_with = "input_dir",
        required_unless_present = "input_dir",
        help = "Path to the phenopacket directory."
    )]
    pub phenopacket_dir: Option<PathBuf>,

    #[arg(
        short = 'i',
        long,
        value_name = "PATH",
        help = "Path to the prepared input files for Phen2Gene."
    )]
    pub input_dir: Option<PathBuf>,

    #[arg(
        short = 's',
        long = "phen2gene-py",
        value_name = "PATH",
        help = "Full path to Phen2Gene python executable."
    )]
    pub phen2gene_py: Option<PathBuf>,

    #[arg(
        short = 'p',
        long,
        default_value = "RUN",
        help = "Prefix of generated command file."
    )]
    pub file_prefix: String,

    #[arg(short = 'o', long, value_name = "PATH", help = "Path to the output directory.")]
    pub output_dir: PathBuf,

    #[arg(
        short = 'r',
        long,
        value_name = "PATH",
        help = "Directory Phen2Gene writes results to (defaults to --output-dir)."
    )]
    pub results_dir: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct PostProcessArgs {
    #[arg(short = 'r', long, value_name = "PATH", help = "Directory of raw Phen2Gene results.")]
    pub results_dir: PathBuf,

    #[arg(short = 'o', long, value_name = "PATH", help = "Path to the output directory.")]
    pub output_dir: PathBuf,

    #[arg(short = 'g', long, value_name = "FILE", help = "HGNC complete set TSV.")]
    pub hgnc_data: PathBuf,

    #[arg(long, value_enum, default_value_t = SortOrder::Descending)]
    pub sort_order: SortOrder,

    #[arg(long, value_enum, default_value_t = IdentifierKind::EnsemblId)]
    pub identifier: IdentifierKind,
}

#[derive(Debug, Args)]
pub struct RunArgs {
    #[arg(long, value_name = "PATH", help = "Tool input directory holding config.yaml.")]
    pub input_dir: PathBuf,

    #[arg(long, value_name = "PATH", help = "Test data directory with a phenopackets subdirectory.")]
    pub testdata_dir: PathBuf,

    #[arg(long, value_name = "PATH")]
    pub tmp_dir: PathBuf,

    #[arg(long, value_name = "PATH")]
    pub output_dir: PathBuf,

    #[arg(long, value_enum, default_value_t = Phase::All)]
    pub phase: Phase,
}

#[cfg(test)]
#[path = "../tests/src_inline/cli.rs"]
mod tests;
