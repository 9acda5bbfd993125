mod cli;
mod config;
mod input;
mod logging;
mod model;
mod pipeline;
mod report;
mod runner;

use anyhow::{Context, Result};
use clap::Parser;

use crate::cli::{Cli, Commands, PostProcessArgs, PrepareCommandsArgs};
use crate::input::IdentifierMap;
use crate::pipeline::stage1_inputs::{prepare_input, prepare_inputs};
use crate::pipeline::stage2_commands::{
    CaseDirectory, CommandBatchParams, InvocationTarget, prepare_commands,
};
use crate::pipeline::stage4_standardize::create_standardized_results;
use crate::runner::Phen2GeneRunner;

fn main() -> Result<()> {
    logging::init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::PrepareInput(args) => {
            let path = prepare_input(&args.phenopacket_path, &args.output_dir).with_context(|| {
                format!("failed to prepare input for {}", args.phenopacket_path.display())
            })?;
            tracing::info!(input = %path.display(), "phen2gene input written");
        }
        Commands::PrepareInputs(args) => {
            prepare_inputs(&args.phenopacket_dir, &args.output_dir).with_context(|| {
                format!("failed to prepare inputs from {}", args.phenopacket_dir.display())
            })?;
        }
        Commands::PrepareCommands(args) => {
            let params = command_batch_params(args)?;
            prepare_commands(&params).context("failed to write phen2gene batch file")?;
        }
        Commands::PostProcess(args) => post_process(&args)?,
        Commands::Run(args) => {
            let runner = Phen2GeneRunner::new(
                args.input_dir,
                args.testdata_dir,
                args.tmp_dir,
                args.output_dir,
            )
            .context("failed to initialise runner")?;
            runner
                .execute(args.phase)
                .with_context(|| format!("runner phase {:?} failed", args.phase))?;
        }
    }

    Ok(())
}

fn command_batch_params(args: PrepareCommandsArgs) -> Result<CommandBatchParams> {
    let target = InvocationTarget::from_environment(args.environment, args.phen2gene_py.as_deref())?;
    let cases = CaseDirectory::from_options(args.phenopacket_dir, args.input_dir)?;
    let results_dir = args
        .results_dir
        .unwrap_or_else(|| args.output_dir.clone());
    Ok(CommandBatchParams {
        target,
        file_prefix: args.file_prefix,
        output_dir: args.output_dir,
        results_dir,
        cases,
    })
}

fn post_process(args: &PostProcessArgs) -> Result<()> {
    let identifier_map = IdentifierMap::load_hgnc(&args.hgnc_data, args.identifier)
        .with_context(|| format!("failed to load HGNC table {}", args.hgnc_data.display()))?;
    create_standardized_results(
        &args.results_dir,
        &args.output_dir,
        args.sort_order,
        &identifier_map,
    )
    .with_context(|| {
        format!(
            "failed to standardize results in {}",
            args.results_dir.display()
        )
    })?;
    Ok(())
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
