use std::fs;
use std::path::Path;
use std::process::Command;

use crate::pipeline::RunError;

pub const PHEN2GENE_IMAGE: &str = "genomicslab/phen2gene";
/// Mount point of the raw results directory inside the container.
pub const CONTAINER_RESULTS_DIR: &str = "/phen2gene-results";

pub fn read_batch_commands(batch_file: &Path) -> Result<Vec<String>, RunError> {
    let content = fs::read_to_string(batch_file)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect())
}

pub fn docker_run_args(command: &str, results_dir: &Path) -> Vec<String> {
    let mut args = vec![
        "run".to_string(),
        "--rm".to_string(),
        "-v".to_string(),
        format!("{}:{}", results_dir.display(), CONTAINER_RESULTS_DIR),
        PHEN2GENE_IMAGE.to_string(),
    ];
    args.extend(command.split_whitespace().map(str::to_string));
    args
}

fn run_checked(cmd: &mut Command, program: &str) -> Result<(), RunError> {
    let status = cmd.status().map_err(|source| RunError::Spawn {
        program: program.to_string(),
        source,
    })?;
    if !status.success() {
        return Err(RunError::ExitStatus {
            program: program.to_string(),
            status: status.to_string(),
        });
    }
    Ok(())
}

/// Runs every command of a local batch file through `bash`.
pub fn run_local(batch_file: &Path) -> Result<(), RunError> {
    tracing::info!(batch_file = %batch_file.display(), "running phen2gene locally");
    run_checked(Command::new("bash").arg(batch_file), "bash")
}

/// Starts one container per batch line with `results_dir` mounted for output.
pub fn run_docker(batch_file: &Path, results_dir: &Path) -> Result<usize, RunError> {
    fs::create_dir_all(results_dir)?;
    let commands = read_batch_commands(batch_file)?;
    for command in &commands {
        tracing::debug!(command = %command, "docker run");
        run_checked(
            Command::new("docker").args(docker_run_args(command, results_dir)),
            "docker",
        )?;
    }
    tracing::info!(
        batch_file = %batch_file.display(),
        containers = commands.len(),
        "phen2gene docker batch finished"
    );
    Ok(commands.len())
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_run.rs"]
mod tests;
