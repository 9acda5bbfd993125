use std::path::PathBuf;

use super::*;

#[test]
fn test_command_batch_params_results_dir_defaults_to_output_dir() {
    let cli = Cli::try_parse_from([
        "pheval-phen2gene",
        "prepare-commands",
        "-e",
        "docker",
        "-i",
        "inputs",
        "-o",
        "out",
    ])
    .unwrap();
    let Commands::PrepareCommands(args) = cli.command else {
        panic!("expected prepare-commands");
    };
    let params = command_batch_params(args).unwrap();
    assert_eq!(params.target, InvocationTarget::Docker);
    assert_eq!(params.results_dir, PathBuf::from("out"));
    assert!(matches!(params.cases, CaseDirectory::Inputs(_)));
}

#[test]
fn test_command_batch_params_local_needs_executable() {
    let cli = Cli::try_parse_from([
        "pheval-phen2gene",
        "prepare-commands",
        "-P",
        "phenopackets",
        "-o",
        "out",
    ])
    .unwrap();
    let Commands::PrepareCommands(args) = cli.command else {
        panic!("expected prepare-commands");
    };
    assert!(command_batch_params(args).is_err());
}
