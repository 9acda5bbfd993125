use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::pipeline::stage2_commands::batch_file_path;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("pheval_phen2gene_runner_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn setup(root: &Path, environment: &str) -> Phen2GeneRunner {
    let input_dir = root.join("phen2gene");
    let testdata_dir = root.join("lirical_corpus");
    fs::create_dir_all(&input_dir).unwrap();
    fs::create_dir_all(testdata_dir.join("phenopackets")).unwrap();
    fs::create_dir_all(testdata_dir.join("vcf")).unwrap();

    fs::write(
        input_dir.join("config.yaml"),
        format!(
            "tool: phen2gene\n\
             tool_version: 1.2.3\n\
             tool_specific_configuration_options:\n  \
               environment: {environment}\n  \
               phen2gene_python_executable: /opt/Phen2Gene/phen2gene.py\n  \
               post_process:\n    \
                 score_order: descending\n"
        ),
    )
    .unwrap();
    fs::write(
        input_dir.join("hgnc_complete_set.txt"),
        "hgnc_id\tsymbol\tensembl_gene_id\n\
         HGNC:4189\tGCDH\tENSG00000105607\n\
         HGNC:3482\tETFB\tENSG00000105379\n",
    )
    .unwrap();
    fs::write(
        testdata_dir.join("phenopackets").join("patient1.json"),
        r#"{"phenotypicFeatures": [{"type": {"id": "HP:0000256"}}]}"#,
    )
    .unwrap();

    Phen2GeneRunner::new(
        input_dir,
        testdata_dir,
        root.join("tmp"),
        root.join("output"),
    )
    .unwrap()
}

#[test]
fn test_prepare_creates_directories() {
    let root = make_temp_dir();
    let runner = setup(&root, "local");
    runner.execute(Phase::Prepare).unwrap();
    assert!(runner.tool_input_commands_dir().is_dir());
    assert!(runner.raw_results_dir().is_dir());
    assert!(root.join("tmp").is_dir());
}

#[test]
fn test_local_batch_targets_raw_results() {
    let root = make_temp_dir();
    let runner = setup(&root, "local");
    let params = runner.command_batch_params().unwrap();
    assert_eq!(params.file_prefix, "lirical_corpus");
    assert_eq!(params.results_dir, runner.raw_results_dir());

    let batch = prepare_commands(&params).unwrap();
    assert_eq!(
        batch,
        batch_file_path(&runner.tool_input_commands_dir(), "lirical_corpus")
    );
    assert_eq!(
        fs::read_to_string(batch).unwrap(),
        format!(
            "python3 /opt/Phen2Gene/phen2gene.py --manual HP:0000256 -out {} --name patient1\n",
            runner.raw_results_dir().display()
        )
    );
}

#[test]
fn test_docker_batch_targets_container_mount() {
    let root = make_temp_dir();
    let runner = setup(&root, "docker");
    let params = runner.command_batch_params().unwrap();
    assert_eq!(params.target, InvocationTarget::Docker);
    assert_eq!(params.results_dir, PathBuf::from(CONTAINER_RESULTS_DIR));
}

#[test]
fn test_post_process_standardizes_raw_results() {
    let root = make_temp_dir();
    let runner = setup(&root, "local");
    runner.prepare().unwrap();
    fs::write(
        runner.raw_results_dir().join("patient1"),
        "Rank\tGene\tID\tScore\tStatus\n1\tGCDH\t2639\t1.0\tSeedGene\n2\tETFB\t2109\t0.298386\tSeedGene\n",
    )
    .unwrap();

    runner.execute(Phase::PostProcess).unwrap();
    let out = root
        .join("output")
        .join("pheval_gene_results")
        .join("patient1-phen2gene-pheval_gene_result.tsv");
    assert_eq!(
        fs::read_to_string(out).unwrap(),
        "rank\tscore\tgene_symbol\tgene_identifier\n\
         1\t1.0\tGCDH\tENSG00000105607\n\
         2\t0.2984\tETFB\tENSG00000105379\n"
    );
}

#[test]
fn test_missing_phenopacket_dir() {
    let root = make_temp_dir();
    fs::create_dir_all(root.join("vcf")).unwrap();
    assert!(matches!(
        find_phenopacket_dir(&root),
        Err(InputError::MissingInput(_))
    ));
}

#[test]
fn test_missing_config_fails() {
    let root = make_temp_dir();
    let err = Phen2GeneRunner::new(
        root.join("nothing"),
        root.join("testdata"),
        root.join("tmp"),
        root.join("out"),
    )
    .unwrap_err();
    assert!(matches!(err, RunError::Config(_)));
}
