use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("pheval_phen2gene_stage1_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn phenopacket(ids: &[&str]) -> String {
    let features: Vec<String> = ids
        .iter()
        .map(|id| format!(r#"{{"type": {{"id": "{id}", "label": "x"}}}}"#))
        .collect();
    format!(
        r#"{{"id": "p", "phenotypicFeatures": [{}]}}"#,
        features.join(",")
    )
}

#[test]
fn test_prepare_input_writes_hpo_ids_without_trailing_newline() {
    let dir = make_temp_dir();
    let pp_path = dir.join("case1.json");
    fs::write(&pp_path, phenopacket(&["HP:0000256", "HP:0000486"])).unwrap();

    let out_dir = dir.join("inputs");
    let written = prepare_input(&pp_path, &out_dir).unwrap();
    assert_eq!(written, out_dir.join("case1.json.txt"));
    assert_eq!(
        fs::read_to_string(&written).unwrap(),
        "HP:0000256\nHP:0000486"
    );
}

#[test]
fn test_prepare_inputs_covers_directory() {
    let dir = make_temp_dir();
    let pp_dir = dir.join("phenopackets");
    fs::create_dir_all(&pp_dir).unwrap();
    fs::write(pp_dir.join("a.json"), phenopacket(&["HP:0000001"])).unwrap();
    fs::write(pp_dir.join("b.json"), phenopacket(&[])).unwrap();

    let out_dir = dir.join("inputs");
    fs::create_dir_all(&out_dir).unwrap();
    let written = prepare_inputs(&pp_dir, &out_dir).unwrap();
    assert_eq!(
        written,
        vec![out_dir.join("a.json.txt"), out_dir.join("b.json.txt")]
    );
    assert_eq!(fs::read_to_string(&written[0]).unwrap(), "HP:0000001");
    assert_eq!(fs::read_to_string(&written[1]).unwrap(), "");
}

#[test]
fn test_prepare_inputs_missing_directory() {
    let dir = make_temp_dir();
    assert!(prepare_inputs(&dir.join("absent"), &dir.join("out")).is_err());
}
