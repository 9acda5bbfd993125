use std::path::Path;

use serde::Deserialize;

use crate::input::InputError;

#[derive(Debug, Clone, Deserialize)]
pub struct OntologyClass {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhenotypicFeature {
    #[serde(rename = "type")]
    pub kind: OntologyClass,
    #[serde(default)]
    pub excluded: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phenopacket {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub phenotypic_features: Vec<PhenotypicFeature>,
}

/// A phenopacket file holds either a single case or a family with a proband.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum PhenopacketDocument {
    Family { proband: Phenopacket },
    Single(Phenopacket),
}

pub fn read_phenopacket(path: &Path) -> Result<Phenopacket, InputError> {
    let content = std::fs::read_to_string(path)?;
    parse_phenopacket(&content)
        .map_err(|e| InputError::Parse(format!("phenopacket {}: {e}", path.display())))
}

pub fn parse_phenopacket(content: &str) -> Result<Phenopacket, serde_json::Error> {
    let doc: PhenopacketDocument = serde_json::from_str(content)?;
    Ok(match doc {
        PhenopacketDocument::Family { proband } => proband,
        PhenopacketDocument::Single(phenopacket) => phenopacket,
    })
}

impl Phenopacket {
    pub fn observed_phenotypic_features(&self) -> impl Iterator<Item = &PhenotypicFeature> {
        self.phenotypic_features.iter().filter(|f| !f.excluded)
    }

    pub fn observed_hpo_ids(&self) -> Vec<String> {
        self.observed_phenotypic_features()
            .map(|f| f.kind.id.clone())
            .collect()
    }
}

/// Observed HPO ids of the proband recorded in `path`.
pub fn extract_proband_hpo_ids(path: &Path) -> Result<Vec<String>, InputError> {
    let phenopacket = read_phenopacket(path)?;
    let ids = phenopacket.observed_hpo_ids();
    if ids.is_empty() {
        tracing::warn!(
            path = %path.display(),
            id = %phenopacket.id,
            "phenopacket has no observed phenotypic features"
        );
    }
    Ok(ids)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/phenopacket.rs"]
mod tests;
