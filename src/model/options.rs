use clap::ValueEnum;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Local,
    Docker,
}

/// Which stable identifier column of the HGNC table a gene symbol resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum IdentifierKind {
    #[default]
    EnsemblId,
    HgncId,
    EntrezId,
}

impl IdentifierKind {
    pub fn column(self) -> &'static str {
        match self {
            IdentifierKind::EnsemblId => "ensembl_gene_id",
            IdentifierKind::HgncId => "hgnc_id",
            IdentifierKind::EntrezId => "entrez_id",
        }
    }
}
