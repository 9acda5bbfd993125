/// One row of a raw Phen2Gene output table.
#[derive(Debug, Clone, PartialEq)]
pub struct RawScoreRecord {
    pub rank_hint: i64,
    pub gene_symbol: String,
    pub external_id: String,
    pub score: f64,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StandardizedResult {
    pub gene_symbol: String,
    pub gene_identifier: String,
    pub score: f64,
    pub rank: u32,
}
