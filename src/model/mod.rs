pub mod options;
pub mod result;

pub use options::{Environment, IdentifierKind, SortOrder};
pub use result::{RawScoreRecord, StandardizedResult};

/// Tag embedded in every standardized result file name.
pub const TOOL_TAG: &str = "phen2gene";
