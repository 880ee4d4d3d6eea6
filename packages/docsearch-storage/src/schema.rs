//! Payload keys of the indexed document collection.

pub const DOC_ID: &str = "doc_id";
pub const FILE_NAME: &str = "sFileName";
pub const FILE_PATH: &str = "sFilePath";
pub const PAGE: &str = "nPage";
pub const GRADE: &str = "sGrade";
pub const YEAR: &str = "year";
pub const MONTH: &str = "month";
pub const DAY: &str = "day";
pub const KEYWORDS: &str = "keywords";

/// Stored in place of a date part the indexer could not determine.
pub const UNKNOWN: &str = "unknown";
