mod filter;
mod metadata;
mod rerank;
mod semantic;
mod strategy;

pub use filter::{date_clause, keyword_filter, text_clauses};
pub use metadata::{KeywordLookup, KeywordMatches};
pub use rerank::{keyword_bonus, rerank};
pub use semantic::to_ranked;

use serde::{Deserialize, Serialize};

use docsearch_domain::keyword::ClassifiedKeyword;
use docsearch_storage::models::{DocumentHit, PointKey};

/// A retrieval result as handed to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
	pub id: PointKey,
	pub doc_id: String,
	pub page: Option<i64>,
	pub file_name: String,
	pub date: String,
	pub path: String,
	pub grade: String,
	/// Similarity plus keyword bonus, rounded to five decimals.
	pub score: f64,
	/// `score` as a percentage with two decimals, for display only.
	pub accuracy: String,
	pub matched_keywords: Vec<String>,
}

/// Which retrieval path produced a result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Branch {
	/// Date equalities, plus any text keyword condition, filtered vector search.
	DateFiltered,
	/// Disjunction of text keyword conditions, filtered vector search.
	TextFiltered,
	/// No keywords; unfiltered vector search with keyword bonuses.
	Unfiltered,
	/// A filtered branch matched nothing and plain semantic search answered instead.
	SemanticFallback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Retrieval {
	pub branch: Branch,
	pub date_keywords: Vec<ClassifiedKeyword>,
	pub text_keywords: Vec<String>,
	pub results: Vec<RankedResult>,
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
	let factor = 10_f64.powi(decimals);

	(value * factor).round() / factor
}

pub(crate) fn accuracy_label(score: f64) -> String {
	format!("{:.2}%", round_to(score * 100.0, 2))
}

pub(crate) fn ranked_result(hit: DocumentHit, score: f64, matched: Vec<String>) -> RankedResult {
	let score = round_to(score, 5);
	let date = hit.payload.date_label();

	RankedResult {
		id: hit.id,
		doc_id: hit.payload.doc_id,
		page: hit.payload.page,
		file_name: hit.payload.file_name,
		date,
		path: hit.payload.file_path,
		grade: hit.payload.grade,
		score,
		accuracy: accuracy_label(score),
		matched_keywords: matched,
	}
}
