use serde::{Deserialize, Serialize};
use tracing::Instrument;
use uuid::Uuid;

use crate::{Branch, DocSearchService, Error, RankedResult, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSearchRequest {
	pub question: String,
	/// Pre-extracted keywords. Generated from the question when absent.
	pub keywords: Option<Vec<String>>,
	pub top_k: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSearchResponse {
	pub trace_id: Uuid,
	pub keywords_raw: String,
	pub keywords: Vec<String>,
	pub branch: Branch,
	pub result_count: usize,
	pub documents: Vec<RankedResult>,
}

impl DocSearchService {
	pub async fn search_documents(
		&self,
		req: DocumentSearchRequest,
	) -> Result<DocumentSearchResponse> {
		let trace_id = Uuid::new_v4();
		let span = tracing::info_span!("search_documents", %trace_id);

		self.search_documents_inner(trace_id, req).instrument(span).await
	}

	async fn search_documents_inner(
		&self,
		trace_id: Uuid,
		req: DocumentSearchRequest,
	) -> Result<DocumentSearchResponse> {
		let question = req.question.trim();

		if question.is_empty() {
			return Err(Error::InvalidRequest { message: "question must be non-empty.".to_string() });
		}

		let top_k = req.top_k.unwrap_or(self.cfg.search.top_k);

		tracing::info!(question, top_k, "Document search request received.");

		let (keywords_raw, keywords) = match req.keywords {
			Some(keywords) => (keywords.join(","), keywords),
			None => {
				let extraction = self.generate_keywords(question).await;

				(extraction.raw, extraction.keywords)
			},
		};
		let retrieval = self.retrieve(question, &keywords, top_k).await?;

		tracing::info!(
			keywords = ?keywords,
			branch = ?retrieval.branch,
			result_count = retrieval.results.len(),
			"Document search finished."
		);

		Ok(DocumentSearchResponse {
			trace_id,
			keywords_raw,
			keywords,
			branch: retrieval.branch,
			result_count: retrieval.results.len(),
			documents: retrieval.results,
		})
	}
}
