pub mod documents;
pub mod embedding;
pub mod keywords;
pub mod search;
pub mod summarize;

mod error;

pub use docsearch_domain::BoxFuture;
pub use documents::{DocumentSearchRequest, DocumentSearchResponse};
pub use error::{Error, Result};
pub use keywords::KeywordExtraction;
pub use search::{Branch, KeywordLookup, KeywordMatches, RankedResult, Retrieval};
pub use summarize::{SummarizeRequest, SummarizeResponse};

use std::sync::Arc;

use docsearch_config::Config;
use docsearch_providers::{EmbeddingProvider, HttpEmbedding, HttpLanguageModel, LanguageModel};
use docsearch_storage::DocumentStore;

#[derive(Clone)]
pub struct Providers {
	pub embedding: Arc<dyn EmbeddingProvider>,
	pub llm: Arc<dyn LanguageModel>,
}
impl Providers {
	pub fn new(embedding: Arc<dyn EmbeddingProvider>, llm: Arc<dyn LanguageModel>) -> Self {
		Self { embedding, llm }
	}

	/// HTTP-backed providers for the configured endpoints.
	pub fn from_config(cfg: &docsearch_config::Providers) -> docsearch_providers::Result<Self> {
		let embedding = HttpEmbedding::new(cfg.embedding.clone())?;
		let llm = HttpLanguageModel::new(cfg.llm.clone())?;

		tracing::info!(
			embedding_provider = %cfg.embedding.provider_id,
			embedding_model = %cfg.embedding.model,
			llm_provider = %cfg.llm.provider_id,
			llm_model = %cfg.llm.model,
			"Model providers configured."
		);

		Ok(Self::new(Arc::new(embedding), Arc::new(llm)))
	}
}

/// Document retrieval over an injected store, embedder, and language model.
///
/// Holds no per-request state; one instance serves concurrent requests.
pub struct DocSearchService {
	pub cfg: Config,
	pub store: Arc<dyn DocumentStore>,
	pub providers: Providers,
}
impl DocSearchService {
	pub fn new(cfg: Config, store: Arc<dyn DocumentStore>, providers: Providers) -> Self {
		Self { cfg, store, providers }
	}
}
