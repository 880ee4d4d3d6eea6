use docsearch_providers::EmbeddingProvider;

use crate::{DocSearchService, Error, Result};

/// Holds the embedding provider for the span of one call and releases its accelerator memory
/// when dropped, whichever way the call ends.
pub struct EmbeddingScope<'a> {
	provider: &'a dyn EmbeddingProvider,
}
impl<'a> EmbeddingScope<'a> {
	pub fn acquire(provider: &'a dyn EmbeddingProvider) -> Self {
		Self { provider }
	}

	pub async fn embed(&self, texts: &[String]) -> docsearch_providers::Result<Vec<Vec<f32>>> {
		self.provider.embed(texts).await
	}
}
impl Drop for EmbeddingScope<'_> {
	fn drop(&mut self) {
		self.provider.release();
	}
}

impl DocSearchService {
	pub async fn embed_question(&self, question: &str) -> Result<Vec<f32>> {
		let scope = EmbeddingScope::acquire(self.providers.embedding.as_ref());
		let embeddings = scope
			.embed(std::slice::from_ref(&question.to_string()))
			.await
			.map_err(|err| Error::Embedding { message: err.to_string() })?;
		let vector = embeddings.into_iter().next().ok_or_else(|| Error::Embedding {
			message: "Embedding provider returned no vectors.".to_string(),
		})?;

		if vector.len() != self.cfg.storage.qdrant.vector_dim as usize {
			return Err(Error::Embedding {
				message: "Embedding vector dimension mismatch.".to_string(),
			});
		}

		Ok(vector)
	}
}
