use super::{RankedResult, ranked_result};
use crate::{DocSearchService, Result};
use docsearch_storage::models::DocumentHit;

impl DocSearchService {
	/// Plain nearest-neighbour search over the whole collection with no keyword adjustment.
	pub async fn semantic_search(&self, question: &str, top_k: u32) -> Result<Vec<RankedResult>> {
		let vector = self.embed_question(question).await?;

		self.semantic_search_with_vector(&vector, top_k).await
	}

	pub(crate) async fn semantic_search_with_vector(
		&self,
		vector: &[f32],
		top_k: u32,
	) -> Result<Vec<RankedResult>> {
		let hits = self.store.unfiltered_vector_search(vector, u64::from(top_k)).await?;

		Ok(hits.into_iter().map(to_ranked).collect())
	}
}

/// Maps a raw hit to a result carrying the store's similarity, rounded to five decimals.
pub fn to_ranked(hit: DocumentHit) -> RankedResult {
	let score = f64::from(hit.score);

	ranked_result(hit, score, Vec::new())
}
