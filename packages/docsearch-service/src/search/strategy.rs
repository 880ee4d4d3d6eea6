use super::{Branch, Retrieval, filter, rerank};
use crate::{DocSearchService, Error, Result};
use docsearch_domain::keyword::{self, ClassifiedKeyword};
use docsearch_storage::filter::Predicate;

impl DocSearchService {
	/// Picks a retrieval path from the kinds of the given keywords and returns at most `top_k`
	/// ranked results.
	///
	/// Date keywords constrain a filtered vector search by equality, with at least one text
	/// keyword condition required when text keywords are also present. Text keywords alone
	/// filter by their disjunction. Without keywords the whole collection is searched. A filtered
	/// search that matches nothing falls back to plain semantic search.
	pub async fn retrieve(
		&self,
		question: &str,
		keywords: &[String],
		top_k: u32,
	) -> Result<Retrieval> {
		if top_k == 0 {
			return Err(Error::InvalidRequest {
				message: "top_k must be greater than zero.".to_string(),
			});
		}

		let keywords = keyword::normalize_keywords(keywords);
		let classified: Vec<ClassifiedKeyword> =
			keywords.iter().map(ClassifiedKeyword::new).collect();
		let lookup =
			self.search_many(&classified, u64::from(self.cfg.search.keyword_limit)).await?;
		let (date_keywords, text_keywords): (Vec<ClassifiedKeyword>, Vec<ClassifiedKeyword>) =
			classified.into_iter().partition(|keyword| {
				lookup.kinds.get(&keyword.raw).copied().unwrap_or(keyword.kind).is_date()
			});
		let text_keywords: Vec<String> =
			text_keywords.into_iter().map(|keyword| keyword.raw).collect();

		tracing::info!(
			date_keywords = ?date_keywords.iter().map(|keyword| keyword.raw.as_str()).collect::<Vec<_>>(),
			text_keywords = ?text_keywords,
			candidates = lookup.records.len(),
			"Classified search keywords."
		);

		let vector = self.embed_question(question).await?;
		let candidate_limit = u64::from(top_k) * u64::from(self.cfg.search.oversample_factor);
		let (branch, predicate) = if !date_keywords.is_empty() {
			(Branch::DateFiltered, Some(date_filter(&date_keywords, &text_keywords)))
		} else if !text_keywords.is_empty() {
			(Branch::TextFiltered, Some(text_filter(&text_keywords)))
		} else {
			(Branch::Unfiltered, None)
		};
		let top_k_len = top_k as usize;
		let results = match predicate {
			Some(predicate) => {
				let hits =
					self.store.filtered_vector_search(&predicate, &vector, candidate_limit).await?;

				if hits.is_empty() {
					tracing::info!(
						branch = ?branch,
						"Filtered search matched nothing. Falling back to semantic search."
					);

					let results = self.semantic_search_with_vector(&vector, top_k).await?;

					return Ok(Retrieval {
						branch: Branch::SemanticFallback,
						date_keywords,
						text_keywords,
						results,
					});
				}

				rerank(hits, &text_keywords, top_k_len)
			},
			None => {
				// Nothing can earn a bonus here, so `top_k` candidates already fix the order.
				let hits = self.store.unfiltered_vector_search(&vector, u64::from(top_k)).await?;

				rerank(hits, &keywords, top_k_len)
			},
		};

		tracing::info!(branch = ?branch, results = results.len(), "Retrieval finished.");

		Ok(Retrieval { branch, date_keywords, text_keywords, results })
	}
}

/// All date equalities, plus one conjunct requiring any text keyword condition when text
/// keywords are present.
pub(crate) fn date_filter(
	date_keywords: &[ClassifiedKeyword],
	text_keywords: &[String],
) -> Predicate {
	let mut must: Vec<Predicate> = date_keywords.iter().filter_map(filter::date_clause).collect();

	if !text_keywords.is_empty() {
		must.push(text_filter(text_keywords));
	}

	Predicate::All(must)
}

/// Any condition of any text keyword.
pub(crate) fn text_filter(text_keywords: &[String]) -> Predicate {
	Predicate::Any(
		text_keywords.iter().flat_map(|keyword| filter::text_clauses(keyword)).collect(),
	)
}
