use std::{
	collections::{HashMap, HashSet},
	sync::Arc,
};

use tokio::task::JoinSet;

use super::filter;
use crate::{DocSearchService, Error, Result};
use docsearch_domain::keyword::{ClassifiedKeyword, KeywordKind};
use docsearch_storage::{
	DocumentStore,
	models::{DocumentRecord, PointKey},
};

/// Result of one keyword's metadata lookup.
#[derive(Debug, Clone)]
pub struct KeywordMatches {
	pub ids: HashSet<PointKey>,
	pub records: HashMap<PointKey, DocumentRecord>,
	pub kind: KeywordKind,
}

/// Per-keyword lookups gathered by the fan-out.
///
/// `ids` and `kinds` stay keyed by the keyword that produced them; `records` is the union of all
/// lookups.
#[derive(Debug, Clone, Default)]
pub struct KeywordLookup {
	pub ids: HashMap<String, HashSet<PointKey>>,
	pub records: HashMap<PointKey, DocumentRecord>,
	pub kinds: HashMap<String, KeywordKind>,
}

impl DocSearchService {
	/// Runs the metadata lookup for a single classified keyword.
	pub async fn search_one(
		&self,
		keyword: &ClassifiedKeyword,
		limit: u64,
	) -> Result<KeywordMatches> {
		lookup_keyword(self.store.as_ref(), keyword, limit).await
	}

	/// Runs one lookup per keyword concurrently and waits for all of them before merging.
	///
	/// Any failed lookup fails the whole fan-out. Repeated keywords are looked up once.
	pub async fn search_many(
		&self,
		keywords: &[ClassifiedKeyword],
		limit_per_keyword: u64,
	) -> Result<KeywordLookup> {
		if keywords.is_empty() {
			return Ok(KeywordLookup::default());
		}

		let mut tasks = JoinSet::new();
		let mut seen = HashSet::new();

		for (index, keyword) in keywords.iter().enumerate() {
			if !seen.insert(keyword.raw.as_str()) {
				continue;
			}

			let store = Arc::clone(&self.store);
			let keyword = keyword.clone();

			tasks.spawn(async move {
				let matches = lookup_keyword(store.as_ref(), &keyword, limit_per_keyword).await;

				(index, keyword.raw, matches)
			});
		}

		let mut outcomes = Vec::with_capacity(tasks.len());
		let mut join_failure = None;

		// Every lookup settles before any outcome is inspected.
		while let Some(joined) = tasks.join_next().await {
			match joined {
				Ok(outcome) => outcomes.push(outcome),
				Err(err) => {
					tracing::error!(error = %err, "Keyword lookup task failed.");

					join_failure.get_or_insert(Error::Internal { message: err.to_string() });
				},
			}
		}

		if let Some(err) = join_failure {
			return Err(err);
		}

		outcomes.sort_by_key(|(index, _, _)| *index);

		let mut lookup = KeywordLookup::default();

		for (_, raw, matches) in outcomes {
			let matches = matches?;

			lookup.kinds.insert(raw.clone(), matches.kind);
			lookup.records.extend(matches.records);
			lookup.ids.insert(raw, matches.ids);
		}

		Ok(lookup)
	}
}

async fn lookup_keyword(
	store: &dyn DocumentStore,
	keyword: &ClassifiedKeyword,
	limit: u64,
) -> Result<KeywordMatches> {
	let predicate = filter::keyword_filter(keyword);
	let records = store.metadata_only_search(&predicate, limit).await?;
	let ids: HashSet<PointKey> = records.iter().map(|record| record.id.clone()).collect();
	let records = records.into_iter().map(|record| (record.id.clone(), record)).collect();

	tracing::debug!(
		keyword = %keyword.raw,
		kind = keyword.kind.as_str(),
		matches = ids.len(),
		"Keyword lookup finished."
	);

	Ok(KeywordMatches { ids, records, kind: keyword.kind })
}
