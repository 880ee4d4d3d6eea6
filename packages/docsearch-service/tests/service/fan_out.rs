use std::{
	collections::HashSet,
	sync::{
		Arc,
		atomic::{AtomicUsize, Ordering},
	},
	time::Duration,
};

use super::{VECTOR_DIM, archive, archive_harness, classified, harness, question_vector, strings};
use docsearch_domain::{BoxFuture, keyword::KeywordKind};
use docsearch_service::{DocSearchService, Error, Providers};
use docsearch_storage::{
	DocumentStore,
	filter::Predicate,
	models::{DocumentHit, DocumentRecord, PointKey},
};
use docsearch_testkit::{
	InMemoryStore, ScriptedLanguageModel, StaticEmbedding, StoreCall, StoreOp,
};

fn keys(ids: &[u64]) -> HashSet<PointKey> {
	ids.iter().map(|id| PointKey::Num(*id)).collect()
}

#[tokio::test]
async fn empty_keyword_list_issues_no_lookups() {
	let harness = archive_harness();
	let lookup = harness.service.search_many(&[], 200).await.expect("Fan-out failed.");

	assert!(lookup.ids.is_empty());
	assert!(lookup.records.is_empty());
	assert!(lookup.kinds.is_empty());
	assert_eq!(harness.store.count(StoreOp::Metadata), 0);
}

#[tokio::test]
async fn lookups_stay_keyed_by_keyword_and_records_are_unioned() {
	let harness = archive_harness();
	let lookup = harness
		.service
		.search_many(&classified(&["2024", "설비"]), 200)
		.await
		.expect("Fan-out failed.");

	assert_eq!(lookup.ids.get("2024"), Some(&keys(&[1, 2, 5])));
	assert_eq!(lookup.ids.get("설비"), Some(&keys(&[1, 2])));
	assert_eq!(lookup.records.keys().cloned().collect::<HashSet<_>>(), keys(&[1, 2, 5]));
	assert_eq!(lookup.kinds.get("2024"), Some(&KeywordKind::Year));
	assert_eq!(lookup.kinds.get("설비"), Some(&KeywordKind::Text));
	assert_eq!(harness.store.count(StoreOp::Metadata), 2);
}

#[tokio::test]
async fn lookups_carry_the_per_keyword_limit() {
	let harness = archive_harness();

	harness.service.search_many(&classified(&["고장"]), 7).await.expect("Fan-out failed.");

	let calls = harness.store.calls();

	assert!(matches!(calls.as_slice(), [StoreCall::Metadata { limit: 7, .. }]));
}

#[tokio::test]
async fn single_lookup_reports_its_kind() {
	let harness = archive_harness();
	let matches = harness
		.service
		.search_one(&classified(&["3"])[0], 200)
		.await
		.expect("Lookup failed.");

	assert_eq!(matches.kind, KeywordKind::Month);
	assert_eq!(matches.ids, keys(&[2]));
}

#[tokio::test]
async fn repeated_keywords_are_looked_up_once() {
	let harness = archive_harness();
	let lookup = harness
		.service
		.search_many(&classified(&["설비", "설비"]), 200)
		.await
		.expect("Fan-out failed.");

	assert_eq!(lookup.ids.len(), 1);
	assert_eq!(harness.store.count(StoreOp::Metadata), 1);
}

#[tokio::test]
async fn any_failed_lookup_fails_the_fan_out() {
	let harness = harness(
		InMemoryStore::new(archive()).failing(StoreOp::Metadata),
		StaticEmbedding::new(question_vector()),
		ScriptedLanguageModel::failing(),
	);
	let err = harness
		.service
		.search_many(&classified(&["2024", "설비"]), 200)
		.await
		.expect_err("Expected the fan-out to fail.");

	assert!(matches!(err, Error::StoreUnavailable { .. }));
	assert_eq!(harness.store.count(StoreOp::Metadata), 2);
}

#[tokio::test]
async fn failed_lookup_aborts_retrieval_before_embedding() {
	let harness = harness(
		InMemoryStore::new(archive()).failing(StoreOp::Metadata),
		StaticEmbedding::new(question_vector()),
		ScriptedLanguageModel::failing(),
	);
	let err = harness
		.service
		.retrieve(super::QUESTION, &strings(&["2024", "설비"]), 5)
		.await
		.expect_err("Expected retrieval to fail.");

	assert!(matches!(err, Error::StoreUnavailable { .. }));
	assert_eq!(harness.embedding.calls(), 0);
	assert_eq!(harness.store.count(StoreOp::Filtered), 0);
}

/// Panics on lookups for `붕괴` and finishes every other lookup after a short delay.
#[derive(Default)]
struct CrashingStore {
	finished: AtomicUsize,
}
impl DocumentStore for CrashingStore {
	fn filtered_vector_search<'a>(
		&'a self,
		_filter: &'a Predicate,
		_vector: &'a [f32],
		_limit: u64,
	) -> BoxFuture<'a, docsearch_storage::Result<Vec<DocumentHit>>> {
		Box::pin(async { Ok(Vec::new()) })
	}

	fn unfiltered_vector_search<'a>(
		&'a self,
		_vector: &'a [f32],
		_limit: u64,
	) -> BoxFuture<'a, docsearch_storage::Result<Vec<DocumentHit>>> {
		Box::pin(async { Ok(Vec::new()) })
	}

	fn metadata_only_search<'a>(
		&'a self,
		filter: &'a Predicate,
		_limit: u64,
	) -> BoxFuture<'a, docsearch_storage::Result<Vec<DocumentRecord>>> {
		Box::pin(async move {
			if format!("{filter:?}").contains("붕괴") {
				panic!("Lookup crashed.");
			}

			tokio::time::sleep(Duration::from_millis(20)).await;
			self.finished.fetch_add(1, Ordering::SeqCst);

			Ok(Vec::new())
		})
	}
}

#[tokio::test]
async fn crashed_lookup_waits_for_the_others_before_failing() {
	let store = Arc::new(CrashingStore::default());
	let dyn_store: Arc<dyn DocumentStore> = store.clone();
	let providers = Providers::new(
		Arc::new(StaticEmbedding::new(question_vector())),
		Arc::new(ScriptedLanguageModel::failing()),
	);
	let service =
		DocSearchService::new(docsearch_testkit::test_config(VECTOR_DIM), dyn_store, providers);
	let err = service
		.search_many(&classified(&["붕괴", "설비", "2024"]), 200)
		.await
		.expect_err("Expected the crashed lookup to fail the fan-out.");

	assert!(matches!(err, Error::Internal { .. }));
	assert_eq!(store.finished.load(Ordering::SeqCst), 2);
}
