use super::{QUESTION, VECTOR_DIM, archive, archive_harness, harness, question_vector, strings};
use docsearch_domain::keyword::KeywordKind;
use docsearch_service::{Branch, Error, RankedResult};
use docsearch_storage::models::PointKey;
use docsearch_testkit::{
	InMemoryStore, ScriptedLanguageModel, StaticEmbedding, StoreCall, StoreOp,
};

fn ids(results: &[RankedResult]) -> Vec<PointKey> {
	results.iter().map(|result| result.id.clone()).collect()
}

fn nums(ids: &[u64]) -> Vec<PointKey> {
	ids.iter().map(|id| PointKey::Num(*id)).collect()
}

#[tokio::test]
async fn date_and_text_keywords_require_both() {
	let harness = archive_harness();
	let retrieval = harness
		.service
		.retrieve(QUESTION, &strings(&["2024", "1", "설비", "고장"]), 5)
		.await
		.expect("Retrieval failed.");

	assert_eq!(retrieval.branch, Branch::DateFiltered);
	assert_eq!(
		retrieval.date_keywords.iter().map(|keyword| keyword.kind).collect::<Vec<_>>(),
		vec![KeywordKind::Year, KeywordKind::Month]
	);
	assert_eq!(retrieval.text_keywords, strings(&["설비", "고장"]));
	// Page 5 is from January 2024 but carries neither text keyword.
	assert_eq!(ids(&retrieval.results), nums(&[1]));
	assert_eq!(retrieval.results[0].matched_keywords, strings(&["설비", "고장"]));
	assert_eq!(retrieval.results[0].date, "2024-1-10");

	let semantic =
		harness.service.semantic_search(QUESTION, 5).await.expect("Semantic search failed.");
	let raw = semantic
		.iter()
		.find(|result| result.id == PointKey::Num(1))
		.map(|result| result.score)
		.expect("Page 1 missing from semantic results.");

	assert!((retrieval.results[0].score - raw - 0.09).abs() < 1e-4);
}

#[tokio::test]
async fn filtered_search_oversamples_by_the_configured_factor() {
	let harness = archive_harness();

	harness
		.service
		.retrieve(QUESTION, &strings(&["2024", "설비"]), 5)
		.await
		.expect("Retrieval failed.");

	let filtered: Vec<StoreCall> = harness
		.store
		.calls()
		.into_iter()
		.filter(|call| call.op() == StoreOp::Filtered)
		.collect();

	assert!(matches!(filtered.as_slice(), [StoreCall::Filtered { limit: 50, .. }]));
	assert_eq!(harness.store.count(StoreOp::Unfiltered), 0);
}

#[tokio::test]
async fn date_keywords_alone_filter_by_date() {
	let harness = archive_harness();
	let retrieval = harness
		.service
		.retrieve(QUESTION, &strings(&["2024"]), 5)
		.await
		.expect("Retrieval failed.");

	assert_eq!(retrieval.branch, Branch::DateFiltered);
	assert!(retrieval.text_keywords.is_empty());
	assert_eq!(ids(&retrieval.results), nums(&[5, 1, 2]));
	assert!(retrieval.results.iter().all(|result| result.matched_keywords.is_empty()));
}

#[tokio::test]
async fn text_keywords_alone_filter_by_their_disjunction() {
	let harness = archive_harness();
	let retrieval = harness
		.service
		.retrieve(QUESTION, &strings(&["고장"]), 5)
		.await
		.expect("Retrieval failed.");

	assert_eq!(retrieval.branch, Branch::TextFiltered);
	assert!(retrieval.date_keywords.is_empty());
	assert_eq!(ids(&retrieval.results), nums(&[1, 3]));
	assert!(
		retrieval.results.iter().all(|result| result.matched_keywords == strings(&["고장"]))
	);
}

#[tokio::test]
async fn no_keywords_search_the_whole_collection() {
	let harness = archive_harness();
	let retrieval =
		harness.service.retrieve(QUESTION, &[], 2).await.expect("Retrieval failed.");

	assert_eq!(retrieval.branch, Branch::Unfiltered);
	assert_eq!(ids(&retrieval.results), nums(&[5, 1]));
	assert!(matches!(harness.store.calls().as_slice(), [StoreCall::Unfiltered { limit: 2 }]));
}

#[tokio::test]
async fn blank_and_repeated_keywords_are_dropped() {
	let harness = archive_harness();
	let retrieval = harness
		.service
		.retrieve(QUESTION, &strings(&[" 설비 ", "", "설비", "  "]), 5)
		.await
		.expect("Retrieval failed.");

	assert_eq!(retrieval.branch, Branch::TextFiltered);
	assert_eq!(retrieval.text_keywords, strings(&["설비"]));
	assert_eq!(harness.store.count(StoreOp::Metadata), 1);
}

#[tokio::test]
async fn unmatched_date_falls_back_to_semantic_search() {
	let harness = archive_harness();
	let retrieval = harness
		.service
		.retrieve(QUESTION, &strings(&["2099"]), 3)
		.await
		.expect("Retrieval failed.");

	assert_eq!(retrieval.branch, Branch::SemanticFallback);
	assert_eq!(harness.store.count(StoreOp::Filtered), 1);
	assert_eq!(harness.store.count(StoreOp::Unfiltered), 1);
	assert_eq!(harness.embedding.calls(), 1);

	let semantic =
		harness.service.semantic_search(QUESTION, 3).await.expect("Semantic search failed.");

	assert_eq!(retrieval.results, semantic);
	assert_eq!(ids(&semantic), nums(&[5, 1, 2]));
	assert!(semantic.iter().all(|result| result.matched_keywords.is_empty()));
}

#[tokio::test]
async fn unmatched_date_and_text_skip_straight_to_semantic_search() {
	let harness = archive_harness();
	let retrieval = harness
		.service
		.retrieve(QUESTION, &strings(&["2024", "배관"]), 3)
		.await
		.expect("Retrieval failed.");

	assert_eq!(retrieval.branch, Branch::SemanticFallback);
	// No second filtered search on the dates alone, although they match pages 1, 2 and 5.
	assert_eq!(harness.store.count(StoreOp::Filtered), 1);
	assert_eq!(harness.store.count(StoreOp::Unfiltered), 1);

	let semantic =
		harness.service.semantic_search(QUESTION, 3).await.expect("Semantic search failed.");

	assert_eq!(retrieval.results, semantic);
}

#[tokio::test]
async fn unmatched_text_falls_back_to_semantic_search() {
	let harness = archive_harness();
	let retrieval = harness
		.service
		.retrieve(QUESTION, &strings(&["배관"]), 2)
		.await
		.expect("Retrieval failed.");

	assert_eq!(retrieval.branch, Branch::SemanticFallback);
	assert_eq!(ids(&retrieval.results), nums(&[5, 1]));
}

#[tokio::test]
async fn zero_top_k_is_rejected() {
	let harness = archive_harness();
	let err = harness
		.service
		.retrieve(QUESTION, &strings(&["설비"]), 0)
		.await
		.expect_err("Expected top_k = 0 to be rejected.");

	assert!(matches!(err, Error::InvalidRequest { .. }));
	assert!(harness.store.calls().is_empty());
}

#[tokio::test]
async fn embedding_is_released_after_a_successful_search() {
	let harness = archive_harness();

	harness
		.service
		.retrieve(QUESTION, &strings(&["고장"]), 5)
		.await
		.expect("Retrieval failed.");

	assert_eq!(harness.embedding.calls(), 1);
	assert_eq!(harness.embedding.releases(), 1);
}

#[tokio::test]
async fn embedding_is_released_when_the_provider_fails() {
	let harness = harness(
		InMemoryStore::new(archive()),
		StaticEmbedding::failing(),
		ScriptedLanguageModel::failing(),
	);
	let err = harness
		.service
		.retrieve(QUESTION, &strings(&["고장"]), 5)
		.await
		.expect_err("Expected embedding to fail.");

	assert!(matches!(err, Error::Embedding { .. }));
	assert_eq!(harness.embedding.releases(), 1);
	assert_eq!(harness.store.count(StoreOp::Filtered), 0);
}

#[tokio::test]
async fn embedding_dimension_mismatch_is_an_embedding_error() {
	let harness = harness(
		InMemoryStore::new(archive()),
		StaticEmbedding::new(vec![1.0; VECTOR_DIM as usize + 1]),
		ScriptedLanguageModel::failing(),
	);
	let err = harness
		.service
		.embed_question(QUESTION)
		.await
		.expect_err("Expected a dimension mismatch.");

	assert!(matches!(err, Error::Embedding { .. }));
	assert_eq!(harness.embedding.releases(), 1);
}

#[tokio::test]
async fn filtered_search_failure_is_store_unavailable() {
	let harness = harness(
		InMemoryStore::new(archive()).failing(StoreOp::Filtered),
		StaticEmbedding::new(question_vector()),
		ScriptedLanguageModel::failing(),
	);
	let err = harness
		.service
		.retrieve(QUESTION, &strings(&["고장"]), 5)
		.await
		.expect_err("Expected the filtered search to fail.");

	assert!(matches!(err, Error::StoreUnavailable { .. }));
	assert_eq!(harness.store.count(StoreOp::Unfiltered), 0);
}
