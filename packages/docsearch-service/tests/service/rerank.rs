use super::strings;
use docsearch_service::search::{keyword_bonus, rerank, to_ranked};
use docsearch_storage::models::{DocumentHit, DocumentPayload, PointKey};

fn hit(id: u64, score: f32, file_name: &str, keywords: &[&str]) -> DocumentHit {
	DocumentHit {
		id: PointKey::Num(id),
		score,
		payload: DocumentPayload {
			doc_id: format!("doc-{id}"),
			file_name: file_name.to_string(),
			keywords: strings(keywords),
			..Default::default()
		},
	}
}

#[test]
fn bonus_sequence_decays_to_a_floor() {
	assert_eq!(keyword_bonus(0), 0.05);
	assert_eq!(keyword_bonus(3), 0.02);
	assert_eq!(keyword_bonus(4), 0.01);
	assert_eq!(keyword_bonus(40), 0.01);
}

#[test]
fn three_matches_add_twelve_hundredths() {
	let results = rerank(
		vec![hit(1, 0.5, "설비 고장 보고서", &["점검"])],
		&strings(&["설비", "고장", "점검"]),
		10,
	);

	assert_eq!(results.len(), 1);
	assert_eq!(results[0].score, 0.62);
	assert_eq!(results[0].accuracy, "62.00%");
	assert_eq!(results[0].matched_keywords, strings(&["설비", "고장", "점검"]));
}

#[test]
fn tags_match_by_equality_and_file_names_by_substring() {
	let results = rerank(
		vec![hit(1, 0.5, "설비기술그룹 일지", &["설비기술"])],
		&strings(&["설비", "설비기술", "기술그"]),
		10,
	);

	assert_eq!(results[0].matched_keywords, strings(&["설비", "설비기술", "기술그"]));

	let results = rerank(vec![hit(2, 0.5, "일지", &["설비기술그룹"])], &strings(&["설비"]), 10);

	assert!(results[0].matched_keywords.is_empty());
	assert_eq!(results[0].score, 0.5);
}

#[test]
fn bonuses_can_reorder_and_results_are_truncated() {
	let results = rerank(
		vec![
			hit(1, 0.80, "회의록", &[]),
			hit(2, 0.78, "설비 점검", &["고장"]),
			hit(3, 0.60, "기타", &[]),
		],
		&strings(&["설비", "고장"]),
		2,
	);
	let ids: Vec<PointKey> = results.iter().map(|result| result.id.clone()).collect();

	assert_eq!(ids, vec![PointKey::Num(2), PointKey::Num(1)]);
	assert!(results.windows(2).all(|pair| pair[0].score >= pair[1].score));
}

#[test]
fn ties_keep_input_order() {
	let results = rerank(
		vec![hit(7, 0.5, "a", &[]), hit(3, 0.5, "b", &[]), hit(5, 0.5, "c", &[])],
		&[],
		3,
	);
	let ids: Vec<PointKey> = results.iter().map(|result| result.id.clone()).collect();

	assert_eq!(ids, vec![PointKey::Num(7), PointKey::Num(3), PointKey::Num(5)]);
}

#[test]
fn scores_equal_after_rounding_keep_input_order() {
	let results = rerank(
		vec![hit(4, 0.500_001, "a", &[]), hit(8, 0.500_004, "b", &[])],
		&[],
		2,
	);
	let ids: Vec<PointKey> = results.iter().map(|result| result.id.clone()).collect();

	assert_eq!(ids, vec![PointKey::Num(4), PointKey::Num(8)]);
	assert_eq!(results[0].score, results[1].score);
}

#[test]
fn empty_hits_rerank_to_nothing() {
	assert!(rerank(Vec::new(), &strings(&["설비"]), 5).is_empty());
}

#[test]
fn semantic_results_carry_the_raw_score() {
	let result = to_ranked(hit(9, 0.123_456, "문서", &["설비"]));

	assert_eq!(result.score, 0.12346);
	assert_eq!(result.accuracy, "12.35%");
	assert!(result.matched_keywords.is_empty());
	assert_eq!(result.date, format!("{}-{}-{}", "----", "--", "--"));
}
