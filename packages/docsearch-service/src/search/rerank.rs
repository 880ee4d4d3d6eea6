use std::cmp::Ordering;

use super::{RankedResult, ranked_result, round_to};
use docsearch_storage::models::DocumentHit;

const FIRST_BONUS_HUNDREDTHS: usize = 5;
const MIN_BONUS_HUNDREDTHS: usize = 1;
const SCORE_DECIMALS: i32 = 5;

/// Bonus for the `rank`-th keyword a document matched, counting from zero: 0.05, 0.04, 0.03,
/// 0.02, then 0.01 for every further match.
pub fn keyword_bonus(rank: usize) -> f64 {
	let hundredths = FIRST_BONUS_HUNDREDTHS.saturating_sub(rank).max(MIN_BONUS_HUNDREDTHS);

	hundredths as f64 / 100.0
}

/// Adds keyword-overlap bonuses to raw similarity scores, sorts best first, and keeps `top_k`.
///
/// A keyword matches a hit when it is a substring of the file name or equals one of the
/// document's tags. Each hit is scored on its own. Ordering uses the score as it is reported,
/// rounded to five decimals, and hits that tie there keep their input order.
pub fn rerank(hits: Vec<DocumentHit>, text_keywords: &[String], top_k: usize) -> Vec<RankedResult> {
	let mut scored: Vec<(f64, Vec<String>, DocumentHit)> = hits
		.into_iter()
		.map(|hit| {
			let matched = matched_keywords(&hit, text_keywords);
			let bonus: f64 = (0..matched.len()).map(keyword_bonus).sum();
			let score = f64::from(hit.score) + bonus;

			if !matched.is_empty() {
				tracing::debug!(
					file_name = %hit.payload.file_name,
					matched = ?matched,
					score,
					"Applied keyword bonus."
				);
			}

			(score, matched, hit)
		})
		.collect();

	scored.sort_by(|a, b| {
		cmp_score_desc(round_to(a.0, SCORE_DECIMALS), round_to(b.0, SCORE_DECIMALS))
	});
	scored.truncate(top_k);

	scored
		.into_iter()
		.map(|(score, matched, hit)| ranked_result(hit, score, matched))
		.collect()
}

fn matched_keywords(hit: &DocumentHit, text_keywords: &[String]) -> Vec<String> {
	text_keywords
		.iter()
		.filter(|keyword| {
			hit.payload.file_name.contains(keyword.as_str())
				|| hit.payload.keywords.iter().any(|tag| tag == *keyword)
		})
		.cloned()
		.collect()
}

fn cmp_score_desc(a: f64, b: f64) -> Ordering {
	b.total_cmp(&a)
}
