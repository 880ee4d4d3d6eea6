use docsearch_domain::keyword::{ClassifiedKeyword, KeywordKind};
use docsearch_storage::filter::{Field, Predicate};

/// The store-side predicate for a single keyword lookup.
///
/// Date kinds become an equality on their numeric field. Text matches the file name exactly or
/// membership in the keyword tags.
pub fn keyword_filter(keyword: &ClassifiedKeyword) -> Predicate {
	match date_clause(keyword) {
		Some(clause) => clause,
		None => Predicate::Any(vec![
			Predicate::Exact { field: Field::FileName, value: keyword.raw.clone() },
			Predicate::AnyOf { field: Field::Keywords, values: vec![keyword.raw.clone()] },
		]),
	}
}

/// Equality on the date field matching the keyword's kind, or `None` for text keywords.
pub fn date_clause(keyword: &ClassifiedKeyword) -> Option<Predicate> {
	let field = match keyword.kind {
		KeywordKind::Year => Field::Year,
		KeywordKind::Month => Field::Month,
		KeywordKind::Day => Field::Day,
		KeywordKind::Text => return None,
	};

	keyword.value.map(|value| Predicate::Equals { field, value })
}

/// The three independent clauses a text keyword contributes to a filtered vector search:
/// exact file name, tag membership, and full-text match on the tags.
pub fn text_clauses(keyword: &str) -> [Predicate; 3] {
	[
		Predicate::Exact { field: Field::FileName, value: keyword.to_string() },
		Predicate::AnyOf { field: Field::Keywords, values: vec![keyword.to_string()] },
		Predicate::Text { field: Field::Keywords, value: keyword.to_string() },
	]
}
