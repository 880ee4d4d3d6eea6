//! Store-neutral filter predicates over document payload fields.

use qdrant_client::qdrant::{Condition, Filter};

use crate::{models::DocumentPayload, schema};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
	DocId,
	FileName,
	FilePath,
	Page,
	Grade,
	Year,
	Month,
	Day,
	Keywords,
}
impl Field {
	pub fn key(self) -> &'static str {
		match self {
			Self::DocId => schema::DOC_ID,
			Self::FileName => schema::FILE_NAME,
			Self::FilePath => schema::FILE_PATH,
			Self::Page => schema::PAGE,
			Self::Grade => schema::GRADE,
			Self::Year => schema::YEAR,
			Self::Month => schema::MONTH,
			Self::Day => schema::DAY,
			Self::Keywords => schema::KEYWORDS,
		}
	}
}

#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
	/// Numeric field equals `value`.
	Equals { field: Field, value: i64 },
	/// String field, or any element of a string list field, equals `value` exactly.
	Exact { field: Field, value: String },
	/// String field, or any element of a string list field, is one of `values`.
	AnyOf { field: Field, values: Vec<String> },
	/// Full-text match of `value` against a string field or string list field.
	Text { field: Field, value: String },
	All(Vec<Predicate>),
	Any(Vec<Predicate>),
}
impl Predicate {
	pub fn to_qdrant(&self) -> Filter {
		match self {
			Self::All(predicates) => Filter::all(predicates.iter().map(Self::to_condition)),
			Self::Any(predicates) => Filter::any(predicates.iter().map(Self::to_condition)),
			single => Filter::all([single.to_condition()]),
		}
	}

	/// Evaluates the predicate against a decoded payload.
	///
	/// Full-text matching is approximated by substring containment.
	pub fn matches(&self, payload: &DocumentPayload) -> bool {
		match self {
			Self::Equals { field, value } => numeric_field(payload, *field) == Some(*value),
			Self::Exact { field, value } =>
				text_field(payload, *field).iter().any(|candidate| candidate == value),
			Self::AnyOf { field, values } => text_field(payload, *field)
				.iter()
				.any(|candidate| values.iter().any(|value| candidate == value)),
			Self::Text { field, value } =>
				text_field(payload, *field).iter().any(|candidate| candidate.contains(value.as_str())),
			Self::All(predicates) => predicates.iter().all(|predicate| predicate.matches(payload)),
			Self::Any(predicates) => predicates.iter().any(|predicate| predicate.matches(payload)),
		}
	}

	fn to_condition(&self) -> Condition {
		match self {
			Self::Equals { field, value } => Condition::matches(field.key(), *value),
			Self::Exact { field, value } => Condition::matches(field.key(), value.clone()),
			Self::AnyOf { field, values } => Condition::matches(field.key(), values.clone()),
			Self::Text { field, value } => Condition::matches_text(field.key(), value.clone()),
			Self::All(_) | Self::Any(_) => Condition::from(self.to_qdrant()),
		}
	}
}

fn numeric_field(payload: &DocumentPayload, field: Field) -> Option<i64> {
	match field {
		Field::Page => payload.page,
		Field::Year => payload.year,
		Field::Month => payload.month,
		Field::Day => payload.day,
		_ => None,
	}
}

fn text_field(payload: &DocumentPayload, field: Field) -> Vec<&str> {
	match field {
		Field::DocId => vec![payload.doc_id.as_str()],
		Field::FileName => vec![payload.file_name.as_str()],
		Field::FilePath => vec![payload.file_path.as_str()],
		Field::Grade => vec![payload.grade.as_str()],
		Field::Keywords => payload.keywords.iter().map(String::as_str).collect(),
		Field::Page | Field::Year | Field::Month | Field::Day => Vec::new(),
	}
}
