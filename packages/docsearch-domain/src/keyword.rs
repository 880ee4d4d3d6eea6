use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordKind {
	Year,
	Month,
	Day,
	Text,
}
impl KeywordKind {
	pub fn is_date(self) -> bool {
		matches!(self, Self::Year | Self::Month | Self::Day)
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Year => "year",
			Self::Month => "month",
			Self::Day => "day",
			Self::Text => "text",
		}
	}
}

/// A keyword token together with the kind it classified as.
///
/// `value` carries the parsed numeral for date kinds so filter construction never re-parses the
/// raw token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedKeyword {
	pub raw: String,
	pub kind: KeywordKind,
	pub value: Option<i64>,
}
impl ClassifiedKeyword {
	pub fn new(raw: impl Into<String>) -> Self {
		let raw = raw.into();
		let (kind, value) = classify_with_value(&raw);

		Self { raw, kind, value }
	}
}

/// Classifies a keyword token.
///
/// Rules run in a fixed order: a four-digit numeral is a year, then a numeral in 1..=12 is a
/// month, then a numeral in 1..=31 is a day. Everything else is free text.
pub fn classify(token: &str) -> KeywordKind {
	classify_with_value(token).0
}

/// Trims tokens, drops blanks and repeats, and keeps first-seen order.
pub fn normalize_keywords<S>(tokens: &[S]) -> Vec<String>
where
	S: AsRef<str>,
{
	let mut out: Vec<String> = Vec::with_capacity(tokens.len());

	for token in tokens {
		let token = token.as_ref().trim();

		if token.is_empty() || out.iter().any(|seen| seen == token) {
			continue;
		}

		out.push(token.to_string());
	}

	out
}

fn classify_with_value(token: &str) -> (KeywordKind, Option<i64>) {
	if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
		return (KeywordKind::Text, None);
	}

	let Ok(number) = token.parse::<i64>() else {
		return (KeywordKind::Text, None);
	};

	if token.len() == 4 {
		return (KeywordKind::Year, Some(number));
	}
	if (1..=12).contains(&number) {
		return (KeywordKind::Month, Some(number));
	}
	if (1..=31).contains(&number) {
		return (KeywordKind::Day, Some(number));
	}

	(KeywordKind::Text, None)
}
