//! Cleanup for free-form language model output and for document text sent to the model.

use regex::Regex;

/// Returned instead of a summary when the source text carries nothing worth summarizing.
pub const NO_CONTENT: &str = "내용없음";

const MIN_SUMMARY_SOURCE_CHARS: usize = 30;
const THINK_BLOCK: &str = r"(?s)<think>.*?</think>";
const REASONING_TAIL: &str = r"(?i)(reasoning|analysis|step[- ]?by[- ]?step).*";
const MARKUP_TAG: &str = r"<[^>]+>";
const LABEL_TAIL: &str = r"(?i)(키워드|질문)\s*:.*";
const CONTROL_WHITESPACE: &str = r"[\r\n\t]";
const WHITESPACE_RUN: &str = r"\s+";
const SHORT_ASIDE: &str = r"\([^)]{0,30}\)";
const DECORATION: &str = r"[•★☆▶▲▼→※]";
const OFFICE_FILE_NAME: &str = r"\.(pptx|xlsx|docx|pdf)";

/// Removes `<think>` blocks and the rest of any line from a reasoning marker on.
pub fn strip_reasoning(text: &str) -> String {
	let text = replace_all(THINK_BLOCK, text.trim(), "");
	let text = replace_all(REASONING_TAIL, &text, "");

	text.trim().to_string()
}

/// Turns a raw comma-separated model completion into keyword tokens.
///
/// Only the first line is considered. Output mentioning `think` is treated as leaked reasoning
/// and yields no keywords.
pub fn clean_keywords(raw: &str) -> Vec<String> {
	let first_line = raw.trim().split('\n').next().unwrap_or_default();
	let cleaned = replace_all(MARKUP_TAG, first_line, "");
	let cleaned = replace_all(LABEL_TAIL, &cleaned, "");
	let cleaned = collapse_whitespace(&cleaned);

	if cleaned.to_lowercase().contains("think") {
		return Vec::new();
	}

	cleaned
		.split(',')
		.map(str::trim)
		.filter(|keyword| !keyword.is_empty())
		.map(ToString::to_string)
		.collect()
}

pub fn clean_article_text(text: &str) -> String {
	let text = text
		.replace(['\n', '\r'], " ")
		.replace(['\u{201C}', '\u{201D}'], "\"")
		.replace(['\u{2018}', '\u{2019}'], "'");
	let text = replace_all(SHORT_ASIDE, &text, "");
	let text = replace_all(DECORATION, &text, "");

	replace_all(WHITESPACE_RUN, &text, " ").trim().to_string()
}

pub fn clean_summary(text: &str) -> String {
	let text = replace_all(MARKUP_TAG, text, "");

	collapse_whitespace(&text)
}

/// Whether cleaned article text is too thin to be worth a model call.
pub fn lacks_summary_content(cleaned: &str) -> bool {
	cleaned.trim().is_empty()
		|| Regex::new(OFFICE_FILE_NAME).map(|re| re.is_match(cleaned)).unwrap_or(false)
		|| cleaned.chars().count() < MIN_SUMMARY_SOURCE_CHARS
}

fn collapse_whitespace(text: &str) -> String {
	let text = replace_all(CONTROL_WHITESPACE, text, " ");

	replace_all(WHITESPACE_RUN, &text, " ").trim().to_string()
}

fn replace_all(pattern: &str, text: &str, replacement: &str) -> String {
	Regex::new(pattern)
		.map(|re| re.replace_all(text, replacement).into_owned())
		.unwrap_or_else(|_| text.to_string())
}
