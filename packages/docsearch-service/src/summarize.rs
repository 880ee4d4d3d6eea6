use serde::{Deserialize, Serialize};

use crate::{DocSearchService, Error, Result};
use docsearch_domain::sanitize;
use docsearch_providers::CompletionRequest;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizeRequest {
	pub content: String,
	pub question: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarizeResponse {
	/// `None` when the language model could not produce a summary.
	pub summary: Option<String>,
}

impl DocSearchService {
	pub async fn summarize_article(&self, req: SummarizeRequest) -> Result<SummarizeResponse> {
		if req.content.is_empty() {
			return Err(Error::InvalidRequest { message: "content must be non-empty.".to_string() });
		}

		tracing::info!(
			content_chars = req.content.chars().count(),
			has_question = req.question.is_some(),
			"Summarize request received."
		);

		let summary = self.summarize(&req.content, req.question.as_deref()).await;

		Ok(SummarizeResponse { summary })
	}

	/// Summarizes document text in at most three sentences.
	///
	/// Text too thin to summarize yields the no-content marker without a model call. A failed
	/// model call yields `None`.
	pub async fn summarize(&self, content: &str, question: Option<&str>) -> Option<String> {
		let cleaned = sanitize::clean_article_text(content);

		if sanitize::lacks_summary_content(&cleaned) {
			return Some(sanitize::NO_CONTENT.to_string());
		}

		let request = CompletionRequest {
			prompt: summary_prompt(&cleaned, question),
			max_tokens: self.cfg.providers.llm.summary_max_tokens,
			stop: Vec::new(),
		};

		match self.providers.llm.complete(&request).await {
			Ok(text) => Some(sanitize::clean_summary(&sanitize::strip_reasoning(&text))),
			Err(err) => {
				tracing::warn!(error = %err, "Summarization failed.");

				None
			},
		}
	}
}

fn summary_prompt(cleaned: &str, question: Option<&str>) -> String {
	let focus = question
		.map(str::trim)
		.filter(|question| !question.is_empty())
		.map(|question| format!("- Focus on what answers this question: {question}\n"))
		.unwrap_or_default();

	format!(
		"\
The text below is a technical document or record sheet.
State its key content in at most three concise sentences.

Conditions:
- Do not use the word \"요약\".
- Do not repeat the same fact or number.
- Write natural Korean.
- If the text is empty or meaningless, answer only \"{no_content}\".
{focus}
[Text]
{cleaned}
",
		no_content = sanitize::NO_CONTENT,
	)
}
