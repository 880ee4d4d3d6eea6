use serde::{Deserialize, Serialize};

use crate::DocSearchService;
use docsearch_domain::sanitize;
use docsearch_providers::CompletionRequest;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordExtraction {
	/// Model output after reasoning markup was stripped. Empty when the model call failed.
	pub raw: String,
	pub keywords: Vec<String>,
}

impl DocSearchService {
	/// Asks the language model for search keywords.
	///
	/// A failed call degrades to no keywords, which still yields a purely semantic search.
	pub async fn generate_keywords(&self, question: &str) -> KeywordExtraction {
		let request = CompletionRequest {
			prompt: keyword_prompt(question),
			max_tokens: self.cfg.providers.llm.keyword_max_tokens,
			stop: vec!["\n".to_string()],
		};

		match self.providers.llm.complete(&request).await {
			Ok(text) => {
				let raw = sanitize::strip_reasoning(&text);
				let keywords = sanitize::clean_keywords(&raw);

				KeywordExtraction { raw, keywords }
			},
			Err(err) => {
				tracing::warn!(error = %err, "Keyword generation failed. Continuing without keywords.");

				KeywordExtraction::default()
			},
		}
	}
}

fn keyword_prompt(question: &str) -> String {
	format!(
		"\
You generate search keywords for a Korean document archive.
Output only the core terms, separated by commas. Never add explanations, sentences, bullets, or \
<think> blocks.

Rules:
1. Write a year as exactly four digits (\"23년도\" becomes \"2023\").
2. Write months and days as bare numbers (\"1월\" becomes \"1\", \"15일\" becomes \"15\").
3. Never split a compound noun (\"설비기술그룹\", \"품질보증팀\" stay whole).
4. Keep meaningful noun units instead of cutting at spaces.
5. Use only commas between terms, with no spaces or commentary.
6. No special characters, quotes, periods, line breaks, or HTML tags.
7. No prefix such as \"키워드:\"; output the keywords alone.

Examples:
- Input: \"2024년 1월 설비기술그룹 활동 일지\"
  Output: 2024,1,설비기술그룹,활동,일지
- Input: \"2023년 3월 15일 고장 이력\"
  Output: 2023,3,15,고장,이력
- Input: \"설비고장 이력\"
  Output: 설비고장,이력

Question: {question}

Keywords:
"
	)
}
