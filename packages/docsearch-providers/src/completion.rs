use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::{Error, LanguageModel, Result};
use docsearch_config::LlmProviderConfig;
use docsearch_domain::BoxFuture;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
	pub prompt: String,
	pub max_tokens: u32,
	pub stop: Vec<String>,
}

/// Client for a vLLM-style `/v1/completions` endpoint.
pub struct HttpLanguageModel {
	cfg: LlmProviderConfig,
	client: Client,
}
impl HttpLanguageModel {
	pub fn new(cfg: LlmProviderConfig) -> Result<Self> {
		let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;

		Ok(Self { cfg, client })
	}

	pub async fn complete_text(&self, request: &CompletionRequest) -> Result<String> {
		let url = format!("{}{}", self.cfg.api_base, self.cfg.path);
		let mut body = serde_json::json!({
			"model": self.cfg.model,
			"prompt": request.prompt.trim(),
			"max_tokens": request.max_tokens,
			"temperature": self.cfg.temperature,
		});

		if !request.stop.is_empty() {
			body["stop"] = serde_json::json!(request.stop);
		}

		let res = self
			.client
			.post(url)
			.headers(crate::auth_headers(self.cfg.api_key.as_deref(), &self.cfg.default_headers)?)
			.json(&body)
			.send()
			.await?;
		let json: Value = res.error_for_status()?.json().await?;

		parse_completion_response(&json)
	}
}

impl LanguageModel for HttpLanguageModel {
	fn complete<'a>(&'a self, request: &'a CompletionRequest) -> BoxFuture<'a, Result<String>> {
		Box::pin(self.complete_text(request))
	}
}

fn parse_completion_response(json: &Value) -> Result<String> {
	json.get("choices")
		.and_then(|v| v.as_array())
		.and_then(|choices| choices.first())
		.and_then(|choice| choice.get("text"))
		.and_then(|text| text.as_str())
		.map(|text| text.trim().to_string())
		.ok_or_else(|| Error::InvalidResponse {
			message: "Completion response is missing choice text.".to_string(),
		})
}
