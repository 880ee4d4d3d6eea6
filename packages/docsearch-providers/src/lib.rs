pub mod completion;
pub mod embedding;

mod error;

pub use completion::{CompletionRequest, HttpLanguageModel};
pub use embedding::HttpEmbedding;
pub use error::{Error, Result};

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde_json::{Map, Value};

use docsearch_domain::BoxFuture;

/// Turns text into fixed-dimension vectors. Identical input yields identical vectors.
pub trait EmbeddingProvider
where
	Self: Send + Sync,
{
	fn embed<'a>(&'a self, texts: &'a [String]) -> BoxFuture<'a, Result<Vec<Vec<f32>>>>;

	/// Releases accelerator memory held after a batch. Called once per scoped embedding call,
	/// on success and failure alike.
	fn release(&self) {}
}

/// Plain-text completion over a network boundary.
pub trait LanguageModel
where
	Self: Send + Sync,
{
	fn complete<'a>(&'a self, request: &'a CompletionRequest) -> BoxFuture<'a, Result<String>>;
}

pub fn auth_headers(api_key: Option<&str>, default_headers: &Map<String, Value>) -> Result<HeaderMap> {
	let mut headers = HeaderMap::new();

	headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

	if let Some(api_key) = api_key {
		headers.insert(AUTHORIZATION, format!("Bearer {api_key}").parse()?);
	}

	for (key, value) in default_headers {
		let Some(raw) = value.as_str() else {
			return Err(Error::InvalidConfig {
				message: "Default header values must be strings.".to_string(),
			});
		};

		headers.insert(HeaderName::from_bytes(key.as_bytes())?, raw.parse()?);
	}

	Ok(headers)
}
