use std::sync::{
	Mutex,
	atomic::{AtomicUsize, Ordering},
};

use docsearch_domain::BoxFuture;
use docsearch_providers::{
	CompletionRequest, EmbeddingProvider, Error, LanguageModel, Result,
};

/// Embeds every text as the same vector and counts calls and releases.
pub struct StaticEmbedding {
	vector: Option<Vec<f32>>,
	calls: AtomicUsize,
	releases: AtomicUsize,
}
impl StaticEmbedding {
	pub fn new(vector: Vec<f32>) -> Self {
		Self { vector: Some(vector), calls: AtomicUsize::new(0), releases: AtomicUsize::new(0) }
	}

	/// An embedder whose every call fails.
	pub fn failing() -> Self {
		Self { vector: None, calls: AtomicUsize::new(0), releases: AtomicUsize::new(0) }
	}

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}

	pub fn releases(&self) -> usize {
		self.releases.load(Ordering::SeqCst)
	}
}
impl EmbeddingProvider for StaticEmbedding {
	fn embed<'a>(&'a self, texts: &'a [String]) -> BoxFuture<'a, Result<Vec<Vec<f32>>>> {
		Box::pin(async move {
			self.calls.fetch_add(1, Ordering::SeqCst);

			let Some(vector) = &self.vector else {
				return Err(Error::InvalidResponse {
					message: "Embedding backend unavailable.".to_string(),
				});
			};

			Ok(texts.iter().map(|_| vector.clone()).collect())
		})
	}

	fn release(&self) {
		self.releases.fetch_add(1, Ordering::SeqCst);
	}
}

/// Answers every completion with the same text, or fails, and keeps the requests it saw.
pub struct ScriptedLanguageModel {
	reply: Option<String>,
	requests: Mutex<Vec<CompletionRequest>>,
}
impl ScriptedLanguageModel {
	pub fn replying(reply: impl Into<String>) -> Self {
		Self { reply: Some(reply.into()), requests: Mutex::new(Vec::new()) }
	}

	pub fn failing() -> Self {
		Self { reply: None, requests: Mutex::new(Vec::new()) }
	}

	pub fn requests(&self) -> Vec<CompletionRequest> {
		self.requests.lock().unwrap_or_else(|err| err.into_inner()).clone()
	}
}
impl LanguageModel for ScriptedLanguageModel {
	fn complete<'a>(&'a self, request: &'a CompletionRequest) -> BoxFuture<'a, Result<String>> {
		Box::pin(async move {
			self.requests.lock().unwrap_or_else(|err| err.into_inner()).push(request.clone());

			self.reply.clone().ok_or_else(|| Error::InvalidResponse {
				message: "Completion backend unavailable.".to_string(),
			})
		})
	}
}
