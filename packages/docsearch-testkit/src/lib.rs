//! In-process collaborators for exercising the retrieval service without Qdrant or model servers.

pub mod providers;
pub mod store;

pub use providers::{ScriptedLanguageModel, StaticEmbedding};
pub use store::{DocumentFixture, InMemoryStore, StoreCall, StoreOp};

use serde_json::Map;

use docsearch_config::{
	Config, EmbeddingProviderConfig, LlmProviderConfig, Providers, Qdrant, Search, Service, Storage,
};

/// A valid configuration pointing at unroutable endpoints, with `vector_dim` wired through both
/// the store and the embedding provider.
pub fn test_config(vector_dim: u32) -> Config {
	Config {
		service: Service { http_bind: "127.0.0.1:0".to_string(), log_level: "debug".to_string() },
		storage: Storage {
			qdrant: Qdrant {
				url: "http://127.0.0.1:1".to_string(),
				collection: "docsearch_test".to_string(),
				vector_dim,
				vector_name: None,
				api_key: None,
			},
		},
		providers: Providers {
			embedding: EmbeddingProviderConfig {
				provider_id: "test".to_string(),
				api_base: "http://127.0.0.1:1".to_string(),
				api_key: None,
				path: "/v1/embeddings".to_string(),
				model: "test-embedding".to_string(),
				dimensions: vector_dim,
				timeout_ms: 1_000,
				default_headers: Map::new(),
			},
			llm: LlmProviderConfig {
				provider_id: "test".to_string(),
				api_base: "http://127.0.0.1:1".to_string(),
				api_key: None,
				path: "/v1/completions".to_string(),
				model: "test-llm".to_string(),
				temperature: 0.0,
				timeout_ms: 1_000,
				keyword_max_tokens: 64,
				summary_max_tokens: 512,
				default_headers: Map::new(),
			},
		},
		search: Search::default(),
	}
}
