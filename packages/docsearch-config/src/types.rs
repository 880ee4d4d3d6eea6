use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub providers: Providers,
	#[serde(default)]
	pub search: Search,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	pub http_bind: String,
	#[serde(default = "default_log_level")]
	pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Storage {
	pub qdrant: Qdrant,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Qdrant {
	pub url: String,
	pub collection: String,
	pub vector_dim: u32,
	/// Optional. Named dense vector to query; the collection's default vector is used when unset.
	pub vector_name: Option<String>,
	pub api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Providers {
	pub embedding: EmbeddingProviderConfig,
	pub llm: LlmProviderConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: Option<String>,
	pub path: String,
	pub model: String,
	pub dimensions: u32,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: Option<String>,
	pub path: String,
	pub model: String,
	pub temperature: f32,
	pub timeout_ms: u64,
	#[serde(default = "default_keyword_max_tokens")]
	pub keyword_max_tokens: u32,
	#[serde(default = "default_summary_max_tokens")]
	pub summary_max_tokens: u32,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Search {
	/// Result cap applied when a request does not carry its own.
	pub top_k: u32,
	/// Candidate multiplier for keyword-filtered vector searches so keyword bonuses can reorder
	/// before truncation. Unfiltered searches fetch exactly `top_k`.
	pub oversample_factor: u32,
	/// Per-keyword cap for the metadata lookups run by the keyword fan-out.
	pub keyword_limit: u32,
}
impl Default for Search {
	fn default() -> Self {
		Self { top_k: 30, oversample_factor: 10, keyword_limit: 200 }
	}
}

fn default_log_level() -> String {
	"info".to_string()
}

fn default_keyword_max_tokens() -> u32 {
	64
}

fn default_summary_max_tokens() -> u32 {
	512
}
