mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Config, EmbeddingProviderConfig, LlmProviderConfig, Providers, Qdrant, Search, Service,
	Storage,
};

use std::{fs, path::Path};

use serde_json::{Map, Value};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.storage.qdrant.collection.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.qdrant.collection must be non-empty.".to_string(),
		});
	}
	for (label, provider_id) in [
		("providers.embedding.provider_id", &cfg.providers.embedding.provider_id),
		("providers.llm.provider_id", &cfg.providers.llm.provider_id),
	] {
		if provider_id.trim().is_empty() {
			return Err(Error::Validation { message: format!("{label} must be non-empty.") });
		}
	}

	if cfg.providers.embedding.dimensions == 0 {
		return Err(Error::Validation {
			message: "providers.embedding.dimensions must be greater than zero.".to_string(),
		});
	}
	if cfg.providers.embedding.dimensions != cfg.storage.qdrant.vector_dim {
		return Err(Error::Validation {
			message: "providers.embedding.dimensions must match storage.qdrant.vector_dim."
				.to_string(),
		});
	}

	for (label, timeout_ms) in [
		("providers.embedding.timeout_ms", cfg.providers.embedding.timeout_ms),
		("providers.llm.timeout_ms", cfg.providers.llm.timeout_ms),
	] {
		if timeout_ms == 0 {
			return Err(Error::Validation {
				message: format!("{label} must be greater than zero."),
			});
		}
	}

	let temperature = cfg.providers.llm.temperature;

	if !temperature.is_finite() {
		return Err(Error::Validation {
			message: "providers.llm.temperature must be a finite number.".to_string(),
		});
	}
	if !(0.0..=2.0).contains(&temperature) {
		return Err(Error::Validation {
			message: "providers.llm.temperature must be in the range 0.0-2.0.".to_string(),
		});
	}
	if cfg.providers.llm.keyword_max_tokens == 0 || cfg.providers.llm.summary_max_tokens == 0 {
		return Err(Error::Validation {
			message: "providers.llm token limits must be greater than zero.".to_string(),
		});
	}
	if cfg.search.top_k == 0 {
		return Err(Error::Validation {
			message: "search.top_k must be greater than zero.".to_string(),
		});
	}
	if cfg.search.oversample_factor == 0 {
		return Err(Error::Validation {
			message: "search.oversample_factor must be at least one.".to_string(),
		});
	}
	if cfg.search.keyword_limit == 0 {
		return Err(Error::Validation {
			message: "search.keyword_limit must be greater than zero.".to_string(),
		});
	}

	for (label, headers) in [
		("embedding", &cfg.providers.embedding.default_headers),
		("llm", &cfg.providers.llm.default_headers),
	] {
		if !headers_are_strings(headers) {
			return Err(Error::Validation {
				message: format!("Provider {label} default_headers values must be strings."),
			});
		}
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	normalize_optional(&mut cfg.storage.qdrant.vector_name);
	normalize_optional(&mut cfg.storage.qdrant.api_key);
	normalize_optional(&mut cfg.providers.embedding.api_key);
	normalize_optional(&mut cfg.providers.llm.api_key);
}

fn normalize_optional(value: &mut Option<String>) {
	if value.as_deref().map(|raw| raw.trim().is_empty()).unwrap_or(false) {
		*value = None;
	}
}

fn headers_are_strings(headers: &Map<String, Value>) -> bool {
	headers.values().all(Value::is_string)
}
