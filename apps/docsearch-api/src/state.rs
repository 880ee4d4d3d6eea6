use std::sync::{Arc, atomic::AtomicUsize};

use docsearch_service::{DocSearchService, Providers};
use docsearch_storage::qdrant::QdrantStore;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<DocSearchService>,
	/// Requests currently being handled. Logged only; never used to refuse work.
	pub in_flight: Arc<AtomicUsize>,
}
impl AppState {
	pub fn new(service: DocSearchService) -> Self {
		Self { service: Arc::new(service), in_flight: Arc::new(AtomicUsize::new(0)) }
	}

	/// Connects the Qdrant store and the HTTP model providers named in `config`.
	pub fn from_config(config: docsearch_config::Config) -> color_eyre::Result<Self> {
		let store = QdrantStore::new(&config.storage.qdrant)?;
		let providers = Providers::from_config(&config.providers)?;

		Ok(Self::new(DocSearchService::new(config, Arc::new(store), providers)))
	}
}
