use qdrant_client::qdrant::{
	Query, QueryPointsBuilder, ScoredPoint, VectorsOutput, vectors_output::VectorsOptions,
};

use crate::{
	DocumentStore, Result,
	filter::Predicate,
	models::{DocumentHit, DocumentPayload, DocumentRecord, PointKey},
};
use docsearch_domain::BoxFuture;

pub struct QdrantStore {
	pub client: qdrant_client::Qdrant,
	pub collection: String,
	pub vector_dim: u32,
	pub vector_name: Option<String>,
}
impl QdrantStore {
	pub fn new(cfg: &docsearch_config::Qdrant) -> Result<Self> {
		let client =
			qdrant_client::Qdrant::from_url(&cfg.url).api_key(cfg.api_key.clone()).build()?;

		Ok(Self {
			client,
			collection: cfg.collection.clone(),
			vector_dim: cfg.vector_dim,
			vector_name: cfg.vector_name.clone(),
		})
	}

	pub async fn search(
		&self,
		filter: Option<&Predicate>,
		vector: &[f32],
		limit: u64,
	) -> Result<Vec<DocumentHit>> {
		let mut search = QueryPointsBuilder::new(self.collection.clone())
			.query(Query::new_nearest(vector.to_vec()))
			.with_payload(true)
			.limit(limit);

		if let Some(name) = self.vector_name.as_ref() {
			search = search.using(name.clone());
		}
		if let Some(filter) = filter {
			search = search.filter(filter.to_qdrant());
		}

		let response = self.client.query(search).await?;

		Ok(response.result.into_iter().filter_map(into_hit).collect())
	}

	pub async fn lookup(&self, filter: &Predicate, limit: u64) -> Result<Vec<DocumentRecord>> {
		let lookup = QueryPointsBuilder::new(self.collection.clone())
			.filter(filter.to_qdrant())
			.with_payload(true)
			.with_vectors(true)
			.limit(limit);
		let response = self.client.query(lookup).await?;

		Ok(response
			.result
			.into_iter()
			.filter_map(|point| self.record_from_point(point))
			.collect())
	}

	fn record_from_point(&self, point: ScoredPoint) -> Option<DocumentRecord> {
		let id = point_key(&point)?;
		let vector = point
			.vectors
			.as_ref()
			.and_then(|vectors| dense_vector(vectors, self.vector_name.as_deref()))
			.unwrap_or_default();

		Some(DocumentRecord { id, payload: DocumentPayload::from_qdrant(&point.payload), vector })
	}
}

impl DocumentStore for QdrantStore {
	fn filtered_vector_search<'a>(
		&'a self,
		filter: &'a Predicate,
		vector: &'a [f32],
		limit: u64,
	) -> BoxFuture<'a, Result<Vec<DocumentHit>>> {
		Box::pin(self.search(Some(filter), vector, limit))
	}

	fn unfiltered_vector_search<'a>(
		&'a self,
		vector: &'a [f32],
		limit: u64,
	) -> BoxFuture<'a, Result<Vec<DocumentHit>>> {
		Box::pin(self.search(None, vector, limit))
	}

	fn metadata_only_search<'a>(
		&'a self,
		filter: &'a Predicate,
		limit: u64,
	) -> BoxFuture<'a, Result<Vec<DocumentRecord>>> {
		Box::pin(self.lookup(filter, limit))
	}
}

fn point_key(point: &ScoredPoint) -> Option<PointKey> {
	let key = point.id.as_ref().and_then(PointKey::from_point_id);

	if key.is_none() {
		tracing::warn!("Skipping point without a usable id.");
	}

	key
}

fn into_hit(point: ScoredPoint) -> Option<DocumentHit> {
	let id = point_key(&point)?;

	Some(DocumentHit { id, score: point.score, payload: DocumentPayload::from_qdrant(&point.payload) })
}

#[allow(deprecated)]
fn dense_vector(vectors: &VectorsOutput, name: Option<&str>) -> Option<Vec<f32>> {
	match (&vectors.vectors_options, name) {
		(Some(VectorsOptions::Vector(vector)), _) => Some(vector.data.clone()),
		(Some(VectorsOptions::Vectors(named)), Some(name)) =>
			named.vectors.get(name).map(|vector| vector.data.clone()),
		(Some(VectorsOptions::Vectors(named)), None) =>
			named.vectors.values().next().map(|vector| vector.data.clone()),
		(None, _) => None,
	}
}
