use std::sync::Mutex;

use docsearch_domain::BoxFuture;
use docsearch_storage::{
	DocumentStore, Error, Result,
	filter::Predicate,
	models::{DocumentHit, DocumentPayload, DocumentRecord, PointKey},
};

/// The three store operations, for failure injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
	Filtered,
	Unfiltered,
	Metadata,
}

/// One recorded store invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
	Filtered { predicate: Predicate, limit: u64 },
	Unfiltered { limit: u64 },
	Metadata { predicate: Predicate, limit: u64 },
}
impl StoreCall {
	pub fn op(&self) -> StoreOp {
		match self {
			Self::Filtered { .. } => StoreOp::Filtered,
			Self::Unfiltered { .. } => StoreOp::Unfiltered,
			Self::Metadata { .. } => StoreOp::Metadata,
		}
	}
}

/// A [`DocumentStore`] over a fixed list of records.
///
/// Similarity is cosine; predicates are evaluated with [`Predicate::matches`]. Every call is
/// recorded, including calls that were made to fail.
#[derive(Default)]
pub struct InMemoryStore {
	records: Vec<DocumentRecord>,
	failing: Vec<StoreOp>,
	calls: Mutex<Vec<StoreCall>>,
}
impl InMemoryStore {
	pub fn new(records: Vec<DocumentRecord>) -> Self {
		Self { records, failing: Vec::new(), calls: Mutex::new(Vec::new()) }
	}

	/// Makes every call of `op` fail with [`Error::Unavailable`].
	pub fn failing(mut self, op: StoreOp) -> Self {
		self.failing.push(op);

		self
	}

	pub fn calls(&self) -> Vec<StoreCall> {
		self.calls.lock().unwrap_or_else(|err| err.into_inner()).clone()
	}

	pub fn count(&self, op: StoreOp) -> usize {
		self.calls().iter().filter(|call| call.op() == op).count()
	}

	fn record(&self, call: StoreCall) -> Result<()> {
		let op = call.op();

		self.calls.lock().unwrap_or_else(|err| err.into_inner()).push(call);

		if self.failing.contains(&op) {
			return Err(Error::Unavailable { message: format!("{op:?} search refused.") });
		}

		Ok(())
	}

	fn nearest<'a>(
		&self,
		records: impl Iterator<Item = &'a DocumentRecord>,
		vector: &[f32],
		limit: u64,
	) -> Vec<DocumentHit> {
		let mut hits: Vec<DocumentHit> = records
			.map(|record| DocumentHit {
				id: record.id.clone(),
				score: cosine(&record.vector, vector),
				payload: record.payload.clone(),
			})
			.collect();

		hits.sort_by(|a, b| b.score.total_cmp(&a.score));
		hits.truncate(limit as usize);

		hits
	}
}
impl DocumentStore for InMemoryStore {
	fn filtered_vector_search<'a>(
		&'a self,
		filter: &'a Predicate,
		vector: &'a [f32],
		limit: u64,
	) -> BoxFuture<'a, Result<Vec<DocumentHit>>> {
		Box::pin(async move {
			self.record(StoreCall::Filtered { predicate: filter.clone(), limit })?;

			Ok(self.nearest(
				self.records.iter().filter(|record| filter.matches(&record.payload)),
				vector,
				limit,
			))
		})
	}

	fn unfiltered_vector_search<'a>(
		&'a self,
		vector: &'a [f32],
		limit: u64,
	) -> BoxFuture<'a, Result<Vec<DocumentHit>>> {
		Box::pin(async move {
			self.record(StoreCall::Unfiltered { limit })?;

			Ok(self.nearest(self.records.iter(), vector, limit))
		})
	}

	fn metadata_only_search<'a>(
		&'a self,
		filter: &'a Predicate,
		limit: u64,
	) -> BoxFuture<'a, Result<Vec<DocumentRecord>>> {
		Box::pin(async move {
			self.record(StoreCall::Metadata { predicate: filter.clone(), limit })?;

			Ok(self
				.records
				.iter()
				.filter(|record| filter.matches(&record.payload))
				.take(limit as usize)
				.cloned()
				.collect())
		})
	}
}

/// Builds a stored document with a numeric id.
pub struct DocumentFixture {
	record: DocumentRecord,
}
impl DocumentFixture {
	pub fn new(id: u64, file_name: &str, vector: Vec<f32>) -> Self {
		Self {
			record: DocumentRecord {
				id: PointKey::Num(id),
				payload: DocumentPayload {
					doc_id: format!("doc-{id}"),
					file_name: file_name.to_string(),
					page: Some(1),
					grade: "A".to_string(),
					file_path: format!("/archive/{file_name}"),
					..Default::default()
				},
				vector,
			},
		}
	}

	pub fn date(mut self, year: Option<i64>, month: Option<i64>, day: Option<i64>) -> Self {
		self.record.payload.year = year;
		self.record.payload.month = month;
		self.record.payload.day = day;

		self
	}

	pub fn keywords(mut self, keywords: &[&str]) -> Self {
		self.record.payload.keywords = keywords.iter().map(|keyword| keyword.to_string()).collect();

		self
	}

	pub fn build(self) -> DocumentRecord {
		self.record
	}
}

fn cosine(a: &[f32], b: &[f32]) -> f32 {
	let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
	let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
	let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();

	if norm_a == 0.0 || norm_b == 0.0 {
		return 0.0;
	}

	dot / (norm_a * norm_b)
}
