pub mod filter;
pub mod models;
pub mod qdrant;
pub mod schema;

mod error;

pub use error::Error;

use docsearch_domain::BoxFuture;

use crate::{
	filter::Predicate,
	models::{DocumentHit, DocumentRecord},
};

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Read-only access to the vector and metadata index.
///
/// Implementations surface connectivity and timeout failures as errors and never retry.
pub trait DocumentStore
where
	Self: Send + Sync,
{
	/// Nearest neighbours of `vector` among documents satisfying `filter`, best first.
	fn filtered_vector_search<'a>(
		&'a self,
		filter: &'a Predicate,
		vector: &'a [f32],
		limit: u64,
	) -> BoxFuture<'a, Result<Vec<DocumentHit>>>;

	/// Nearest neighbours of `vector` across the whole collection, best first.
	fn unfiltered_vector_search<'a>(
		&'a self,
		vector: &'a [f32],
		limit: u64,
	) -> BoxFuture<'a, Result<Vec<DocumentHit>>>;

	/// Documents satisfying `filter` with their stored vectors, in store order.
	fn metadata_only_search<'a>(
		&'a self,
		filter: &'a Predicate,
		limit: u64,
	) -> BoxFuture<'a, Result<Vec<DocumentRecord>>>;
}
