pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Store unavailable: {message}")]
	StoreUnavailable { message: String },
	#[error("Embedding failed: {message}")]
	Embedding { message: String },
	#[error("Internal error: {message}")]
	Internal { message: String },
}
impl From<docsearch_storage::Error> for Error {
	fn from(err: docsearch_storage::Error) -> Self {
		Self::StoreUnavailable { message: err.to_string() }
	}
}
