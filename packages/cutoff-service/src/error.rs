pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Upstream query failed in {operation}: {message}")]
	UpstreamQuery { operation: &'static str, message: String },
}
