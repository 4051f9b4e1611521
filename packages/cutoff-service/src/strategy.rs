use std::future::Future;

use tracing::{error, warn};

use crate::{Error, Result};

/// Outcome of a two-tier lookup, tagged with the strategy that produced it.
#[derive(Debug)]
pub enum Resolution<T> {
	Primary(T),
	Fallback(T),
	Failed(Error),
}
impl<T> Resolution<T> {
	pub fn into_result(self) -> Result<T> {
		match self {
			Self::Primary(value) | Self::Fallback(value) => Ok(value),
			Self::Failed(err) => Err(err),
		}
	}
}

/// Awaits `primary` once and, only if it fails, builds and awaits the fallback once.
pub async fn resolve<T, P, F, Fut>(
	operation: &'static str,
	primary: P,
	fallback: F,
) -> Resolution<T>
where
	P: Future<Output = cutoff_storage::Result<T>>,
	F: FnOnce() -> Fut,
	Fut: Future<Output = cutoff_storage::Result<T>>,
{
	let primary_err = match primary.await {
		Ok(value) => return Resolution::Primary(value),
		Err(err) => err,
	};

	warn!(operation, error = %primary_err, "Primary strategy failed; falling back.");

	match fallback().await {
		Ok(value) => Resolution::Fallback(value),
		Err(err) => {
			error!(operation, error = %err, "Fallback strategy failed.");

			Resolution::Failed(Error::UpstreamQuery { operation, message: err.to_string() })
		},
	}
}
