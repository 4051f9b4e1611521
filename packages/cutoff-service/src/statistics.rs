use cutoff_domain::{predicate::PredicateSet, statistics::Statistics};

use crate::{CutoffService, Resolution, strategy};

impl CutoffService {
	/// Precomputed statistics, or the record total alone when the procedure is unavailable.
	pub async fn summarize(&self) -> Resolution<Statistics> {
		strategy::resolve(
			"summarize",
			self.store.call_statistics_procedure(self.cfg.top_courses),
			|| self.count_all(),
		)
		.await
	}

	async fn count_all(&self) -> cutoff_storage::Result<Statistics> {
		let predicates = PredicateSet::default();
		let total = self.store.count_records(&predicates).await?;

		Ok(Statistics::degraded(total))
	}
}
