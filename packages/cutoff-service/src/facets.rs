use cutoff_domain::facet::{FacetDimension, FacetOptionSet};

use crate::{CutoffService, Resolution, strategy};

impl CutoffService {
	/// Option lists for every facet. A single failed procedure discards all procedure results.
	pub async fn list_facet_values(&self) -> Resolution<FacetOptionSet> {
		strategy::resolve("list_facet_values", self.facets_by_procedures(), || {
			self.facets_by_samples()
		})
		.await
	}

	async fn facets_by_procedures(&self) -> cutoff_storage::Result<FacetOptionSet> {
		let [courses, institutes, universities, categories, rounds] =
			FacetDimension::ALL.map(|dimension| self.store.call_facet_procedure(dimension));
		let (courses, institutes, universities, categories, rounds) =
			tokio::join!(courses, institutes, universities, categories, rounds);

		Ok(FacetOptionSet::from_raw([courses?, institutes?, universities?, categories?, rounds?]))
	}

	async fn facets_by_samples(&self) -> cutoff_storage::Result<FacetOptionSet> {
		let sample_size = self.cfg.facet_sample_size;
		let [courses, institutes, universities, categories, rounds] = FacetDimension::ALL
			.map(|dimension| self.store.sample_facet_values(dimension, sample_size));
		let (courses, institutes, universities, categories, rounds) =
			tokio::join!(courses, institutes, universities, categories, rounds);

		Ok(FacetOptionSet::from_raw([courses?, institutes?, universities?, categories?, rounds?]))
	}
}
