use cutoff_domain::{
	pagination::Pagination, params::RecordQuery, predicate::PredicateSet, record::RankRecord,
	statistics::Statistics,
};

use crate::{CutoffService, Resolution, strategy};

#[derive(Debug, Clone, PartialEq)]
pub struct RecordPage {
	pub records: Vec<RankRecord>,
	pub pagination: Pagination,
}

impl CutoffService {
	/// One page of matching records and the pagination computed from the same predicates.
	pub async fn fetch_page(&self, query: &RecordQuery) -> Resolution<RecordPage> {
		strategy::resolve("fetch_page", self.fetch_page_by_procedure(query), || {
			self.fetch_page_by_queries(query)
		})
		.await
	}

	/// A record page and the statistics summary line, resolved concurrently and independently.
	pub async fn fetch_page_with_summary(
		&self,
		query: &RecordQuery,
	) -> (Resolution<RecordPage>, Resolution<Statistics>) {
		tokio::join!(self.fetch_page(query), self.summarize())
	}

	async fn fetch_page_by_procedure(
		&self,
		query: &RecordQuery,
	) -> cutoff_storage::Result<RecordPage> {
		let page = self.store.call_page_procedure(query).await?;

		Ok(RecordPage {
			records: page.records,
			pagination: Pagination::for_request(query.page, page.pagination.total),
		})
	}

	async fn fetch_page_by_queries(&self, query: &RecordQuery) -> cutoff_storage::Result<RecordPage> {
		let predicates = PredicateSet::from_criteria(&query.criteria);
		let (records, total) = tokio::join!(
			self.store.fetch_records(&predicates, &query.criteria.sort, Some(query.page.window())),
			self.store.count_records(&predicates),
		);

		Ok(RecordPage { records: records?, pagination: Pagination::for_request(query.page, total?) })
	}
}
