use std::{future::Future, pin::Pin};

use cutoff_domain::{
	facet::FacetDimension,
	pagination::{Pagination, Window},
	params::RecordQuery,
	predicate::PredicateSet,
	record::RankRecord,
	sort::SortSpec,
	statistics::Statistics,
};

use crate::Result;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Page and metadata produced by the atomic page procedure in one round trip.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcedurePage {
	pub records: Vec<RankRecord>,
	pub pagination: Pagination,
}

/// The record store collaborator.
///
/// `call_*` methods run a named server-side procedure; the rest run predicate-filtered queries.
/// Implementations hold no per-request state.
pub trait RecordStore
where
	Self: Send + Sync,
{
	fn call_page_procedure<'a>(
		&'a self,
		query: &'a RecordQuery,
	) -> BoxFuture<'a, Result<ProcedurePage>>;

	/// Rows matching `predicates`, ordered by `sort`. `None` fetches every matching row.
	fn fetch_records<'a>(
		&'a self,
		predicates: &'a PredicateSet,
		sort: &'a SortSpec,
		window: Option<Window>,
	) -> BoxFuture<'a, Result<Vec<RankRecord>>>;

	fn count_records<'a>(&'a self, predicates: &'a PredicateSet) -> BoxFuture<'a, Result<u64>>;

	fn call_facet_procedure(
		&self,
		dimension: FacetDimension,
	) -> BoxFuture<'_, Result<Vec<String>>>;

	/// Non-null values of the dimension's column drawn from at most `sample_size` rows.
	fn sample_facet_values(
		&self,
		dimension: FacetDimension,
		sample_size: u32,
	) -> BoxFuture<'_, Result<Vec<String>>>;

	fn call_statistics_procedure(&self, top_courses: u32) -> BoxFuture<'_, Result<Statistics>>;
}
