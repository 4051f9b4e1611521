use cutoff_domain::{
	facet::FacetDimension, pagination::Window, params::RecordQuery, predicate::PredicateSet,
	record::RankRecord, sort::SortSpec, statistics::Statistics,
};

use crate::{BoxFuture, ProcedurePage, RecordStore, Result, db::Db, procedures, queries};

/// [`RecordStore`] backed by the Postgres pool.
pub struct PgStore {
	pub db: Db,
}
impl PgStore {
	pub fn new(db: Db) -> Self {
		Self { db }
	}
}
impl RecordStore for PgStore {
	fn call_page_procedure<'a>(
		&'a self,
		query: &'a RecordQuery,
	) -> BoxFuture<'a, Result<ProcedurePage>> {
		Box::pin(procedures::get_cet_data(&self.db.pool, query))
	}

	fn fetch_records<'a>(
		&'a self,
		predicates: &'a PredicateSet,
		sort: &'a SortSpec,
		window: Option<Window>,
	) -> BoxFuture<'a, Result<Vec<RankRecord>>> {
		Box::pin(queries::fetch_records(&self.db.pool, predicates, sort, window))
	}

	fn count_records<'a>(&'a self, predicates: &'a PredicateSet) -> BoxFuture<'a, Result<u64>> {
		Box::pin(queries::count_records(&self.db.pool, predicates))
	}

	fn call_facet_procedure(
		&self,
		dimension: FacetDimension,
	) -> BoxFuture<'_, Result<Vec<String>>> {
		Box::pin(procedures::get_unique_values(&self.db.pool, dimension))
	}

	fn sample_facet_values(
		&self,
		dimension: FacetDimension,
		sample_size: u32,
	) -> BoxFuture<'_, Result<Vec<String>>> {
		Box::pin(queries::sample_facet_values(&self.db.pool, dimension, sample_size))
	}

	fn call_statistics_procedure(&self, top_courses: u32) -> BoxFuture<'_, Result<Statistics>> {
		Box::pin(procedures::get_database_statistics(&self.db.pool, top_courses))
	}
}
