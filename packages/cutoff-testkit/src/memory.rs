use std::{
	collections::{BTreeSet, HashMap, HashSet},
	sync::atomic::{AtomicUsize, Ordering},
};

use cutoff_domain::{
	facet::FacetDimension,
	pagination::{Pagination, Window},
	params::RecordQuery,
	predicate::PredicateSet,
	record::{Field, FieldValue, RankRecord},
	sort::SortSpec,
	statistics::{CourseFrequency, PercentileRange, RankRange, Statistics},
};
use cutoff_storage::{BoxFuture, Error, ProcedurePage, RecordStore, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
	PageProcedure,
	FetchRecords,
	CountRecords,
	FacetProcedure,
	SampleFacetValues,
	StatisticsProcedure,
}
impl Operation {
	const ALL: [Self; 6] = [
		Self::PageProcedure,
		Self::FetchRecords,
		Self::CountRecords,
		Self::FacetProcedure,
		Self::SampleFacetValues,
		Self::StatisticsProcedure,
	];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::PageProcedure => "page_procedure",
			Self::FetchRecords => "fetch_records",
			Self::CountRecords => "count_records",
			Self::FacetProcedure => "facet_procedure",
			Self::SampleFacetValues => "sample_facet_values",
			Self::StatisticsProcedure => "statistics_procedure",
		}
	}
}

/// In-memory [`RecordStore`] that evaluates predicates and sorts the way Postgres does.
///
/// Failures are injected per operation before the store is shared; every call is counted,
/// including failed ones.
#[derive(Debug, Default)]
pub struct MemoryStore {
	records: Vec<RankRecord>,
	failing: HashSet<Operation>,
	failing_facets: HashSet<FacetDimension>,
	calls: HashMap<Operation, AtomicUsize>,
}
impl MemoryStore {
	pub fn new(records: Vec<RankRecord>) -> Self {
		let calls = Operation::ALL.into_iter().map(|op| (op, AtomicUsize::new(0))).collect();

		Self { records, calls, ..Self::default() }
	}

	pub fn failing(mut self, operation: Operation) -> Self {
		self.failing.insert(operation);

		self
	}

	/// Fails the facet procedure for `dimension` only.
	pub fn failing_facet(mut self, dimension: FacetDimension) -> Self {
		self.failing_facets.insert(dimension);

		self
	}

	/// Fails every procedure, leaving only the query paths available.
	pub fn without_procedures(self) -> Self {
		self.failing(Operation::PageProcedure)
			.failing(Operation::FacetProcedure)
			.failing(Operation::StatisticsProcedure)
	}

	pub fn records(&self) -> &[RankRecord] {
		&self.records
	}

	pub fn calls(&self, operation: Operation) -> usize {
		self.calls.get(&operation).map(|count| count.load(Ordering::SeqCst)).unwrap_or_default()
	}

	fn enter(&self, operation: Operation) -> Result<()> {
		if let Some(count) = self.calls.get(&operation) {
			count.fetch_add(1, Ordering::SeqCst);
		}

		if self.failing.contains(&operation) {
			return Err(unavailable(operation.as_str()));
		}

		Ok(())
	}

	fn select(&self, predicates: &PredicateSet, sort: &SortSpec) -> Vec<RankRecord> {
		let mut rows: Vec<RankRecord> =
			self.records.iter().filter(|record| predicates.matches(record)).cloned().collect();

		rows.sort_by(|left, right| sort.compare(left, right));

		rows
	}

	fn page(&self, query: &RecordQuery) -> Result<ProcedurePage> {
		self.enter(Operation::PageProcedure)?;

		let predicates = PredicateSet::from_criteria(&query.criteria);
		let rows = self.select(&predicates, &query.criteria.sort);
		let total = rows.len() as u64;

		Ok(ProcedurePage {
			records: query.page.window().apply(rows),
			pagination: Pagination::for_request(query.page, total),
		})
	}

	fn fetch(
		&self,
		predicates: &PredicateSet,
		sort: &SortSpec,
		window: Option<Window>,
	) -> Result<Vec<RankRecord>> {
		self.enter(Operation::FetchRecords)?;

		let rows = self.select(predicates, sort);

		Ok(match window {
			Some(window) => window.apply(rows),
			None => rows,
		})
	}

	fn count(&self, predicates: &PredicateSet) -> Result<u64> {
		self.enter(Operation::CountRecords)?;

		Ok(self.records.iter().filter(|record| predicates.matches(record)).count() as u64)
	}

	fn facet(&self, dimension: FacetDimension) -> Result<Vec<String>> {
		self.enter(Operation::FacetProcedure)?;

		if self.failing_facets.contains(&dimension) {
			return Err(unavailable(dimension.procedure()));
		}

		let distinct: BTreeSet<String> = self
			.records
			.iter()
			.filter_map(|record| record.field(dimension.field()).map(label))
			.filter(|value| !value.trim().is_empty())
			.collect();

		Ok(distinct.into_iter().collect())
	}

	fn sample(&self, dimension: FacetDimension, sample_size: u32) -> Result<Vec<String>> {
		self.enter(Operation::SampleFacetValues)?;

		Ok(self
			.records
			.iter()
			.filter_map(|record| record.field(dimension.field()).map(label))
			.take(sample_size as usize)
			.collect())
	}

	fn statistics(&self, top_courses: u32) -> Result<Statistics> {
		self.enter(Operation::StatisticsProcedure)?;

		Ok(summarize(&self.records, top_courses as usize))
	}
}
impl RecordStore for MemoryStore {
	fn call_page_procedure<'a>(
		&'a self,
		query: &'a RecordQuery,
	) -> BoxFuture<'a, Result<ProcedurePage>> {
		Box::pin(async move { self.page(query) })
	}

	fn fetch_records<'a>(
		&'a self,
		predicates: &'a PredicateSet,
		sort: &'a SortSpec,
		window: Option<Window>,
	) -> BoxFuture<'a, Result<Vec<RankRecord>>> {
		Box::pin(async move { self.fetch(predicates, sort, window) })
	}

	fn count_records<'a>(&'a self, predicates: &'a PredicateSet) -> BoxFuture<'a, Result<u64>> {
		Box::pin(async move { self.count(predicates) })
	}

	fn call_facet_procedure(
		&self,
		dimension: FacetDimension,
	) -> BoxFuture<'_, Result<Vec<String>>> {
		Box::pin(async move { self.facet(dimension) })
	}

	fn sample_facet_values(
		&self,
		dimension: FacetDimension,
		sample_size: u32,
	) -> BoxFuture<'_, Result<Vec<String>>> {
		Box::pin(async move { self.sample(dimension, sample_size) })
	}

	fn call_statistics_procedure(&self, top_courses: u32) -> BoxFuture<'_, Result<Statistics>> {
		Box::pin(async move { self.statistics(top_courses) })
	}
}

/// Statistics computed the same way the statistics procedure does.
pub fn summarize(records: &[RankRecord], top_courses: usize) -> Statistics {
	let distinct = |field: Field| {
		records
			.iter()
			.filter_map(|record| record.field(field).map(label))
			.collect::<HashSet<_>>()
			.len() as u64
	};
	let ranks = records.iter().filter_map(|record| record.closing_rank);
	let percentiles = records.iter().filter_map(|record| record.closing_percentile);
	let mut frequencies: HashMap<&str, u64> = HashMap::new();

	for record in records {
		*frequencies.entry(record.course_name.as_str()).or_default() += 1;
	}

	let mut courses: Vec<CourseFrequency> = frequencies
		.into_iter()
		.map(|(course, count)| CourseFrequency { course: course.to_string(), count })
		.collect();

	courses.sort_by(|left, right| {
		right.count.cmp(&left.count).then_with(|| left.course.cmp(&right.course))
	});
	courses.truncate(top_courses);

	Statistics {
		total_records: records.len() as u64,
		unique_institutes: distinct(Field::InstituteName),
		unique_courses: distinct(Field::CourseName),
		unique_categories: distinct(Field::Category),
		unique_universities: distinct(Field::University),
		rank_range: RankRange {
			min: ranks.clone().min().unwrap_or_default(),
			max: ranks.max().unwrap_or_default(),
		},
		percentile_range: PercentileRange {
			min: percentiles.clone().reduce(f64::min).unwrap_or_default(),
			max: percentiles.reduce(f64::max).unwrap_or_default(),
		},
		top_courses: courses,
	}
}

fn label(value: FieldValue<'_>) -> String {
	match value {
		FieldValue::Text(text) => text.to_string(),
		FieldValue::Int(value) => value.to_string(),
		FieldValue::Float(value) => value.to_string(),
	}
}

fn unavailable(name: &str) -> Error {
	Error::Unavailable(format!("{name} is unavailable."))
}
