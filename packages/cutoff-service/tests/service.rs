use std::{collections::HashMap, sync::Arc};

use cutoff_domain::{
	ALL, facet::FacetDimension, params::RecordQuery, predicate::PredicateSet,
	statistics::Statistics,
};
use cutoff_service::{CutoffService, Error, RecordPage, Resolution};
use cutoff_storage::RecordStore;
use cutoff_testkit::{MemoryStore, Operation, fixtures, summarize};

fn query(pairs: &[(&str, &str)]) -> RecordQuery {
	let params: HashMap<String, String> =
		pairs.iter().map(|(key, value)| (key.to_string(), value.to_string())).collect();

	RecordQuery::from_params(&params, &cutoff_config::Query::default())
}

fn service(store: MemoryStore) -> (CutoffService, Arc<MemoryStore>) {
	let store = Arc::new(store);

	(CutoffService::new(cutoff_config::Query::default(), store.clone()), store)
}

fn healthy() -> (CutoffService, Arc<MemoryStore>) {
	service(MemoryStore::new(fixtures::sample_records()))
}

fn degraded() -> (CutoffService, Arc<MemoryStore>) {
	service(MemoryStore::new(fixtures::sample_records()).without_procedures())
}

fn expect_primary<T: std::fmt::Debug>(resolution: Resolution<T>) -> T {
	match resolution {
		Resolution::Primary(value) => value,
		other => panic!("Expected the primary strategy, got {other:?}."),
	}
}

fn expect_fallback<T: std::fmt::Debug>(resolution: Resolution<T>) -> T {
	match resolution {
		Resolution::Fallback(value) => value,
		other => panic!("Expected the fallback strategy, got {other:?}."),
	}
}

async fn page_both_ways(pairs: &[(&str, &str)]) -> (RecordPage, RecordPage) {
	let query = query(pairs);
	let (primary, _) = healthy();
	let (fallback, _) = degraded();

	(
		expect_primary(primary.fetch_page(&query).await),
		expect_fallback(fallback.fetch_page(&query).await),
	)
}

#[tokio::test]
async fn unfiltered_first_page_uses_the_procedure() {
	let (service, store) = healthy();
	let page = expect_primary(service.fetch_page(&query(&[])).await);

	assert_eq!(page.records.len(), 25);
	assert_eq!(page.pagination.total, 48);
	assert_eq!(page.pagination.total_pages, 2);
	assert!(page.pagination.has_next);
	assert!(!page.pagination.has_prev);
	assert_eq!(store.calls(Operation::PageProcedure), 1);
	assert_eq!(store.calls(Operation::FetchRecords), 0);
	assert_eq!(store.calls(Operation::CountRecords), 0);
}

#[tokio::test]
async fn fallback_page_matches_procedure_page() {
	let cases: [&[(&str, &str)]; 6] = [
		&[],
		&[("page", "2")],
		&[("branch", "Computer"), ("rank_min", "1000"), ("rank_max", "3000")],
		&[("search", "214485110")],
		&[("category", "gopens"), ("sort_by", "closing_rank"), ("sort_order", "desc")],
		&[("round", "2"), ("limit", "7"), ("page", "3"), ("percentile_min", "90")],
	];

	for pairs in cases {
		let (primary, fallback) = page_both_ways(pairs).await;

		assert_eq!(primary, fallback, "Paths diverged for {pairs:?}.");
	}
}

#[tokio::test]
async fn fallback_count_matches_unwindowed_rows() {
	let (service, store) = degraded();
	let query = query(&[("branch", "Engineering"), ("rank_max", "9000"), ("limit", "5")]);
	let page = expect_fallback(service.fetch_page(&query).await);
	let predicates = PredicateSet::from_criteria(&query.criteria);
	let rows = store
		.fetch_records(&predicates, &query.criteria.sort, None)
		.await
		.expect("Failed to fetch rows.");

	assert_eq!(page.pagination.total, rows.len() as u64);
	assert_eq!(page.records.len(), 5);
	assert_eq!(page.records[..], rows[..5]);
}

#[tokio::test]
async fn branch_all_is_the_same_as_no_branch() {
	let (service, _) = healthy();
	let with_all = query(&[("branch", ALL)]);

	assert_eq!(with_all, query(&[]));

	let with_all = expect_primary(service.fetch_page(&with_all).await);
	let without = expect_primary(service.fetch_page(&query(&[])).await);

	assert_eq!(with_all, without);
}

#[tokio::test]
async fn branch_and_rank_range_filter_the_page() {
	let (service, _) = healthy();
	let page = expect_primary(
		service
			.fetch_page(&query(&[
				("branch", "Computer"),
				("rank_min", "1000"),
				("rank_max", "3000"),
			]))
			.await,
	);

	assert_eq!(page.pagination.total, 7);
	assert_eq!(page.pagination.total_pages, 1);
	assert!(!page.pagination.has_next);

	for record in &page.records {
		let rank = record.closing_rank.expect("Fixture rows carry a closing rank.");

		assert!(record.course_name.contains("Computer"));
		assert!((1_000..=3_000).contains(&rank));
	}
}

#[tokio::test]
async fn branch_substring_and_rank_bounds_narrow_to_one_branch() {
	let pairs = [("branch", "Computer Engineering"), ("rank_min", "1000"), ("rank_max", "5000")];
	let (page, fallback) = page_both_ways(&pairs).await;

	assert_eq!(page, fallback);
	assert_eq!(page.pagination.total, 12);
	assert_eq!(page.records.len(), 12);

	for record in &page.records {
		let rank = record.closing_rank.expect("Fixture rows carry a closing rank.");

		assert!(record.course_name.to_lowercase().contains("computer engineering"));
		assert!((1_000..=5_000).contains(&rank));
	}
}

#[tokio::test]
async fn search_matches_course_codes() {
	let (service, _) = healthy();
	let page = expect_primary(service.fetch_page(&query(&[("search", "214485110")])).await);

	assert_eq!(page.pagination.total, 3);
	assert!(page.records.iter().all(|record| record.course_code.as_deref() == Some("214485110")));
}

#[tokio::test]
async fn page_fails_when_both_strategies_fail() {
	let (service, store) = service(
		MemoryStore::new(fixtures::sample_records())
			.failing(Operation::PageProcedure)
			.failing(Operation::FetchRecords),
	);
	let resolution = service.fetch_page(&query(&[])).await;

	assert!(matches!(
		resolution,
		Resolution::Failed(Error::UpstreamQuery { operation: "fetch_page", .. })
	));
	assert_eq!(store.calls(Operation::PageProcedure), 1);
	assert_eq!(store.calls(Operation::FetchRecords), 1);
	assert_eq!(store.calls(Operation::CountRecords), 1);
}

#[tokio::test]
async fn facets_start_with_all_exactly_once() {
	let (service, store) = healthy();
	let facets = expect_primary(service.list_facet_values().await);

	for list in [
		&facets.branches,
		&facets.institutes,
		&facets.universities,
		&facets.categories,
		&facets.rounds,
	] {
		assert_eq!(list.first().map(String::as_str), Some(ALL));
		assert_eq!(list.iter().filter(|value| *value == ALL).count(), 1);
	}

	assert_eq!(facets.rounds, vec!["All", "1", "2", "3"]);
	assert_eq!(facets.branches[1], "Computer Engineering");
	assert_eq!(store.calls(Operation::FacetProcedure), 5);
	assert_eq!(store.calls(Operation::SampleFacetValues), 0);
}

#[tokio::test]
async fn every_offered_facet_value_selects_records() {
	let records: Vec<_> = fixtures::sample_records()
		.into_iter()
		.map(|mut record| {
			if record.university.as_deref() == Some("University of Mumbai") {
				record.university = Some("University of Mumbai ".to_string());
			}

			record
		})
		.collect();

	for store in [MemoryStore::new(records.clone()), MemoryStore::new(records).without_procedures()] {
		let (service, _) = service(store);
		let facets = service.list_facet_values().await.into_result().expect("Failed to list facets.");

		assert!(facets.universities.iter().any(|value| value == "University of Mumbai "));

		for (key, values) in [
			("branch", &facets.branches),
			("institute", &facets.institutes),
			("university", &facets.universities),
			("category", &facets.categories),
			("round", &facets.rounds),
		] {
			for value in values.iter().filter(|value| *value != ALL) {
				let page = service
					.fetch_page(&query(&[(key, value.as_str())]))
					.await
					.into_result()
					.expect("Failed to fetch page.");

				assert!(page.pagination.total > 0, "No rows for {key}={value:?}.");
			}
		}
	}
}

#[tokio::test]
async fn one_failed_facet_procedure_switches_every_list_to_samples() {
	let (healthy_service, _) = healthy();
	let expected = expect_primary(healthy_service.list_facet_values().await);
	let (service, store) = service(
		MemoryStore::new(fixtures::sample_records()).failing_facet(FacetDimension::Rounds),
	);
	let facets = expect_fallback(service.list_facet_values().await);

	assert_eq!(facets, expected);
	assert_eq!(store.calls(Operation::FacetProcedure), 5);
	assert_eq!(store.calls(Operation::SampleFacetValues), 5);
}

#[tokio::test]
async fn facets_fail_when_sampling_fails() {
	let (service, _) = service(
		MemoryStore::new(fixtures::sample_records())
			.failing(Operation::FacetProcedure)
			.failing(Operation::SampleFacetValues),
	);

	assert!(matches!(
		service.list_facet_values().await,
		Resolution::Failed(Error::UpstreamQuery { operation: "list_facet_values", .. })
	));
}

#[tokio::test]
async fn statistics_come_from_the_procedure() {
	let (service, store) = healthy();
	let statistics = expect_primary(service.summarize().await);

	assert_eq!(statistics, summarize(store.records(), 5));
	assert_eq!(statistics.total_records, 48);
	assert_eq!(statistics.unique_institutes, 4);
	assert_eq!(statistics.top_courses.len(), 4);
	assert_eq!(store.calls(Operation::CountRecords), 0);
}

#[tokio::test]
async fn degraded_statistics_report_only_the_total() {
	let (service, store) = degraded();
	let statistics = expect_fallback(service.summarize().await);

	assert_eq!(statistics, Statistics::degraded(48));
	assert_eq!(statistics.unique_courses, 0);
	assert!(statistics.top_courses.is_empty());
	assert_eq!(store.calls(Operation::StatisticsProcedure), 1);
	assert_eq!(store.calls(Operation::CountRecords), 1);
}

#[tokio::test]
async fn statistics_fail_when_the_count_fails() {
	let (service, store) = service(
		MemoryStore::new(fixtures::sample_records())
			.failing(Operation::StatisticsProcedure)
			.failing(Operation::CountRecords),
	);

	assert!(service.summarize().await.into_result().is_err());
	assert_eq!(store.calls(Operation::StatisticsProcedure), 1);
	assert_eq!(store.calls(Operation::CountRecords), 1);
}

#[tokio::test]
async fn page_and_summary_resolve_together() {
	let (service, store) = healthy();
	let (page, statistics) =
		service.fetch_page_with_summary(&query(&[("search", "214485110")])).await;

	assert_eq!(expect_primary(page).pagination.total, 3);
	assert_eq!(expect_primary(statistics).total_records, 48);
	assert_eq!(store.calls(Operation::PageProcedure), 1);
	assert_eq!(store.calls(Operation::StatisticsProcedure), 1);
}

#[tokio::test]
async fn page_and_summary_fall_back_independently() {
	let (service, _) =
		service(MemoryStore::new(fixtures::sample_records()).failing(Operation::StatisticsProcedure));
	let (page, statistics) = service.fetch_page_with_summary(&query(&[])).await;

	assert_eq!(expect_primary(page).records.len(), 25);
	assert_eq!(expect_fallback(statistics), Statistics::degraded(48));
}
