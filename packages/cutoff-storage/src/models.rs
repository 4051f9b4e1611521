use serde::Deserialize;
use sqlx::types::Json;

use cutoff_domain::{
	record::{RankRecord, RoundCutoff},
	statistics::{CourseFrequency, PercentileRange, RankRange, Statistics},
};

/// Column list selected for every record query.
pub const RECORD_COLUMNS: &str = "id, institute_name, university, course_name, course_code, \
category, round, closing_rank, closing_percentile, round1_rank, round1_percentile, round2_rank, \
round2_percentile, round3_rank, round3_percentile";

/// Flat record row as stored, decoded either from a result set or from procedure JSON.
#[derive(Debug, Clone, sqlx::FromRow, Deserialize)]
pub struct RankRow {
	pub id: i64,
	pub institute_name: String,
	pub university: Option<String>,
	pub course_name: String,
	pub course_code: Option<String>,
	pub category: String,
	pub round: Option<i32>,
	pub closing_rank: Option<i64>,
	pub closing_percentile: Option<f64>,
	pub round1_rank: Option<i64>,
	pub round1_percentile: Option<f64>,
	pub round2_rank: Option<i64>,
	pub round2_percentile: Option<f64>,
	pub round3_rank: Option<i64>,
	pub round3_percentile: Option<f64>,
}
impl From<RankRow> for RankRecord {
	fn from(row: RankRow) -> Self {
		Self {
			id: row.id,
			institute_name: row.institute_name,
			university: row.university,
			course_name: row.course_name,
			course_code: row.course_code,
			category: row.category,
			round: row.round,
			closing_rank: row.closing_rank,
			closing_percentile: row.closing_percentile,
			round1: RoundCutoff::from_parts(row.round1_rank, row.round1_percentile),
			round2: RoundCutoff::from_parts(row.round2_rank, row.round2_percentile),
			round3: RoundCutoff::from_parts(row.round3_rank, row.round3_percentile),
		}
	}
}

/// Row returned by the `get_database_statistics` procedure.
#[derive(Debug, sqlx::FromRow)]
pub struct StatisticsRow {
	pub total_records: Option<i64>,
	pub unique_institutes: Option<i64>,
	pub unique_courses: Option<i64>,
	pub unique_categories: Option<i64>,
	pub unique_universities: Option<i64>,
	pub min_rank: Option<i64>,
	pub max_rank: Option<i64>,
	pub min_percentile: Option<f64>,
	pub max_percentile: Option<f64>,
	pub top_courses: Option<Json<Vec<CourseFrequency>>>,
}
impl From<StatisticsRow> for Statistics {
	fn from(row: StatisticsRow) -> Self {
		Self {
			total_records: non_negative(row.total_records),
			unique_institutes: non_negative(row.unique_institutes),
			unique_courses: non_negative(row.unique_courses),
			unique_categories: non_negative(row.unique_categories),
			unique_universities: non_negative(row.unique_universities),
			rank_range: RankRange {
				min: row.min_rank.unwrap_or_default(),
				max: row.max_rank.unwrap_or_default(),
			},
			percentile_range: PercentileRange {
				min: row.min_percentile.unwrap_or_default(),
				max: row.max_percentile.unwrap_or_default(),
			},
			top_courses: row.top_courses.map(|Json(courses)| courses).unwrap_or_default(),
		}
	}
}

fn non_negative(value: Option<i64>) -> u64 {
	value.and_then(|value| u64::try_from(value).ok()).unwrap_or_default()
}
