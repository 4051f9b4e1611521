use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankRange {
	pub min: i64,
	pub max: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PercentileRange {
	pub min: f64,
	pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseFrequency {
	pub course: String,
	pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
	pub total_records: u64,
	pub unique_institutes: u64,
	pub unique_courses: u64,
	pub unique_categories: u64,
	pub unique_universities: u64,
	pub rank_range: RankRange,
	pub percentile_range: PercentileRange,
	pub top_courses: Vec<CourseFrequency>,
}
impl Statistics {
	/// Statistics that only know the record total; every other field reads as zero or empty.
	pub fn degraded(total_records: u64) -> Self {
		Self { total_records, ..Self::default() }
	}
}
