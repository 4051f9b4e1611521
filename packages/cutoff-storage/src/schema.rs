/// Schema statements in apply order. Each file holds exactly one statement, so function bodies
/// never need to be split.
pub fn statements() -> [&'static str; 10] {
	[
		include_str!("../../../sql/tables/001_cutoff_records.sql"),
		include_str!("../../../sql/tables/002_cutoff_records_indexes.sql"),
		include_str!("../../../sql/functions/001_cutoff_like_pattern.sql"),
		include_str!("../../../sql/functions/002_get_cet_data.sql"),
		include_str!("../../../sql/functions/003_get_unique_courses.sql"),
		include_str!("../../../sql/functions/004_get_unique_institutes.sql"),
		include_str!("../../../sql/functions/005_get_unique_universities.sql"),
		include_str!("../../../sql/functions/006_get_unique_categories.sql"),
		include_str!("../../../sql/functions/007_get_unique_rounds.sql"),
		include_str!("../../../sql/functions/008_get_database_statistics.sql"),
	]
}
