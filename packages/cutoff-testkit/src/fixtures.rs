use cutoff_domain::record::{RankRecord, RoundCutoff};

pub const INSTITUTES: [(&str, &str, &str); 4] = [
	("College of Engineering Pune", "Savitribai Phule Pune University", "2144"),
	("Veermata Jijabai Technological Institute", "University of Mumbai", "3012"),
	("Walchand College of Engineering", "Shivaji University", "6271"),
	(
		"Government College of Engineering Aurangabad",
		"Dr. Babasaheb Ambedkar Marathwada University",
		"2008",
	),
];
pub const COURSES: [(&str, &str); 4] = [
	("Computer Engineering", "85110"),
	("Information Technology", "24610"),
	("Mechanical Engineering", "61210"),
	("Electronics and Telecommunication Engineering", "37210"),
];
pub const CATEGORIES: [&str; 3] = ["GOPENS", "GOBCS", "LOPENS"];

/// Every institute, course, and category combination, 48 rows with ids starting at 1.
///
/// Computer Engineering closing ranks stay within 1000..=5000 and every other course ranks
/// above 7000. Course codes are the institute code followed by the course suffix.
pub fn sample_records() -> Vec<RankRecord> {
	let mut records = Vec::with_capacity(INSTITUTES.len() * COURSES.len() * CATEGORIES.len());

	for (institute_idx, (institute, university, institute_code)) in INSTITUTES.iter().enumerate()
	{
		for (course_idx, (course, course_suffix)) in COURSES.iter().enumerate() {
			for (category_idx, category) in CATEGORIES.iter().enumerate() {
				let closing_rank = 1_000
					+ institute_idx as i64 * 1_000
					+ category_idx as i64 * 300
					+ course_idx as i64 * 6_000;
				let round = ((institute_idx + category_idx) % 3) as i32 + 1;
				let cutoff = |round_idx: i64| RoundCutoff {
					rank: closing_rank - (3 - round_idx) * 50,
					percentile: percentile_for(closing_rank - (3 - round_idx) * 50),
				};

				records.push(RankRecord {
					id: records.len() as i64 + 1,
					institute_name: institute.to_string(),
					university: Some(university.to_string()),
					course_name: course.to_string(),
					course_code: Some(format!("{institute_code}{course_suffix}")),
					category: category.to_string(),
					round: Some(round),
					closing_rank: Some(closing_rank),
					closing_percentile: Some(percentile_for(closing_rank)),
					round1: Some(cutoff(1)),
					round2: (round >= 2).then(|| cutoff(2)),
					round3: (round >= 3).then(|| cutoff(3)),
				});
			}
		}
	}

	records
}

fn percentile_for(rank: i64) -> f64 {
	((100.0 - rank as f64 / 500.0) * 100.0).round() / 100.0
}
