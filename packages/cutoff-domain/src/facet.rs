use std::{cmp::Ordering, collections::BTreeSet};

use serde::{Deserialize, Serialize};

use crate::{ALL, record::Field};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FacetDimension {
	Courses,
	Institutes,
	Universities,
	Categories,
	Rounds,
}
impl FacetDimension {
	pub const ALL: [Self; 5] =
		[Self::Courses, Self::Institutes, Self::Universities, Self::Categories, Self::Rounds];

	pub fn field(self) -> Field {
		match self {
			Self::Courses => Field::CourseName,
			Self::Institutes => Field::InstituteName,
			Self::Universities => Field::University,
			Self::Categories => Field::Category,
			Self::Rounds => Field::Round,
		}
	}

	/// Name of the server-side procedure listing this dimension's distinct values.
	pub fn procedure(self) -> &'static str {
		match self {
			Self::Courses => "get_unique_courses",
			Self::Institutes => "get_unique_institutes",
			Self::Universities => "get_unique_universities",
			Self::Categories => "get_unique_categories",
			Self::Rounds => "get_unique_rounds",
		}
	}

	/// Drops blank and sentinel values, de-duplicates, sorts, and prefixes [`ALL`].
	///
	/// Values are kept verbatim so an offered option matches the stored column exactly. Rounds
	/// sort numerically; every other dimension sorts lexicographically.
	pub fn option_list(self, values: impl IntoIterator<Item = String>) -> Vec<String> {
		let distinct: BTreeSet<String> = values
			.into_iter()
			.filter(|value| {
				let trimmed = value.trim();

				!trimmed.is_empty() && trimmed != ALL
			})
			.collect();
		let mut sorted: Vec<String> = distinct.into_iter().collect();

		if self == Self::Rounds {
			sorted.sort_by(|left, right| compare_numeric_labels(left, right));
		}

		let mut options = Vec::with_capacity(sorted.len() + 1);

		options.push(ALL.to_string());
		options.extend(sorted);

		options
	}
}

/// Option lists for every filter widget, each starting with [`ALL`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetOptionSet {
	pub branches: Vec<String>,
	pub institutes: Vec<String>,
	pub universities: Vec<String>,
	pub categories: Vec<String>,
	pub rounds: Vec<String>,
}
impl FacetOptionSet {
	/// Builds the option set from raw values listed in [`FacetDimension::ALL`] order.
	pub fn from_raw(raw: [Vec<String>; 5]) -> Self {
		let [courses, institutes, universities, categories, rounds] = raw;

		Self {
			branches: FacetDimension::Courses.option_list(courses),
			institutes: FacetDimension::Institutes.option_list(institutes),
			universities: FacetDimension::Universities.option_list(universities),
			categories: FacetDimension::Categories.option_list(categories),
			rounds: FacetDimension::Rounds.option_list(rounds),
		}
	}
}

fn compare_numeric_labels(left: &str, right: &str) -> Ordering {
	match (left.parse::<i64>(), right.parse::<i64>()) {
		(Ok(left), Ok(right)) => left.cmp(&right),
		(Ok(_), Err(_)) => Ordering::Less,
		(Err(_), Ok(_)) => Ordering::Greater,
		(Err(_), Err(_)) => left.cmp(right),
	}
}
