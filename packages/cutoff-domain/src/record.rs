use serde::{Deserialize, Serialize};

/// Columns of a cutoff record that predicates and orderings can address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
	Id,
	InstituteName,
	University,
	CourseName,
	CourseCode,
	Category,
	Round,
	ClosingRank,
	ClosingPercentile,
}
impl Field {
	pub const ALL: [Self; 9] = [
		Self::Id,
		Self::InstituteName,
		Self::University,
		Self::CourseName,
		Self::CourseCode,
		Self::Category,
		Self::Round,
		Self::ClosingRank,
		Self::ClosingPercentile,
	];

	pub fn column(self) -> &'static str {
		match self {
			Self::Id => "id",
			Self::InstituteName => "institute_name",
			Self::University => "university",
			Self::CourseName => "course_name",
			Self::CourseCode => "course_code",
			Self::Category => "category",
			Self::Round => "round",
			Self::ClosingRank => "closing_rank",
			Self::ClosingPercentile => "closing_percentile",
		}
	}

	pub fn from_column(name: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|field| field.column() == name)
	}
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
	Text(&'a str),
	Int(i64),
	Float(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundCutoff {
	pub rank: i64,
	pub percentile: f64,
}
impl RoundCutoff {
	/// A round is only reported when both halves of the pair are present.
	pub fn from_parts(rank: Option<i64>, percentile: Option<f64>) -> Option<Self> {
		match (rank, percentile) {
			(Some(rank), Some(percentile)) => Some(Self { rank, percentile }),
			_ => None,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankRecord {
	pub id: i64,
	pub institute_name: String,
	pub university: Option<String>,
	pub course_name: String,
	pub course_code: Option<String>,
	pub category: String,
	pub round: Option<i32>,
	pub closing_rank: Option<i64>,
	pub closing_percentile: Option<f64>,
	pub round1: Option<RoundCutoff>,
	pub round2: Option<RoundCutoff>,
	pub round3: Option<RoundCutoff>,
}
impl RankRecord {
	pub fn field(&self, field: Field) -> Option<FieldValue<'_>> {
		match field {
			Field::Id => Some(FieldValue::Int(self.id)),
			Field::InstituteName => Some(FieldValue::Text(&self.institute_name)),
			Field::University => self.university.as_deref().map(FieldValue::Text),
			Field::CourseName => Some(FieldValue::Text(&self.course_name)),
			Field::CourseCode => self.course_code.as_deref().map(FieldValue::Text),
			Field::Category => Some(FieldValue::Text(&self.category)),
			Field::Round => self.round.map(|round| FieldValue::Int(i64::from(round))),
			Field::ClosingRank => self.closing_rank.map(FieldValue::Int),
			Field::ClosingPercentile => self.closing_percentile.map(FieldValue::Float),
		}
	}
}
