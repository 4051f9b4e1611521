use std::cmp::Ordering;

use crate::record::{Field, FieldValue, RankRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
	Asc,
	Desc,
}
impl Direction {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Asc => "asc",
			Self::Desc => "desc",
		}
	}

	pub fn as_sql(self) -> &'static str {
		match self {
			Self::Asc => "ASC",
			Self::Desc => "DESC",
		}
	}

	fn parse(raw: Option<&str>) -> Self {
		match raw.map(|value| value.trim().to_ascii_lowercase()) {
			Some(value) if value == "desc" => Self::Desc,
			_ => Self::Asc,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
	pub field: Field,
	pub direction: Direction,
}

/// Ordered sort keys. Every ordering is completed by `id ASC` so pages are deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
	keys: Vec<SortKey>,
}
impl SortSpec {
	/// Pairs comma-joined `sort_by` and `sort_order` lists by position.
	///
	/// Unknown fields are dropped together with their direction; a missing or unrecognized
	/// direction means ascending. When nothing usable remains the default ordering applies.
	pub fn parse(sort_by: Option<&str>, sort_order: Option<&str>) -> Self {
		let Some(sort_by) = sort_by else {
			return Self::default();
		};
		let orders: Vec<&str> = sort_order.map(|raw| raw.split(',').collect()).unwrap_or_default();
		let mut keys: Vec<SortKey> = Vec::new();

		for (position, name) in sort_by.split(',').enumerate() {
			let Some(field) = Field::from_column(name.trim()) else {
				continue;
			};

			if keys.iter().any(|key| key.field == field) {
				continue;
			}

			keys.push(SortKey { field, direction: Direction::parse(orders.get(position).copied()) });
		}

		if keys.is_empty() {
			return Self::default();
		}

		Self { keys }
	}

	pub fn keys(&self) -> &[SortKey] {
		&self.keys
	}

	/// Renders the keys back into the comma-joined `(sort_by, sort_order)` pair.
	pub fn to_params(&self) -> (String, String) {
		let sort_by = self.keys.iter().map(|key| key.field.column()).collect::<Vec<_>>().join(",");
		let sort_order =
			self.keys.iter().map(|key| key.direction.as_str()).collect::<Vec<_>>().join(",");

		(sort_by, sort_order)
	}

	/// Orders records the way Postgres does: NULLs sort last ascending and first descending.
	pub fn compare(&self, left: &RankRecord, right: &RankRecord) -> Ordering {
		for key in &self.keys {
			let ordering = compare_nullable(left.field(key.field), right.field(key.field));
			let ordering = match key.direction {
				Direction::Asc => ordering,
				Direction::Desc => ordering.reverse(),
			};

			if ordering != Ordering::Equal {
				return ordering;
			}
		}

		left.id.cmp(&right.id)
	}
}
impl Default for SortSpec {
	fn default() -> Self {
		Self {
			keys: vec![
				SortKey { field: Field::University, direction: Direction::Asc },
				SortKey { field: Field::Category, direction: Direction::Asc },
				SortKey { field: Field::ClosingPercentile, direction: Direction::Desc },
			],
		}
	}
}

fn compare_nullable(left: Option<FieldValue<'_>>, right: Option<FieldValue<'_>>) -> Ordering {
	match (left, right) {
		(None, None) => Ordering::Equal,
		(None, Some(_)) => Ordering::Greater,
		(Some(_), None) => Ordering::Less,
		(Some(left), Some(right)) => compare_values(left, right),
	}
}

fn compare_values(left: FieldValue<'_>, right: FieldValue<'_>) -> Ordering {
	match (left, right) {
		(FieldValue::Text(left), FieldValue::Text(right)) => left.cmp(right),
		(FieldValue::Int(left), FieldValue::Int(right)) => left.cmp(&right),
		(left, right) => as_f64(left).total_cmp(&as_f64(right)),
	}
}

fn as_f64(value: FieldValue<'_>) -> f64 {
	match value {
		FieldValue::Int(value) => value as f64,
		FieldValue::Float(value) => value,
		FieldValue::Text(_) => f64::NAN,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn missing_sort_uses_default_ordering() {
		let spec = SortSpec::parse(None, Some("desc"));

		assert_eq!(spec, SortSpec::default());
		assert_eq!(
			spec.to_params(),
			("university,category,closing_percentile".to_string(), "asc,asc,desc".to_string())
		);
	}

	#[test]
	fn pairs_fields_with_directions_by_position() {
		let spec = SortSpec::parse(Some("closing_rank, course_name"), Some("desc,asc"));

		assert_eq!(
			spec.keys(),
			&[
				SortKey { field: Field::ClosingRank, direction: Direction::Desc },
				SortKey { field: Field::CourseName, direction: Direction::Asc },
			]
		);
	}

	#[test]
	fn unknown_fields_drop_their_paired_direction() {
		let spec = SortSpec::parse(Some("bogus,closing_rank"), Some("asc,desc"));

		assert_eq!(spec.keys(), &[SortKey { field: Field::ClosingRank, direction: Direction::Desc }]);
	}

	#[test]
	fn short_order_list_defaults_to_ascending() {
		let spec = SortSpec::parse(Some("category,closing_rank"), Some("DESC"));

		assert_eq!(spec.keys()[0].direction, Direction::Desc);
		assert_eq!(spec.keys()[1].direction, Direction::Asc);
	}

	#[test]
	fn only_unknown_fields_fall_back_to_default() {
		assert_eq!(SortSpec::parse(Some("; DROP TABLE"), None), SortSpec::default());
	}
}
