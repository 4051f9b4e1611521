use std::{cmp::Ordering, slice::Iter};

use crate::{
	params::FilterCriteria,
	record::{Field, FieldValue, RankRecord},
};

const BRANCH_FIELDS: &[Field] = &[Field::CourseName];
const UNIVERSITY_FIELDS: &[Field] = &[Field::University];
const INSTITUTE_FIELDS: &[Field] = &[Field::InstituteName];
const CATEGORY_FIELDS: &[Field] = &[Field::Category];
const ROUND_FIELDS: &[Field] = &[Field::Round];
const SEARCH_FIELDS: &[Field] = &[Field::CourseCode, Field::InstituteName, Field::CourseName];
const RANK_FIELDS: &[Field] = &[Field::ClosingRank];
const PERCENTILE_FIELDS: &[Field] = &[Field::ClosingPercentile];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
	/// Case-insensitive substring.
	Contains,
	Equals,
	EqualsIgnoreCase,
	AtLeast,
	AtMost,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
	Text(String),
	Int(i64),
	Float(f64),
}

/// One filter descriptor. A multi-field predicate matches when any of its fields does.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
	pub name: &'static str,
	pub fields: &'static [Field],
	pub operator: Operator,
	pub operand: Operand,
}
impl Predicate {
	fn new(
		name: &'static str,
		fields: &'static [Field],
		operator: Operator,
		operand: Operand,
	) -> Self {
		Self { name, fields, operator, operand }
	}

	pub fn matches(&self, record: &RankRecord) -> bool {
		self.fields.iter().any(|field| {
			record.field(*field).is_some_and(|value| self.matches_value(value))
		})
	}

	fn matches_value(&self, value: FieldValue<'_>) -> bool {
		match (self.operator, &self.operand, value) {
			(Operator::Contains, Operand::Text(needle), FieldValue::Text(haystack)) =>
				haystack.to_lowercase().contains(&needle.to_lowercase()),
			(Operator::Equals, Operand::Text(expected), FieldValue::Text(actual)) =>
				actual == expected,
			(Operator::EqualsIgnoreCase, Operand::Text(expected), FieldValue::Text(actual)) =>
				actual.to_lowercase() == expected.to_lowercase(),
			(Operator::Equals, operand, value) =>
				compare_numeric(value, operand) == Some(Ordering::Equal),
			(Operator::AtLeast, operand, value) => matches!(
				compare_numeric(value, operand),
				Some(Ordering::Greater | Ordering::Equal)
			),
			(Operator::AtMost, operand, value) =>
				matches!(compare_numeric(value, operand), Some(Ordering::Less | Ordering::Equal)),
			_ => false,
		}
	}
}

/// The ordered predicate list shared by the row query and the count query.
///
/// Built once per request and never mutated, so every executor that receives the same
/// `&PredicateSet` applies the same filters in the same order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredicateSet {
	predicates: Vec<Predicate>,
}
impl PredicateSet {
	pub fn from_criteria(criteria: &FilterCriteria) -> Self {
		let mut predicates = Vec::new();

		if let Some(branch) = &criteria.branch {
			predicates.push(Predicate::new(
				"branch",
				BRANCH_FIELDS,
				Operator::Contains,
				Operand::Text(branch.clone()),
			));
		}
		if let Some(university) = &criteria.university {
			predicates.push(Predicate::new(
				"university",
				UNIVERSITY_FIELDS,
				Operator::Equals,
				Operand::Text(university.clone()),
			));
		}
		if let Some(institute) = &criteria.institute {
			predicates.push(Predicate::new(
				"institute",
				INSTITUTE_FIELDS,
				Operator::Contains,
				Operand::Text(institute.clone()),
			));
		}
		if let Some(category) = &criteria.category {
			predicates.push(Predicate::new(
				"category",
				CATEGORY_FIELDS,
				Operator::EqualsIgnoreCase,
				Operand::Text(category.clone()),
			));
		}
		if let Some(round) = criteria.round {
			predicates.push(Predicate::new(
				"round",
				ROUND_FIELDS,
				Operator::Equals,
				Operand::Int(i64::from(round)),
			));
		}
		if let Some(search) = &criteria.search {
			predicates.push(Predicate::new(
				"search",
				SEARCH_FIELDS,
				Operator::Contains,
				Operand::Text(search.clone()),
			));
		}
		if let Some(rank_min) = criteria.rank_min {
			predicates.push(Predicate::new(
				"rank_min",
				RANK_FIELDS,
				Operator::AtLeast,
				Operand::Int(rank_min),
			));
		}
		if let Some(rank_max) = criteria.rank_max {
			predicates.push(Predicate::new(
				"rank_max",
				RANK_FIELDS,
				Operator::AtMost,
				Operand::Int(rank_max),
			));
		}
		if let Some(percentile_min) = criteria.percentile_min {
			predicates.push(Predicate::new(
				"percentile_min",
				PERCENTILE_FIELDS,
				Operator::AtLeast,
				Operand::Float(percentile_min),
			));
		}
		if let Some(percentile_max) = criteria.percentile_max {
			predicates.push(Predicate::new(
				"percentile_max",
				PERCENTILE_FIELDS,
				Operator::AtMost,
				Operand::Float(percentile_max),
			));
		}

		Self { predicates }
	}

	pub fn iter(&self) -> Iter<'_, Predicate> {
		self.predicates.iter()
	}

	pub fn len(&self) -> usize {
		self.predicates.len()
	}

	pub fn is_empty(&self) -> bool {
		self.predicates.is_empty()
	}

	pub fn names(&self) -> Vec<&'static str> {
		self.predicates.iter().map(|predicate| predicate.name).collect()
	}

	pub fn matches(&self, record: &RankRecord) -> bool {
		self.predicates.iter().all(|predicate| predicate.matches(record))
	}
}
impl<'a> IntoIterator for &'a PredicateSet {
	type IntoIter = Iter<'a, Predicate>;
	type Item = &'a Predicate;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

fn compare_numeric(value: FieldValue<'_>, operand: &Operand) -> Option<Ordering> {
	match (value, operand) {
		(FieldValue::Int(value), Operand::Int(operand)) => Some(value.cmp(operand)),
		(FieldValue::Int(value), Operand::Float(operand)) => (value as f64).partial_cmp(operand),
		(FieldValue::Float(value), Operand::Float(operand)) => value.partial_cmp(operand),
		(FieldValue::Float(value), Operand::Int(operand)) => value.partial_cmp(&(*operand as f64)),
		_ => None,
	}
}
