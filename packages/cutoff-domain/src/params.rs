use std::collections::HashMap;

use crate::{ALL, pagination::PageRequest, sort::SortSpec};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
	pub branch: Option<String>,
	pub institute: Option<String>,
	pub university: Option<String>,
	pub category: Option<String>,
	pub round: Option<i32>,
	pub search: Option<String>,
	pub rank_min: Option<i64>,
	pub rank_max: Option<i64>,
	pub percentile_min: Option<f64>,
	pub percentile_max: Option<f64>,
	pub sort: SortSpec,
}

/// A normalized `/records` request.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordQuery {
	pub criteria: FilterCriteria,
	pub page: PageRequest,
}
impl RecordQuery {
	/// Parses raw query parameters.
	///
	/// Malformed numbers are treated as absent rather than rejected. Facet values equal to
	/// [`ALL`] or blank impose no constraint.
	pub fn from_params(params: &HashMap<String, String>, cfg: &cutoff_config::Query) -> Self {
		let criteria = FilterCriteria {
			branch: facet_value(params, "branch"),
			institute: facet_value(params, "institute"),
			university: facet_value(params, "university"),
			category: facet_value(params, "category"),
			round: raw(params, "round")
				.and_then(parse_integer)
				.and_then(|round| i32::try_from(round).ok())
				.filter(|round| *round > 0),
			search: raw(params, "search").map(str::to_string),
			rank_min: raw(params, "rank_min").and_then(parse_integer),
			rank_max: raw(params, "rank_max").and_then(parse_integer),
			percentile_min: raw(params, "percentile_min").and_then(parse_float),
			percentile_max: raw(params, "percentile_max").and_then(parse_float),
			sort: SortSpec::parse(raw(params, "sort_by"), raw(params, "sort_order")),
		};
		let page = positive(raw(params, "page")).unwrap_or(1);
		let limit = positive(raw(params, "limit"))
			.unwrap_or(cfg.default_limit)
			.min(cfg.max_limit.max(1));

		Self { criteria, page: PageRequest::new(page, limit) }
	}
}

fn raw<'a>(params: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
	params.get(key).map(|value| value.trim()).filter(|value| !value.is_empty())
}

/// Facet values are compared against stored columns, so only the blank and sentinel checks trim.
fn facet_value(params: &HashMap<String, String>, key: &str) -> Option<String> {
	params
		.get(key)
		.filter(|value| {
			let trimmed = value.trim();

			!trimmed.is_empty() && trimmed != ALL
		})
		.cloned()
}

/// Accepts plain integers and truncates finite decimals, so "12.7" reads as 12.
fn parse_integer(raw: &str) -> Option<i64> {
	if let Ok(value) = raw.parse::<i64>() {
		return Some(value);
	}

	parse_float(raw)
		.map(f64::trunc)
		.filter(|value| *value >= i64::MIN as f64 && *value <= i64::MAX as f64)
		.map(|value| value as i64)
}

fn parse_float(raw: &str) -> Option<f64> {
	raw.parse::<f64>().ok().filter(|value| value.is_finite())
}

fn positive(raw: Option<&str>) -> Option<u32> {
	raw.and_then(parse_integer).filter(|value| *value > 0).map(|value| {
		u32::try_from(value).unwrap_or(u32::MAX)
	})
}
