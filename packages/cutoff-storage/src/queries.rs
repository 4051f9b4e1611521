use sqlx::{PgPool, Postgres, QueryBuilder};

use cutoff_domain::{
	facet::FacetDimension,
	pagination::Window,
	predicate::{Operand, Operator, Predicate, PredicateSet},
	record::{Field, RankRecord},
	sort::SortSpec,
};

use crate::{
	RECORDS_TABLE, Result,
	models::{RECORD_COLUMNS, RankRow},
};

pub async fn fetch_records(
	pool: &PgPool,
	predicates: &PredicateSet,
	sort: &SortSpec,
	window: Option<Window>,
) -> Result<Vec<RankRecord>> {
	let mut builder =
		QueryBuilder::<Postgres>::new(format!("SELECT {RECORD_COLUMNS} FROM {RECORDS_TABLE}"));

	push_predicates(&mut builder, predicates);
	push_order_by(&mut builder, sort);

	if let Some(window) = window {
		builder.push(" LIMIT ");
		builder.push_bind(i64::try_from(window.limit).unwrap_or(i64::MAX));
		builder.push(" OFFSET ");
		builder.push_bind(i64::try_from(window.offset).unwrap_or(i64::MAX));
	}

	let rows: Vec<RankRow> = builder.build_query_as().fetch_all(pool).await?;

	Ok(rows.into_iter().map(RankRecord::from).collect())
}

pub async fn count_records(pool: &PgPool, predicates: &PredicateSet) -> Result<u64> {
	let mut builder = QueryBuilder::<Postgres>::new(format!("SELECT COUNT(*) FROM {RECORDS_TABLE}"));

	push_predicates(&mut builder, predicates);

	let count: i64 = builder.build_query_scalar().fetch_one(pool).await?;

	Ok(u64::try_from(count).unwrap_or_default())
}

pub async fn sample_facet_values(
	pool: &PgPool,
	dimension: FacetDimension,
	sample_size: u32,
) -> Result<Vec<String>> {
	let column = dimension.field().column();
	let sql = format!(
		"SELECT {column}::text FROM {RECORDS_TABLE} WHERE {column} IS NOT NULL LIMIT $1"
	);
	let values: Vec<String> =
		sqlx::query_scalar(&sql).bind(i64::from(sample_size)).fetch_all(pool).await?;

	Ok(values)
}

/// Appends `WHERE` with one parenthesized clause per predicate, in set order.
pub fn push_predicates(builder: &mut QueryBuilder<'_, Postgres>, predicates: &PredicateSet) {
	for (position, predicate) in predicates.iter().enumerate() {
		builder.push(if position == 0 { " WHERE (" } else { " AND (" });

		push_predicate(builder, predicate);

		builder.push(")");
	}
}

/// Appends `ORDER BY` for the sort keys followed by the `id ASC` tiebreaker.
pub fn push_order_by(builder: &mut QueryBuilder<'_, Postgres>, sort: &SortSpec) {
	builder.push(" ORDER BY ");

	for key in sort.keys() {
		builder.push(format!("{} {}, ", key.field.column(), key.direction.as_sql()));
	}

	builder.push("id ASC");
}

/// `LIKE` pattern matching `needle` anywhere, with wildcard characters escaped.
pub fn contains_pattern(needle: &str) -> String {
	let mut pattern = String::with_capacity(needle.len() + 2);

	pattern.push('%');

	for ch in needle.chars() {
		if matches!(ch, '\\' | '%' | '_') {
			pattern.push('\\');
		}

		pattern.push(ch);
	}

	pattern.push('%');

	pattern
}

fn push_predicate(builder: &mut QueryBuilder<'_, Postgres>, predicate: &Predicate) {
	for (position, field) in predicate.fields.iter().enumerate() {
		if position > 0 {
			builder.push(" OR ");
		}

		push_condition(builder, *field, predicate.operator, &predicate.operand);
	}
}

fn push_condition(
	builder: &mut QueryBuilder<'_, Postgres>,
	field: Field,
	operator: Operator,
	operand: &Operand,
) {
	let column = field.column();

	match (operator, operand) {
		(Operator::Contains, Operand::Text(needle)) => {
			builder.push(format!("{column} ILIKE "));
			builder.push_bind(contains_pattern(needle));
		},
		(Operator::Equals, Operand::Text(value)) => {
			builder.push(format!("{column} = "));
			builder.push_bind(value.clone());
		},
		(Operator::EqualsIgnoreCase, Operand::Text(value)) => {
			builder.push(format!("lower({column}) = lower("));
			builder.push_bind(value.clone());
			builder.push(")");
		},
		(Operator::Equals | Operator::AtLeast | Operator::AtMost, Operand::Int(value)) => {
			builder.push(format!("{column} {} ", comparison(operator)));
			builder.push_bind(*value);
		},
		(Operator::Equals | Operator::AtLeast | Operator::AtMost, Operand::Float(value)) => {
			builder.push(format!("{column} {} ", comparison(operator)));
			builder.push_bind(*value);
		},
		_ => {
			builder.push("FALSE");
		},
	}
}

fn comparison(operator: Operator) -> &'static str {
	match operator {
		Operator::AtLeast => ">=",
		Operator::AtMost => "<=",
		_ => "=",
	}
}
