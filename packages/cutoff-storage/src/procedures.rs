use sqlx::{PgPool, types::Json};

use cutoff_domain::{
	facet::FacetDimension, pagination::Pagination, params::RecordQuery, record::RankRecord,
	statistics::Statistics,
};

use crate::{
	Error, ProcedurePage, Result,
	models::{RankRow, StatisticsRow},
};

pub async fn get_cet_data(pool: &PgPool, query: &RecordQuery) -> Result<ProcedurePage> {
	let criteria = &query.criteria;
	let (sort_by, sort_order) = criteria.sort.to_params();
	let row: Option<(Json<Vec<RankRow>>, Json<Pagination>)> = sqlx::query_as(
		"\
SELECT data, pagination
FROM get_cet_data($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)",
	)
	.bind(i32::try_from(query.page.page).unwrap_or(i32::MAX))
	.bind(i32::try_from(query.page.limit).unwrap_or(i32::MAX))
	.bind(criteria.branch.as_deref())
	.bind(criteria.institute.as_deref())
	.bind(criteria.category.as_deref())
	.bind(criteria.university.as_deref())
	.bind(criteria.round)
	.bind(criteria.search.as_deref())
	.bind(criteria.rank_min)
	.bind(criteria.rank_max)
	.bind(criteria.percentile_min)
	.bind(criteria.percentile_max)
	.bind(sort_by)
	.bind(sort_order)
	.fetch_optional(pool)
	.await?;
	let Some((Json(rows), Json(pagination))) = row else {
		return Err(Error::Unavailable("get_cet_data returned no rows.".to_string()));
	};

	Ok(ProcedurePage { records: rows.into_iter().map(RankRecord::from).collect(), pagination })
}

pub async fn get_unique_values(pool: &PgPool, dimension: FacetDimension) -> Result<Vec<String>> {
	let sql = format!(
		"SELECT {column}::text FROM {procedure}()",
		column = dimension.field().column(),
		procedure = dimension.procedure(),
	);
	let values: Vec<Option<String>> = sqlx::query_scalar(&sql).fetch_all(pool).await?;

	Ok(values.into_iter().flatten().collect())
}

pub async fn get_database_statistics(pool: &PgPool, top_courses: u32) -> Result<Statistics> {
	let row: Option<StatisticsRow> = sqlx::query_as(
		"\
SELECT
	total_records,
	unique_institutes,
	unique_courses,
	unique_categories,
	unique_universities,
	min_rank,
	max_rank,
	min_percentile,
	max_percentile,
	top_courses
FROM get_database_statistics($1)",
	)
	.bind(i32::try_from(top_courses).unwrap_or(i32::MAX))
	.fetch_optional(pool)
	.await?;
	let Some(row) = row else {
		return Err(Error::Unavailable("get_database_statistics returned no rows.".to_string()));
	};

	Ok(row.into())
}
