use std::collections::HashMap;

use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use mfgdir_domain::cursor::Cursor;

use crate::{
	CompanyPage, Error, PageQuery, Result,
	db::Db,
	models::{
		Capabilities, Certification, Company, CompanyRow, Facility, FacilityStateRow, Industry,
		capability_column, volume_column,
	},
	scope::{CompanyScope, FacilityPredicate},
};

const COMPANY_COLUMNS: &str = "\
c.id, c.company_name, c.slug, c.description, c.website, c.employee_range, c.revenue_range, \
c.year_founded, c.created_at, c.updated_at";

pub async fn fetch_page(db: &Db, query: &PageQuery) -> Result<CompanyPage> {
	if query.limit == Some(0) {
		return Err(Error::InvalidArgument("Page limit must be greater than zero.".to_string()));
	}

	let total_count = count_companies(db, &query.scope).await?;
	let mut builder = QueryBuilder::<Postgres>::new("SELECT ");

	builder.push(COMPANY_COLUMNS);
	builder.push(" FROM companies c");
	push_scope(&mut builder, &query.scope);

	if let Some(after) = query.after.as_ref() {
		builder.push(" AND (c.company_name > ");
		builder.push_bind(after.name.clone());
		builder.push(" OR (c.company_name = ");
		builder.push_bind(after.name.clone());
		builder.push(" AND c.id > ");
		builder.push_bind(after.id);
		builder.push("))");
	}

	builder.push(" ORDER BY c.company_name ASC, c.id ASC");

	if let Some(limit) = query.limit {
		builder.push(" LIMIT ");
		builder.push_bind(i64::from(limit));
	}

	let rows: Vec<CompanyRow> = builder.build_query_as().fetch_all(&db.pool).await?;
	let companies = load_relations(db, rows).await?;

	Ok(CompanyPage { companies, total_count })
}

pub async fn count_companies(db: &Db, scope: &CompanyScope) -> Result<u64> {
	let mut builder = QueryBuilder::<Postgres>::new("SELECT count(*) FROM companies c");

	push_scope(&mut builder, scope);

	let count: i64 = builder.build_query_scalar().fetch_one(&db.pool).await?;

	Ok(u64::try_from(count).unwrap_or_default())
}

pub async fn fetch_preceding(
	db: &Db,
	scope: &CompanyScope,
	before: &Cursor,
) -> Result<Option<Cursor>> {
	let mut builder = QueryBuilder::<Postgres>::new("SELECT c.company_name, c.id FROM companies c");

	push_scope(&mut builder, scope);
	builder.push(" AND (c.company_name < ");
	builder.push_bind(before.name.clone());
	builder.push(" OR (c.company_name = ");
	builder.push_bind(before.name.clone());
	builder.push(" AND c.id < ");
	builder.push_bind(before.id);
	builder.push(")) ORDER BY c.company_name DESC, c.id DESC LIMIT 1");

	let row: Option<(String, Uuid)> = builder.build_query_as().fetch_optional(&db.pool).await?;

	Ok(row.map(|(name, id)| Cursor::new(name, id)))
}

pub async fn fetch_facility_states(db: &Db, scope: &CompanyScope) -> Result<Vec<FacilityStateRow>> {
	let mut builder = QueryBuilder::<Postgres>::new(
		"SELECT f.company_id, upper(btrim(f.state)) AS state \
		 FROM facilities f JOIN companies c ON c.id = f.company_id",
	);

	push_scope(&mut builder, scope);
	builder.push(" AND f.state IS NOT NULL AND btrim(f.state) <> ''");

	if let Some(predicate) = scope.facility.as_ref() {
		push_facility_match(&mut builder, "f", predicate);
	}

	Ok(builder.build_query_as().fetch_all(&db.pool).await?)
}

pub async fn fetch_capability_flags(db: &Db, scope: &CompanyScope) -> Result<Vec<Capabilities>> {
	let mut builder = QueryBuilder::<Postgres>::new(
		"SELECT cap.* FROM company_capabilities cap JOIN companies c ON c.id = cap.company_id",
	);

	push_scope(&mut builder, scope);

	Ok(builder.build_query_as().fetch_all(&db.pool).await?)
}

pub async fn fetch_company(db: &Db, company_id: Uuid) -> Result<Option<Company>> {
	let mut builder = QueryBuilder::<Postgres>::new("SELECT ");

	builder.push(COMPANY_COLUMNS);
	builder.push(" FROM companies c WHERE c.id = ");
	builder.push_bind(company_id);

	let row: Option<CompanyRow> = builder.build_query_as().fetch_optional(&db.pool).await?;
	let Some(row) = row else {
		return Ok(None);
	};

	Ok(load_relations(db, vec![row]).await?.into_iter().next())
}

/// Writes a company and all of its relations in one transaction.
pub async fn insert_company(db: &Db, company: &Company) -> Result<()> {
	let mut tx = db.pool.begin().await?;

	sqlx::query(
		"\
INSERT INTO companies (
	id,
	company_name,
	slug,
	description,
	website,
	employee_range,
	revenue_range,
	year_founded,
	created_at,
	updated_at
)
VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10)",
	)
	.bind(company.id)
	.bind(company.company_name.as_str())
	.bind(company.slug.as_str())
	.bind(company.description.as_deref())
	.bind(company.website.as_deref())
	.bind(company.employee_range.as_deref())
	.bind(company.revenue_range.as_deref())
	.bind(company.year_founded)
	.bind(company.created_at)
	.bind(company.updated_at)
	.execute(&mut *tx)
	.await?;

	for facility in &company.facilities {
		sqlx::query(
			"\
INSERT INTO facilities (
	id,
	company_id,
	city,
	state,
	country,
	latitude,
	longitude,
	facility_type,
	is_primary
)
VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9)",
		)
		.bind(facility.id)
		.bind(company.id)
		.bind(facility.city.as_deref())
		.bind(facility.state.as_deref())
		.bind(facility.country.as_str())
		.bind(facility.latitude)
		.bind(facility.longitude)
		.bind(facility.facility_type.as_deref())
		.bind(facility.is_primary)
		.execute(&mut *tx)
		.await?;
	}

	if let Some(caps) = company.capabilities.as_ref() {
		sqlx::query(
			"\
INSERT INTO company_capabilities (
	company_id,
	pcb_assembly_smt,
	pcb_assembly_through_hole,
	cable_harness_assembly,
	box_build_assembly,
	prototyping,
	pcb_assembly_fine_pitch,
	pcb_assembly_mixed,
	low_volume_production,
	medium_volume_production,
	high_volume_production
)
VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11)",
		)
		.bind(company.id)
		.bind(caps.smt)
		.bind(caps.through_hole)
		.bind(caps.cable_harness)
		.bind(caps.box_build)
		.bind(caps.prototyping)
		.bind(caps.fine_pitch)
		.bind(caps.mixed_technology)
		.bind(caps.low_volume)
		.bind(caps.medium_volume)
		.bind(caps.high_volume)
		.execute(&mut *tx)
		.await?;
	}

	for cert in &company.certifications {
		sqlx::query(
			"\
INSERT INTO certifications (id, company_id, certification_type, certifying_body)
VALUES ($1,$2,$3,$4)",
		)
		.bind(cert.id)
		.bind(company.id)
		.bind(cert.certification_type.as_str())
		.bind(cert.certifying_body.as_deref())
		.execute(&mut *tx)
		.await?;
	}

	for industry in &company.industries {
		sqlx::query("INSERT INTO industries (id, company_id, industry_name) VALUES ($1,$2,$3)")
			.bind(industry.id)
			.bind(company.id)
			.bind(industry.industry_name.as_str())
			.execute(&mut *tx)
			.await?;
	}

	tx.commit().await?;

	Ok(())
}

/// Appends ` WHERE ...` for `scope` against the `companies c` alias. One `EXISTS` sub-select per
/// child relation keeps the outer query at one row per company.
pub fn push_scope(builder: &mut QueryBuilder<'_, Postgres>, scope: &CompanyScope) {
	builder.push(" WHERE TRUE");

	if let Some(predicate) = scope.facility.as_ref() {
		builder.push(" AND EXISTS (SELECT 1 FROM facilities sf WHERE sf.company_id = c.id");
		push_facility_match(builder, "sf", predicate);
		builder.push(")");
	}
	if !scope.capabilities.is_empty() {
		builder.push(
			" AND EXISTS (SELECT 1 FROM company_capabilities sc WHERE sc.company_id = c.id AND (",
		);

		for (idx, slug) in scope.capabilities.iter().enumerate() {
			if idx > 0 {
				builder.push(" OR ");
			}

			builder.push("sc.");
			builder.push(capability_column(*slug));
		}

		builder.push("))");
	}
	if let Some(level) = scope.production_volume {
		builder.push(
			" AND EXISTS (SELECT 1 FROM company_capabilities sv WHERE sv.company_id = c.id AND sv.",
		);
		builder.push(volume_column(level));
		builder.push(")");
	}
	if let Some(certification) = scope.certification.as_ref() {
		builder.push(
			" AND EXISTS (SELECT 1 FROM certifications st WHERE st.company_id = c.id \
			 AND lower(st.certification_type) = lower(",
		);
		builder.push_bind(certification.clone());
		builder.push("))");
	}
}

fn push_facility_match(
	builder: &mut QueryBuilder<'_, Postgres>,
	alias: &str,
	predicate: &FacilityPredicate,
) {
	if !predicate.states.is_empty() {
		builder.push(format!(" AND upper(btrim({alias}.state)) = ANY("));
		builder.push_bind(predicate.states.clone());
		builder.push(")");
	}
	if let Some(bbox) = predicate.bbox {
		builder.push(format!(" AND {alias}.latitude BETWEEN "));
		builder.push_bind(bbox.min_lat);
		builder.push(" AND ");
		builder.push_bind(bbox.max_lat);
		builder.push(format!(" AND {alias}.longitude BETWEEN "));
		builder.push_bind(bbox.min_lng);
		builder.push(" AND ");
		builder.push_bind(bbox.max_lng);
	}
}

async fn load_relations(db: &Db, rows: Vec<CompanyRow>) -> Result<Vec<Company>> {
	if rows.is_empty() {
		return Ok(Vec::new());
	}

	let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
	let facilities: Vec<Facility> = sqlx::query_as(
		"\
SELECT id, company_id, city, state, country, latitude, longitude, facility_type, is_primary
FROM facilities
WHERE company_id = ANY($1)
ORDER BY company_id, is_primary DESC, id",
	)
	.bind(ids.as_slice())
	.fetch_all(&db.pool)
	.await?;
	let capabilities: Vec<Capabilities> =
		sqlx::query_as("SELECT * FROM company_capabilities WHERE company_id = ANY($1)")
			.bind(ids.as_slice())
			.fetch_all(&db.pool)
			.await?;
	let certifications: Vec<Certification> = sqlx::query_as(
		"\
SELECT id, company_id, certification_type, certifying_body
FROM certifications
WHERE company_id = ANY($1)
ORDER BY company_id, certification_type, id",
	)
	.bind(ids.as_slice())
	.fetch_all(&db.pool)
	.await?;
	let industries: Vec<Industry> = sqlx::query_as(
		"\
SELECT id, company_id, industry_name
FROM industries
WHERE company_id = ANY($1)
ORDER BY company_id, industry_name, id",
	)
	.bind(ids.as_slice())
	.fetch_all(&db.pool)
	.await?;
	let mut companies: Vec<Company> = rows.into_iter().map(Company::from_row).collect();
	let positions: HashMap<Uuid, usize> =
		companies.iter().enumerate().map(|(idx, company)| (company.id, idx)).collect();

	for facility in facilities {
		if let Some(idx) = positions.get(&facility.company_id) {
			companies[*idx].facilities.push(facility);
		}
	}
	for record in capabilities {
		if let Some(idx) = positions.get(&record.company_id) {
			companies[*idx].capabilities = Some(record);
		}
	}
	for cert in certifications {
		if let Some(idx) = positions.get(&cert.company_id) {
			companies[*idx].certifications.push(cert);
		}
	}
	for industry in industries {
		if let Some(idx) = positions.get(&industry.company_id) {
			companies[*idx].industries.push(industry);
		}
	}

	Ok(companies)
}
