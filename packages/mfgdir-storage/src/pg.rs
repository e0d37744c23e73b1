use uuid::Uuid;

use mfgdir_domain::cursor::Cursor;

use crate::{
	BoxFuture, CompanyPage, CompanyStore, PageQuery, Result,
	db::Db,
	models::{Capabilities, Company, FacilityStateRow},
	queries,
	scope::CompanyScope,
};

pub struct PgCompanyStore {
	pub db: Db,
}
impl PgCompanyStore {
	pub fn new(db: Db) -> Self {
		Self { db }
	}
}
impl CompanyStore for PgCompanyStore {
	fn fetch_page<'a>(&'a self, query: &'a PageQuery) -> BoxFuture<'a, Result<CompanyPage>> {
		Box::pin(queries::fetch_page(&self.db, query))
	}

	fn fetch_preceding<'a>(
		&'a self,
		scope: &'a CompanyScope,
		before: &'a Cursor,
	) -> BoxFuture<'a, Result<Option<Cursor>>> {
		Box::pin(queries::fetch_preceding(&self.db, scope, before))
	}

	fn fetch_facility_states<'a>(
		&'a self,
		scope: &'a CompanyScope,
	) -> BoxFuture<'a, Result<Vec<FacilityStateRow>>> {
		Box::pin(queries::fetch_facility_states(&self.db, scope))
	}

	fn fetch_capability_flags<'a>(
		&'a self,
		scope: &'a CompanyScope,
	) -> BoxFuture<'a, Result<Vec<Capabilities>>> {
		Box::pin(queries::fetch_capability_flags(&self.db, scope))
	}

	fn fetch_company<'a>(&'a self, company_id: Uuid) -> BoxFuture<'a, Result<Option<Company>>> {
		Box::pin(queries::fetch_company(&self.db, company_id))
	}
}
