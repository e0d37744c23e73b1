use std::{future::Future, pin::Pin};

use uuid::Uuid;

use mfgdir_domain::cursor::Cursor;

use crate::{
	Result,
	models::{Capabilities, Company, FacilityStateRow},
	scope::CompanyScope,
};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone, Default)]
pub struct PageQuery {
	pub scope: CompanyScope,
	/// Exclusive keyset lower bound in `(company_name, id)` order.
	pub after: Option<Cursor>,
	/// `None` returns every match.
	pub limit: Option<u32>,
}

#[derive(Debug, Clone, Default)]
pub struct CompanyPage {
	pub companies: Vec<Company>,
	/// Exact size of the scoped match set, ignoring `after` and `limit`.
	pub total_count: u64,
}

/// Read access to the company directory.
///
/// Implementations filter each child relation independently and return companies ordered by
/// `(company_name, id)` ascending.
pub trait CompanyStore
where
	Self: Send + Sync,
{
	fn fetch_page<'a>(&'a self, query: &'a PageQuery) -> BoxFuture<'a, Result<CompanyPage>>;

	/// The scoped row immediately before `before`, if any.
	fn fetch_preceding<'a>(
		&'a self,
		scope: &'a CompanyScope,
		before: &'a Cursor,
	) -> BoxFuture<'a, Result<Option<Cursor>>>;

	/// `(company_id, state)` for every facility of a scoped company that satisfies the scope's
	/// facility predicate. Blank states are omitted; states are upper-cased.
	fn fetch_facility_states<'a>(
		&'a self,
		scope: &'a CompanyScope,
	) -> BoxFuture<'a, Result<Vec<FacilityStateRow>>>;

	/// Capability records of scoped companies. Companies without a record are omitted.
	fn fetch_capability_flags<'a>(
		&'a self,
		scope: &'a CompanyScope,
	) -> BoxFuture<'a, Result<Vec<Capabilities>>>;

	fn fetch_company<'a>(&'a self, company_id: Uuid) -> BoxFuture<'a, Result<Option<Company>>>;
}
