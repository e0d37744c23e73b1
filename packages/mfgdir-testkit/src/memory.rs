use std::collections::HashSet;

use uuid::Uuid;

use mfgdir_domain::cursor::Cursor;
use mfgdir_storage::{
	BoxFuture, CompanyPage, CompanyScope, CompanyStore, Error, PageQuery, Result,
	models::{Capabilities, Company, FacilityStateRow},
};

/// In-process `CompanyStore` over a fixed set of companies.
///
/// Each relation predicate yields its own company-id set; the sets are intersected before any
/// company is materialized.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
	companies: Vec<Company>,
	join_rows: bool,
}
impl MemoryStore {
	pub fn new(mut companies: Vec<Company>) -> Self {
		companies.sort_by(|a, b| (&a.company_name, a.id).cmp(&(&b.company_name, b.id)));

		Self { companies, join_rows: false }
	}

	/// Emit one page row per matching facility, the way a naive parent/child join would.
	pub fn with_join_rows(mut self) -> Self {
		self.join_rows = true;

		self
	}

	fn matching_ids(&self, scope: &CompanyScope) -> HashSet<Uuid> {
		let mut matched: HashSet<Uuid> = self.companies.iter().map(|company| company.id).collect();

		if scope.facility.is_some() {
			let ids = self.ids_where(|company| scope.matches_facilities(&company.facilities));

			matched.retain(|id| ids.contains(id));
		}
		if !scope.capabilities.is_empty() {
			let ids =
				self.ids_where(|company| scope.matches_capabilities(company.capabilities.as_ref()));

			matched.retain(|id| ids.contains(id));
		}
		if scope.production_volume.is_some() {
			let ids = self.ids_where(|company| scope.matches_volume(company.capabilities.as_ref()));

			matched.retain(|id| ids.contains(id));
		}
		if scope.certification.is_some() {
			let ids =
				self.ids_where(|company| scope.matches_certifications(&company.certifications));

			matched.retain(|id| ids.contains(id));
		}

		matched
	}

	fn ids_where(&self, predicate: impl Fn(&Company) -> bool) -> HashSet<Uuid> {
		self.companies.iter().filter(|&company| predicate(company)).map(|company| company.id).collect()
	}

	fn scoped<'a>(&'a self, scope: &CompanyScope) -> impl Iterator<Item = &'a Company> + 'a {
		let matched = self.matching_ids(scope);

		self.companies.iter().filter(move |company| matched.contains(&company.id))
	}

	fn page(&self, query: &PageQuery) -> Result<CompanyPage> {
		if query.limit == Some(0) {
			return Err(Error::InvalidArgument("Page limit must be greater than zero.".to_string()));
		}

		let total_count = self.scoped(&query.scope).count() as u64;
		let after = query.after.as_ref();
		let limit = query.limit.map(|limit| limit as usize).unwrap_or(usize::MAX);
		let page: Vec<&Company> = self
			.scoped(&query.scope)
			.filter(|company| match after {
				Some(after) =>
					(company.company_name.as_str(), company.id) > (after.name.as_str(), after.id),
				None => true,
			})
			.take(limit)
			.collect();
		let mut companies = Vec::with_capacity(page.len());

		for company in page {
			let repeats = if self.join_rows {
				match query.scope.facility.as_ref() {
					Some(predicate) => company
						.facilities
						.iter()
						.filter(|facility| predicate.matches(facility))
						.count()
						.max(1),
					None => company.facilities.len().max(1),
				}
			} else {
				1
			};

			for _ in 0..repeats {
				companies.push(company.clone());
			}
		}

		Ok(CompanyPage { companies, total_count })
	}

	fn preceding(&self, scope: &CompanyScope, before: &Cursor) -> Option<Cursor> {
		self.scoped(scope)
			.filter(|company| {
				(company.company_name.as_str(), company.id) < (before.name.as_str(), before.id)
			})
			.last()
			.map(Company::cursor)
	}

	fn facility_states(&self, scope: &CompanyScope) -> Vec<FacilityStateRow> {
		let mut rows = Vec::new();

		for company in self.scoped(scope) {
			for facility in &company.facilities {
				if let Some(predicate) = scope.facility.as_ref()
					&& !predicate.matches(facility)
				{
					continue;
				}

				let Some(state) = facility.state.as_deref().map(str::trim) else {
					continue;
				};

				if state.is_empty() {
					continue;
				}

				rows.push(FacilityStateRow { company_id: company.id, state: state.to_uppercase() });
			}
		}

		rows
	}

	fn capability_flags(&self, scope: &CompanyScope) -> Vec<Capabilities> {
		self.scoped(scope).filter_map(|company| company.capabilities.clone()).collect()
	}
}
impl CompanyStore for MemoryStore {
	fn fetch_page<'a>(&'a self, query: &'a PageQuery) -> BoxFuture<'a, Result<CompanyPage>> {
		Box::pin(async move { self.page(query) })
	}

	fn fetch_preceding<'a>(
		&'a self,
		scope: &'a CompanyScope,
		before: &'a Cursor,
	) -> BoxFuture<'a, Result<Option<Cursor>>> {
		Box::pin(async move { Ok(self.preceding(scope, before)) })
	}

	fn fetch_facility_states<'a>(
		&'a self,
		scope: &'a CompanyScope,
	) -> BoxFuture<'a, Result<Vec<FacilityStateRow>>> {
		Box::pin(async move { Ok(self.facility_states(scope)) })
	}

	fn fetch_capability_flags<'a>(
		&'a self,
		scope: &'a CompanyScope,
	) -> BoxFuture<'a, Result<Vec<Capabilities>>> {
		Box::pin(async move { Ok(self.capability_flags(scope)) })
	}

	fn fetch_company<'a>(&'a self, company_id: Uuid) -> BoxFuture<'a, Result<Option<Company>>> {
		Box::pin(async move {
			Ok(self.companies.iter().find(|company| company.id == company_id).cloned())
		})
	}
}
