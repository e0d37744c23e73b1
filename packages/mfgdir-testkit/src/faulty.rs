use std::{
	collections::HashSet,
	sync::atomic::{AtomicUsize, Ordering},
};

use uuid::Uuid;

use mfgdir_domain::cursor::Cursor;
use mfgdir_storage::{
	BoxFuture, CompanyPage, CompanyScope, CompanyStore, Error, PageQuery, Result,
	models::{Capabilities, Company, FacilityStateRow},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
	Page,
	Preceding,
	FacilityStates,
	CapabilityFlags,
	Company,
}
impl StoreOp {
	const ALL: [Self; 5] =
		[Self::Page, Self::Preceding, Self::FacilityStates, Self::CapabilityFlags, Self::Company];

	fn index(self) -> usize {
		Self::ALL.iter().position(|op| *op == self).unwrap_or_default()
	}
}

/// Wraps a store and fails the selected operations with a pool timeout.
///
/// Every call is counted, failing or not.
#[derive(Debug)]
pub struct FaultyStore<S> {
	inner: S,
	failing: HashSet<StoreOp>,
	calls: [AtomicUsize; 5],
}
impl<S> FaultyStore<S>
where
	S: CompanyStore,
{
	pub fn new(inner: S) -> Self {
		Self { inner, failing: HashSet::new(), calls: Default::default() }
	}

	pub fn failing(mut self, op: StoreOp) -> Self {
		self.failing.insert(op);

		self
	}

	pub fn calls(&self, op: StoreOp) -> usize {
		self.calls[op.index()].load(Ordering::SeqCst)
	}

	fn record(&self, op: StoreOp) -> Result<()> {
		self.calls[op.index()].fetch_add(1, Ordering::SeqCst);

		if self.failing.contains(&op) {
			return Err(Error::Sqlx(sqlx::Error::PoolTimedOut));
		}

		Ok(())
	}
}
impl<S> CompanyStore for FaultyStore<S>
where
	S: CompanyStore,
{
	fn fetch_page<'a>(&'a self, query: &'a PageQuery) -> BoxFuture<'a, Result<CompanyPage>> {
		Box::pin(async move {
			self.record(StoreOp::Page)?;
			self.inner.fetch_page(query).await
		})
	}

	fn fetch_preceding<'a>(
		&'a self,
		scope: &'a CompanyScope,
		before: &'a Cursor,
	) -> BoxFuture<'a, Result<Option<Cursor>>> {
		Box::pin(async move {
			self.record(StoreOp::Preceding)?;
			self.inner.fetch_preceding(scope, before).await
		})
	}

	fn fetch_facility_states<'a>(
		&'a self,
		scope: &'a CompanyScope,
	) -> BoxFuture<'a, Result<Vec<FacilityStateRow>>> {
		Box::pin(async move {
			self.record(StoreOp::FacilityStates)?;
			self.inner.fetch_facility_states(scope).await
		})
	}

	fn fetch_capability_flags<'a>(
		&'a self,
		scope: &'a CompanyScope,
	) -> BoxFuture<'a, Result<Vec<Capabilities>>> {
		Box::pin(async move {
			self.record(StoreOp::CapabilityFlags)?;
			self.inner.fetch_capability_flags(scope).await
		})
	}

	fn fetch_company<'a>(&'a self, company_id: Uuid) -> BoxFuture<'a, Result<Option<Company>>> {
		Box::pin(async move {
			self.record(StoreOp::Company)?;
			self.inner.fetch_company(company_id).await
		})
	}
}
