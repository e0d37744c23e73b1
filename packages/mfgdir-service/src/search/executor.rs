use std::collections::HashSet;

use uuid::Uuid;

use mfgdir_domain::cursor::Cursor;
use mfgdir_storage::{CompanyScope, CompanyStore, PageQuery, models::Company};

#[derive(Debug, Clone, Default)]
pub struct PageOutcome {
	pub companies: Vec<Company>,
	pub total_count: u64,
	pub has_next: bool,
	pub has_prev: bool,
	pub next_cursor: Option<String>,
	pub prev_cursor: Option<String>,
}

/// Runs the main keyset query and, for a cursored non-empty page, the previous-row lookup.
///
/// `limit` is the page size; one extra row is requested to detect a following page. Only the
/// main query can fail this call.
pub async fn fetch_page(
	store: &dyn CompanyStore,
	scope: CompanyScope,
	after: Option<Cursor>,
	limit: Option<u32>,
) -> mfgdir_storage::Result<PageOutcome> {
	let cursored = after.is_some();
	let query = PageQuery { scope, after, limit: limit.map(|limit| limit.saturating_add(1)) };
	let page = store.fetch_page(&query).await?;
	let mut companies = distinct(page.companies);
	let has_next = match limit {
		Some(limit) => companies.len() > limit as usize,
		None => false,
	};

	if let Some(limit) = limit {
		companies.truncate(limit as usize);
	}

	let next_cursor =
		if has_next { companies.last().map(|company| company.cursor().encode()) } else { None };
	let prev_cursor = match companies.first() {
		Some(first) if cursored => preceding(store, &query.scope, &first.cursor()).await,
		_ => None,
	};

	Ok(PageOutcome {
		companies,
		total_count: page.total_count,
		has_next,
		has_prev: prev_cursor.is_some(),
		next_cursor,
		prev_cursor,
	})
}

async fn preceding(store: &dyn CompanyStore, scope: &CompanyScope, first: &Cursor) -> Option<String> {
	match store.fetch_preceding(scope, first).await {
		Ok(anchor) => anchor.map(|cursor| cursor.encode()),
		Err(err) => {
			tracing::warn!(
				error = %err,
				company_name = first.name.as_str(),
				company_id = %first.id,
				"Previous page lookup failed."
			);

			None
		},
	}
}

fn distinct(rows: Vec<Company>) -> Vec<Company> {
	let mut seen: HashSet<Uuid> = HashSet::with_capacity(rows.len());

	rows.into_iter().filter(|company| seen.insert(company.id)).collect()
}
