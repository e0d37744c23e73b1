pub mod executor;
pub mod facets;
pub mod scope;

pub use facets::{CapabilityCount, FacetCounts, StateCount, VolumeCount};

use serde::{Deserialize, Serialize};

use mfgdir_domain::{
	cursor::CursorToken,
	filters::{self, NormalizedFilters, RawBoundingBox, RawFilters, RouteDefaults},
};
use mfgdir_storage::models::Company;

use crate::{DirectoryService, Error, Result, search::executor::PageOutcome};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchRequest {
	pub filters: RawFilters,
	pub route_defaults: Option<RouteDefaults>,
	/// Opaque token taken from a previous response.
	pub cursor: Option<String>,
	pub page_size: Option<u32>,
	pub include_facet_counts: bool,
	pub bbox: Option<RawBoundingBox>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
	pub companies: Vec<Company>,
	pub total_count: u64,
	pub has_next: bool,
	pub has_prev: bool,
	pub next_cursor: Option<String>,
	pub prev_cursor: Option<String>,
	pub facet_counts: Option<FacetCounts>,
}

impl DirectoryService {
	/// Runs one faceted directory search.
	///
	/// Store failures never surface as errors. A failed main query yields an empty page (with
	/// zero-valued facet tables when requested); a failed facet or previous-page lookup degrades
	/// only its own part of the response. Only a zero `page_size` is rejected.
	pub async fn search(&self, req: SearchRequest) -> Result<SearchResponse> {
		let filters =
			filters::normalize(&req.filters, req.route_defaults.as_ref(), req.bbox.as_ref());
		let cursor = CursorToken::from_optional(req.cursor.as_deref()).into_cursor();
		let limit = self.resolve_page_size(req.page_size, &filters, cursor.is_some())?;
		let store = self.store.as_ref();
		let main_scope = scope::apply_filters(&filters, None);
		let (page, facet_counts) = tokio::join!(
			executor::fetch_page(store, main_scope, cursor, limit),
			async {
				if req.include_facet_counts {
					Some(facets::aggregate(store, &filters).await)
				} else {
					None
				}
			},
		);

		match page {
			Ok(page) => Ok(assemble(page, facet_counts)),
			Err(err) => {
				tracing::error!(
					error = %err,
					states = ?filters.states,
					capabilities = ?filters.capabilities,
					production_volume = ?filters.production_volume,
					certification = ?filters.certification,
					bbox = ?filters.bbox,
					"Company search query failed."
				);

				Ok(SearchResponse {
					facet_counts: facet_counts.map(|_| FacetCounts::zeroed(&filters.states)),
					..Default::default()
				})
			},
		}
	}

	/// `None` means every match is returned.
	fn resolve_page_size(
		&self,
		requested: Option<u32>,
		filters: &NormalizedFilters,
		cursored: bool,
	) -> Result<Option<u32>> {
		let search = &self.cfg.search;

		match requested {
			Some(0) => Err(Error::InvalidRequest {
				message: "page_size must be greater than zero.".to_string(),
			}),
			Some(size) => Ok(Some(size.min(search.max_page_size))),
			None if cursored || filters.has_facet_filters() => Ok(Some(search.default_page_size)),
			None => Ok(None),
		}
	}
}

fn assemble(page: PageOutcome, facet_counts: Option<FacetCounts>) -> SearchResponse {
	SearchResponse {
		companies: page.companies,
		total_count: page.total_count,
		has_next: page.has_next,
		has_prev: page.has_prev,
		next_cursor: page.next_cursor,
		prev_cursor: page.prev_cursor,
		facet_counts,
	}
}
