use mfgdir_domain::filters::NormalizedFilters;
use mfgdir_storage::{CompanyScope, FacilityPredicate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacetKind {
	States,
	Capabilities,
	ProductionVolume,
}

/// Builds the store scope for `filters`, leaving out the category named by `skip`.
///
/// The main query passes `None`. Each facet passes its own category so its counts reflect every
/// other active filter. The bounding box is never skipped.
pub fn apply_filters(filters: &NormalizedFilters, skip: Option<FacetKind>) -> CompanyScope {
	let states = match skip {
		Some(FacetKind::States) => Vec::new(),
		_ => filters.states.clone(),
	};
	let capabilities = match skip {
		Some(FacetKind::Capabilities) => Vec::new(),
		_ => filters.capabilities.clone(),
	};
	let production_volume = match skip {
		Some(FacetKind::ProductionVolume) => None,
		_ => filters.production_volume,
	};

	CompanyScope {
		facility: FacilityPredicate::new(states, filters.bbox),
		capabilities,
		production_volume,
		certification: filters.certification.clone(),
	}
}
