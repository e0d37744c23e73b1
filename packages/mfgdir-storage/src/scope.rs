use mfgdir_domain::{
	capability::{CapabilitySlug, VolumeLevel},
	filters::BoundingBox,
};

use crate::models::{Capabilities, Certification, Facility};

/// Predicates a company must satisfy, one per child relation.
///
/// Categories combine with AND. Multi-valued categories (states, capabilities) match on any
/// selected value. Every store evaluates each relation on its own and joins the outcomes by
/// company id, so a company never appears once per matching child row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompanyScope {
	pub facility: Option<FacilityPredicate>,
	pub capabilities: Vec<CapabilitySlug>,
	pub production_volume: Option<VolumeLevel>,
	pub certification: Option<String>,
}
impl CompanyScope {
	pub fn matches_facilities(&self, facilities: &[Facility]) -> bool {
		match &self.facility {
			Some(predicate) => facilities.iter().any(|facility| predicate.matches(facility)),
			None => true,
		}
	}

	pub fn matches_capabilities(&self, capabilities: Option<&Capabilities>) -> bool {
		if self.capabilities.is_empty() {
			return true;
		}

		capabilities
			.map(|record| self.capabilities.iter().any(|slug| record.has(*slug)))
			.unwrap_or(false)
	}

	pub fn matches_volume(&self, capabilities: Option<&Capabilities>) -> bool {
		match self.production_volume {
			Some(level) => capabilities.map(|record| record.has_volume(level)).unwrap_or(false),
			None => true,
		}
	}

	pub fn matches_certifications(&self, certifications: &[Certification]) -> bool {
		match &self.certification {
			Some(wanted) => certifications
				.iter()
				.any(|cert| cert.certification_type.eq_ignore_ascii_case(wanted)),
			None => true,
		}
	}
}

/// Conditions on a single facility row. A company matches when one facility satisfies all of
/// them at once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FacilityPredicate {
	/// Upper-cased state codes; empty means any state.
	pub states: Vec<String>,
	pub bbox: Option<BoundingBox>,
}
impl FacilityPredicate {
	pub fn new(states: Vec<String>, bbox: Option<BoundingBox>) -> Option<Self> {
		if states.is_empty() && bbox.is_none() {
			return None;
		}

		Some(Self { states, bbox })
	}

	pub fn matches(&self, facility: &Facility) -> bool {
		if !self.states.is_empty() {
			let Some(state) = facility.state.as_deref() else {
				return false;
			};
			let state = state.trim().to_uppercase();

			if !self.states.contains(&state) {
				return false;
			}
		}
		if let Some(bbox) = self.bbox.as_ref() {
			let (Some(lat), Some(lng)) = (facility.latitude, facility.longitude) else {
				return false;
			};

			if !bbox.contains(lat, lng) {
				return false;
			}
		}

		true
	}
}
