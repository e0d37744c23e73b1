use serde::{Deserialize, Serialize};

use crate::{
	capability::{CapabilitySlug, VolumeLevel},
	certification,
};

/// Filter values as selected by a user. Nothing here is trusted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawFilters {
	pub states: Vec<String>,
	pub capabilities: Vec<String>,
	pub production_volume: Option<String>,
}

/// Defaults implied by the page a search was issued from, e.g. a state or certification
/// landing page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteDefaults {
	pub state: Option<String>,
	pub cert_slug: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawBoundingBox {
	pub min_lng: Option<f64>,
	pub min_lat: Option<f64>,
	pub max_lng: Option<f64>,
	pub max_lat: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
	pub min_lng: f64,
	pub min_lat: f64,
	pub max_lng: f64,
	pub max_lat: f64,
}
impl BoundingBox {
	/// Inclusive on all four edges.
	pub fn contains(&self, lat: f64, lng: f64) -> bool {
		lat >= self.min_lat && lat <= self.max_lat && lng >= self.min_lng && lng <= self.max_lng
	}
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NormalizedFilters {
	pub states: Vec<String>,
	pub capabilities: Vec<CapabilitySlug>,
	pub production_volume: Option<VolumeLevel>,
	pub certification: Option<String>,
	pub bbox: Option<BoundingBox>,
}
impl NormalizedFilters {
	pub fn has_facet_filters(&self) -> bool {
		!self.states.is_empty()
			|| !self.capabilities.is_empty()
			|| self.production_volume.is_some()
			|| self.certification.is_some()
			|| self.bbox.is_some()
	}
}

pub fn normalize(
	raw: &RawFilters,
	route: Option<&RouteDefaults>,
	bbox: Option<&RawBoundingBox>,
) -> NormalizedFilters {
	let mut states = Vec::new();
	let route_state = route.and_then(|route| route.state.as_deref());

	for state in raw.states.iter().map(String::as_str).chain(route_state) {
		push_state(&mut states, state);
	}

	let mut capabilities = Vec::new();

	for slug in raw.capabilities.iter().filter_map(|raw| CapabilitySlug::parse(raw)) {
		if !capabilities.contains(&slug) {
			capabilities.push(slug);
		}
	}

	let production_volume = raw.production_volume.as_deref().and_then(VolumeLevel::parse);
	let certification = route
		.and_then(|route| route.cert_slug.as_deref())
		.and_then(certification::canonical_certification)
		.map(str::to_string);

	NormalizedFilters {
		states,
		capabilities,
		production_volume,
		certification,
		bbox: bbox.and_then(normalize_bbox),
	}
}

pub fn normalize_state(raw: &str) -> Option<String> {
	let state = raw.trim();

	if state.is_empty() {
		return None;
	}

	Some(state.to_uppercase())
}

fn push_state(states: &mut Vec<String>, raw: &str) {
	let Some(state) = normalize_state(raw) else {
		return;
	};

	if !states.contains(&state) {
		states.push(state);
	}
}

fn normalize_bbox(raw: &RawBoundingBox) -> Option<BoundingBox> {
	let bounds = [raw.min_lng?, raw.min_lat?, raw.max_lng?, raw.max_lat?];

	if !bounds.iter().all(|value| value.is_finite()) {
		return None;
	}

	let [min_lng, min_lat, max_lng, max_lat] = bounds;

	Some(BoundingBox { min_lng, min_lat, max_lng, max_lat })
}
