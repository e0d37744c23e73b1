use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mfgdir_domain::{
	capability::{CapabilitySlug, VolumeLevel},
	filters::NormalizedFilters,
};
use mfgdir_storage::{
	CompanyStore,
	models::{Capabilities, FacilityStateRow},
};

use crate::search::scope::{self, FacetKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateCount {
	pub code: String,
	pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityCount {
	pub slug: CapabilitySlug,
	pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeCount {
	pub level: VolumeLevel,
	pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetCounts {
	pub states: Vec<StateCount>,
	pub capabilities: Vec<CapabilityCount>,
	pub production_volume: Vec<VolumeCount>,
}
impl FacetCounts {
	/// Every table at zero. The states table lists only the selected states.
	pub fn zeroed(selected_states: &[String]) -> Self {
		Self {
			states: zero_states(selected_states),
			capabilities: zero_capabilities(),
			production_volume: zero_volumes(),
		}
	}

	pub fn state(&self, code: &str) -> Option<u64> {
		self.states.iter().find(|entry| entry.code == code).map(|entry| entry.count)
	}

	pub fn capability(&self, slug: CapabilitySlug) -> Option<u64> {
		self.capabilities.iter().find(|entry| entry.slug == slug).map(|entry| entry.count)
	}

	pub fn volume(&self, level: VolumeLevel) -> Option<u64> {
		self.production_volume.iter().find(|entry| entry.level == level).map(|entry| entry.count)
	}
}

/// Counts each facet with its own category suppressed. The three projections run concurrently,
/// and a failing projection yields a zero table for that facet alone.
pub async fn aggregate(store: &dyn CompanyStore, filters: &NormalizedFilters) -> FacetCounts {
	let state_scope = scope::apply_filters(filters, Some(FacetKind::States));
	let capability_scope = scope::apply_filters(filters, Some(FacetKind::Capabilities));
	let volume_scope = scope::apply_filters(filters, Some(FacetKind::ProductionVolume));
	let (states, capabilities, volumes) = tokio::join!(
		store.fetch_facility_states(&state_scope),
		store.fetch_capability_flags(&capability_scope),
		store.fetch_capability_flags(&volume_scope),
	);
	let states = match states {
		Ok(rows) => count_states(&rows, &filters.states),
		Err(err) => {
			tracing::warn!(error = %err, facet = "states", "Facet count failed.");

			zero_states(&filters.states)
		},
	};
	let capabilities = match capabilities {
		Ok(rows) => count_capabilities(&rows),
		Err(err) => {
			tracing::warn!(error = %err, facet = "capabilities", "Facet count failed.");

			zero_capabilities()
		},
	};
	let production_volume = match volumes {
		Ok(rows) => count_volumes(&rows),
		Err(err) => {
			tracing::warn!(error = %err, facet = "production_volume", "Facet count failed.");

			zero_volumes()
		},
	};

	FacetCounts { states, capabilities, production_volume }
}

fn count_states(rows: &[FacilityStateRow], selected: &[String]) -> Vec<StateCount> {
	let mut companies: HashMap<&str, HashSet<Uuid>> = HashMap::new();

	for row in rows {
		companies.entry(row.state.as_str()).or_default().insert(row.company_id);
	}

	let mut counts: Vec<StateCount> = companies
		.into_iter()
		.map(|(code, ids)| StateCount { code: code.to_string(), count: ids.len() as u64 })
		.collect();

	for code in selected {
		if !counts.iter().any(|entry| &entry.code == code) {
			counts.push(StateCount { code: code.clone(), count: 0 });
		}
	}

	counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.code.cmp(&b.code)));

	counts
}

fn count_capabilities(rows: &[Capabilities]) -> Vec<CapabilityCount> {
	CapabilitySlug::ALL
		.into_iter()
		.map(|slug| CapabilityCount { slug, count: distinct_where(rows, |row| row.has(slug)) })
		.collect()
}

fn count_volumes(rows: &[Capabilities]) -> Vec<VolumeCount> {
	VolumeLevel::ALL
		.into_iter()
		.map(|level| VolumeCount { level, count: distinct_where(rows, |row| row.has_volume(level)) })
		.collect()
}

fn distinct_where(rows: &[Capabilities], predicate: impl Fn(&Capabilities) -> bool) -> u64 {
	let ids: HashSet<Uuid> =
		rows.iter().filter(|&row| predicate(row)).map(|row| row.company_id).collect();

	ids.len() as u64
}

fn zero_states(selected: &[String]) -> Vec<StateCount> {
	let mut codes = selected.to_vec();

	codes.sort();

	codes.into_iter().map(|code| StateCount { code, count: 0 }).collect()
}

fn zero_capabilities() -> Vec<CapabilityCount> {
	CapabilitySlug::ALL.into_iter().map(|slug| CapabilityCount { slug, count: 0 }).collect()
}

fn zero_volumes() -> Vec<VolumeCount> {
	VolumeLevel::ALL.into_iter().map(|level| VolumeCount { level, count: 0 }).collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn state_row(company: u128, state: &str) -> FacilityStateRow {
		FacilityStateRow { company_id: Uuid::from_u128(company), state: state.to_string() }
	}

	#[test]
	fn states_count_companies_not_facilities() {
		let rows =
			vec![state_row(1, "CA"), state_row(1, "CA"), state_row(2, "CA"), state_row(1, "TX")];
		let counts = count_states(&rows, &[]);

		assert_eq!(
			counts,
			vec![
				StateCount { code: "CA".to_string(), count: 2 },
				StateCount { code: "TX".to_string(), count: 1 },
			]
		);
	}

	#[test]
	fn states_order_by_count_then_code_and_keep_empty_selections() {
		let rows = vec![state_row(1, "TX"), state_row(2, "AZ"), state_row(3, "TX")];
		let counts = count_states(&rows, &["NV".to_string(), "TX".to_string()]);
		let codes: Vec<&str> = counts.iter().map(|entry| entry.code.as_str()).collect();

		assert_eq!(codes, vec!["TX", "AZ", "NV"]);
		assert_eq!(counts[2].count, 0);
	}

	#[test]
	fn capability_table_lists_every_slug_in_order() {
		let rows = vec![
			Capabilities { company_id: Uuid::from_u128(1), smt: true, ..Default::default() },
			Capabilities {
				company_id: Uuid::from_u128(2),
				smt: true,
				box_build: true,
				..Default::default()
			},
		];
		let counts = count_capabilities(&rows);
		let slugs: Vec<CapabilitySlug> = counts.iter().map(|entry| entry.slug).collect();

		assert_eq!(slugs, CapabilitySlug::ALL.to_vec());
		assert_eq!(counts[0], CapabilityCount { slug: CapabilitySlug::Smt, count: 2 });
		assert_eq!(counts[3], CapabilityCount { slug: CapabilitySlug::BoxBuild, count: 1 });
	}

	#[test]
	fn zeroed_tables_keep_vocabulary_and_selection() {
		let counts = FacetCounts::zeroed(&["TX".to_string(), "CA".to_string()]);

		assert_eq!(counts.states.len(), 2);
		assert_eq!(counts.states[0].code, "CA");
		assert!(counts.states.iter().all(|entry| entry.count == 0));
		assert_eq!(counts.capabilities.len(), CapabilitySlug::ALL.len());
		assert_eq!(counts.production_volume.len(), VolumeLevel::ALL.len());
		assert_eq!(counts.volume(VolumeLevel::High), Some(0));
	}
}
