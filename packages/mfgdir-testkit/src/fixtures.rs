//! A small, hand-checked manufacturer directory.
//!
//! Company ids are `Uuid::from_u128(1..=12)` and follow alphabetical order of the names.

use time::{OffsetDateTime, macros::datetime};
use uuid::Uuid;

use mfgdir_domain::capability::{CapabilitySlug, VolumeLevel};
use mfgdir_storage::models::{Capabilities, Certification, Company, Facility, Industry};

const CREATED_AT: OffsetDateTime = datetime!(2024-03-01 12:00 UTC);

struct Site {
	city: &'static str,
	state: &'static str,
	coords: Option<(f64, f64)>,
}

struct Entry {
	name: &'static str,
	sites: &'static [Site],
	capabilities: &'static [CapabilitySlug],
	volumes: &'static [VolumeLevel],
	certifications: &'static [&'static str],
	industries: &'static [&'static str],
}

const fn site(city: &'static str, state: &'static str, lat: f64, lng: f64) -> Site {
	Site { city, state, coords: Some((lat, lng)) }
}

const DIRECTORY: [Entry; 12] = [
	Entry {
		name: "Acme Electronics",
		sites: &[site("San Jose", "CA", 37.34, -121.89), site("Austin", "TX", 30.27, -97.74)],
		capabilities: &[CapabilitySlug::Smt, CapabilitySlug::BoxBuild],
		volumes: &[VolumeLevel::Medium],
		certifications: &["ISO 9001"],
		industries: &["Industrial"],
	},
	Entry {
		name: "Bay Circuit Works",
		sites: &[site("Fremont", "CA", 37.55, -121.99), site("San Diego", "CA", 32.72, -117.16)],
		capabilities: &[CapabilitySlug::Smt, CapabilitySlug::Prototyping],
		volumes: &[VolumeLevel::Medium, VolumeLevel::Low],
		certifications: &["ISO 9001"],
		industries: &["Consumer Electronics"],
	},
	Entry {
		name: "Cascade Assembly",
		sites: &[site("Portland", "OR", 45.52, -122.68)],
		capabilities: &[
			CapabilitySlug::ThroughHole,
			CapabilitySlug::CableHarness,
			CapabilitySlug::BoxBuild,
		],
		volumes: &[VolumeLevel::Low],
		certifications: &[],
		industries: &["Industrial"],
	},
	Entry {
		name: "Delta PCB Solutions",
		sites: &[site("Dallas", "TX", 32.78, -96.80)],
		capabilities: &[CapabilitySlug::Smt],
		volumes: &[VolumeLevel::High],
		certifications: &["AS9100"],
		industries: &["Aerospace"],
	},
	Entry {
		name: "Evergreen Manufacturing",
		sites: &[site("Seattle", "WA", 47.61, -122.33)],
		capabilities: &[CapabilitySlug::BoxBuild],
		volumes: &[VolumeLevel::Medium],
		certifications: &[],
		industries: &[],
	},
	Entry {
		name: "Frontier Harness Co",
		sites: &[site("El Paso", "TX", 31.76, -106.49), site("Phoenix", "AZ", 33.45, -112.07)],
		capabilities: &[CapabilitySlug::CableHarness],
		volumes: &[VolumeLevel::Low],
		certifications: &[],
		industries: &["Automotive"],
	},
	Entry {
		name: "Golden State Assembly",
		sites: &[site("Irvine", "CA", 33.68, -117.83)],
		capabilities: &[CapabilitySlug::Smt, CapabilitySlug::FinePitch],
		volumes: &[VolumeLevel::Medium],
		certifications: &["ISO 13485"],
		industries: &["Medical"],
	},
	Entry {
		name: "Horizon Contract Mfg",
		sites: &[site("Santa Clara", "CA", 37.35, -121.96)],
		capabilities: &[CapabilitySlug::Smt, CapabilitySlug::BoxBuild],
		volumes: &[VolumeLevel::Medium, VolumeLevel::High],
		certifications: &["ISO 9001", "ITAR"],
		industries: &["Aerospace", "Defense"],
	},
	Entry {
		name: "Lone Star Box Build",
		sites: &[site("Houston", "TX", 29.76, -95.37)],
		capabilities: &[CapabilitySlug::BoxBuild],
		volumes: &[VolumeLevel::High],
		certifications: &[],
		industries: &["Energy"],
	},
	Entry {
		name: "Northern Lights EMS",
		sites: &[site("Minneapolis", "MN", 44.98, -93.27)],
		capabilities: &[CapabilitySlug::Smt],
		volumes: &[VolumeLevel::Low],
		certifications: &[],
		industries: &["Medical"],
	},
	Entry {
		name: "Pacific Rim Electronics",
		sites: &[Site { city: "Los Angeles", state: "CA", coords: None }],
		capabilities: &[CapabilitySlug::ThroughHole],
		volumes: &[VolumeLevel::Low],
		certifications: &[],
		industries: &[],
	},
	Entry {
		name: "Summit Technologies",
		sites: &[site("Denver", "CO", 39.74, -104.99)],
		capabilities: &[CapabilitySlug::Smt, CapabilitySlug::MixedTechnology],
		volumes: &[VolumeLevel::High],
		certifications: &[],
		industries: &["Industrial"],
	},
];

pub fn company_id(n: u128) -> Uuid {
	Uuid::from_u128(n)
}

/// The twelve-company directory, in `(company_name, id)` order.
pub fn manufacturers() -> Vec<Company> {
	DIRECTORY
		.iter()
		.zip(1_u128..)
		.map(|(entry, n)| {
			let id = company_id(n);
			let mut company = bare_company(id, entry.name);

			company.facilities = entry
				.sites
				.iter()
				.zip(1_u128..)
				.map(|(site, seq)| {
					let mut facility = facility(id, seq, Some(site.state), site.coords);

					facility.city = Some(site.city.to_string());

					facility
				})
				.collect();
			company.capabilities = Some(capabilities(id, entry.capabilities, entry.volumes));
			company.certifications = entry
				.certifications
				.iter()
				.zip(1_u128..)
				.map(|(kind, seq)| Certification {
					id: child_id(id, 0x20, seq),
					company_id: id,
					certification_type: kind.to_string(),
					certifying_body: None,
				})
				.collect();
			company.industries = entry
				.industries
				.iter()
				.zip(1_u128..)
				.map(|(name, seq)| Industry {
					id: child_id(id, 0x30, seq),
					company_id: id,
					industry_name: name.to_string(),
				})
				.collect();

			company
		})
		.collect()
}

/// A company with no child rows.
pub fn bare_company(id: Uuid, name: &str) -> Company {
	Company {
		id,
		company_name: name.to_string(),
		slug: slugify(name, id),
		description: None,
		website: None,
		employee_range: None,
		revenue_range: None,
		year_founded: None,
		created_at: CREATED_AT,
		updated_at: CREATED_AT,
		facilities: Vec::new(),
		capabilities: None,
		certifications: Vec::new(),
		industries: Vec::new(),
	}
}

pub fn facility(
	company_id: Uuid,
	seq: u128,
	state: Option<&str>,
	coords: Option<(f64, f64)>,
) -> Facility {
	Facility {
		id: child_id(company_id, 0x10, seq),
		company_id,
		city: None,
		state: state.map(str::to_string),
		country: "US".to_string(),
		latitude: coords.map(|(lat, _)| lat),
		longitude: coords.map(|(_, lng)| lng),
		facility_type: None,
		is_primary: seq == 1,
	}
}

pub fn capabilities(
	company_id: Uuid,
	slugs: &[CapabilitySlug],
	volumes: &[VolumeLevel],
) -> Capabilities {
	let has = |slug| slugs.contains(&slug);
	let runs = |level| volumes.contains(&level);

	Capabilities {
		company_id,
		smt: has(CapabilitySlug::Smt),
		through_hole: has(CapabilitySlug::ThroughHole),
		cable_harness: has(CapabilitySlug::CableHarness),
		box_build: has(CapabilitySlug::BoxBuild),
		prototyping: has(CapabilitySlug::Prototyping),
		fine_pitch: has(CapabilitySlug::FinePitch),
		mixed_technology: has(CapabilitySlug::MixedTechnology),
		low_volume: runs(VolumeLevel::Low),
		medium_volume: runs(VolumeLevel::Medium),
		high_volume: runs(VolumeLevel::High),
	}
}

fn child_id(company_id: Uuid, kind: u128, seq: u128) -> Uuid {
	Uuid::from_u128((company_id.as_u128() << 16) | (kind << 8) | seq)
}

fn slugify(name: &str, id: Uuid) -> String {
	let base: String = name
		.chars()
		.map(|ch| if ch.is_ascii_alphanumeric() { ch.to_ascii_lowercase() } else { '-' })
		.collect();

	format!("{base}-{}", id.simple())
}
