use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use mfgdir_domain::{
	capability::{CapabilitySlug, VolumeLevel},
	cursor::Cursor,
};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CompanyRow {
	pub id: Uuid,
	pub company_name: String,
	pub slug: String,
	pub description: Option<String>,
	pub website: Option<String>,
	pub employee_range: Option<String>,
	pub revenue_range: Option<String>,
	pub year_founded: Option<i32>,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Facility {
	pub id: Uuid,
	pub company_id: Uuid,
	pub city: Option<String>,
	pub state: Option<String>,
	pub country: String,
	pub latitude: Option<f64>,
	pub longitude: Option<f64>,
	pub facility_type: Option<String>,
	pub is_primary: bool,
}

/// One row per company. Column names follow the table; serialized names follow the slugs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Capabilities {
	pub company_id: Uuid,
	#[sqlx(rename = "pcb_assembly_smt")]
	pub smt: bool,
	#[sqlx(rename = "pcb_assembly_through_hole")]
	pub through_hole: bool,
	#[sqlx(rename = "cable_harness_assembly")]
	pub cable_harness: bool,
	#[sqlx(rename = "box_build_assembly")]
	pub box_build: bool,
	pub prototyping: bool,
	#[sqlx(rename = "pcb_assembly_fine_pitch")]
	pub fine_pitch: bool,
	#[sqlx(rename = "pcb_assembly_mixed")]
	pub mixed_technology: bool,
	#[sqlx(rename = "low_volume_production")]
	pub low_volume: bool,
	#[sqlx(rename = "medium_volume_production")]
	pub medium_volume: bool,
	#[sqlx(rename = "high_volume_production")]
	pub high_volume: bool,
}
impl Capabilities {
	pub fn has(&self, slug: CapabilitySlug) -> bool {
		match slug {
			CapabilitySlug::Smt => self.smt,
			CapabilitySlug::ThroughHole => self.through_hole,
			CapabilitySlug::CableHarness => self.cable_harness,
			CapabilitySlug::BoxBuild => self.box_build,
			CapabilitySlug::Prototyping => self.prototyping,
			CapabilitySlug::FinePitch => self.fine_pitch,
			CapabilitySlug::MixedTechnology => self.mixed_technology,
		}
	}

	pub fn has_volume(&self, level: VolumeLevel) -> bool {
		match level {
			VolumeLevel::Low => self.low_volume,
			VolumeLevel::Medium => self.medium_volume,
			VolumeLevel::High => self.high_volume,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Certification {
	pub id: Uuid,
	pub company_id: Uuid,
	pub certification_type: String,
	pub certifying_body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Industry {
	pub id: Uuid,
	pub company_id: Uuid,
	pub industry_name: String,
}

/// A company together with its child relations, as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
	pub id: Uuid,
	pub company_name: String,
	pub slug: String,
	pub description: Option<String>,
	pub website: Option<String>,
	pub employee_range: Option<String>,
	pub revenue_range: Option<String>,
	pub year_founded: Option<i32>,
	#[serde(with = "time::serde::rfc3339")]
	pub created_at: OffsetDateTime,
	#[serde(with = "time::serde::rfc3339")]
	pub updated_at: OffsetDateTime,
	pub facilities: Vec<Facility>,
	pub capabilities: Option<Capabilities>,
	pub certifications: Vec<Certification>,
	pub industries: Vec<Industry>,
}
impl Company {
	pub fn from_row(row: CompanyRow) -> Self {
		Self {
			id: row.id,
			company_name: row.company_name,
			slug: row.slug,
			description: row.description,
			website: row.website,
			employee_range: row.employee_range,
			revenue_range: row.revenue_range,
			year_founded: row.year_founded,
			created_at: row.created_at,
			updated_at: row.updated_at,
			facilities: Vec::new(),
			capabilities: None,
			certifications: Vec::new(),
			industries: Vec::new(),
		}
	}

	pub fn cursor(&self) -> Cursor {
		Cursor::new(self.company_name.clone(), self.id)
	}
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct FacilityStateRow {
	pub company_id: Uuid,
	pub state: String,
}

pub fn capability_column(slug: CapabilitySlug) -> &'static str {
	match slug {
		CapabilitySlug::Smt => "pcb_assembly_smt",
		CapabilitySlug::ThroughHole => "pcb_assembly_through_hole",
		CapabilitySlug::CableHarness => "cable_harness_assembly",
		CapabilitySlug::BoxBuild => "box_build_assembly",
		CapabilitySlug::Prototyping => "prototyping",
		CapabilitySlug::FinePitch => "pcb_assembly_fine_pitch",
		CapabilitySlug::MixedTechnology => "pcb_assembly_mixed",
	}
}

pub fn volume_column(level: VolumeLevel) -> &'static str {
	match level {
		VolumeLevel::Low => "low_volume_production",
		VolumeLevel::Medium => "medium_volume_production",
		VolumeLevel::High => "high_volume_production",
	}
}

#[cfg(test)]
mod tests {
	use time::macros::datetime;

	use super::*;

	#[test]
	fn company_serializes_rfc3339_and_slug_named_flags() {
		let id = Uuid::from_u128(7);
		let company = Company {
			capabilities: Some(Capabilities {
				company_id: id,
				fine_pitch: true,
				..Default::default()
			}),
			..Company::from_row(CompanyRow {
				id,
				company_name: "Golden State Assembly".to_string(),
				slug: "golden-state-assembly".to_string(),
				description: None,
				website: None,
				employee_range: None,
				revenue_range: None,
				year_founded: Some(1998),
				created_at: datetime!(2024-03-01 12:00 UTC),
				updated_at: datetime!(2024-03-02 08:30 UTC),
			})
		};
		let json = serde_json::to_value(&company).expect("Failed to serialize company.");

		assert_eq!(json["created_at"], "2024-03-01T12:00:00Z");
		assert_eq!(json["capabilities"]["fine_pitch"], true);
		assert_eq!(json["capabilities"]["mixed_technology"], false);
		assert_eq!(json["facilities"], serde_json::json!([]));

		let back: Company = serde_json::from_value(json).expect("Failed to deserialize company.");

		assert_eq!(back, company);
	}

	#[test]
	fn capability_helpers_follow_flags() {
		let record = Capabilities { smt: true, high_volume: true, ..Default::default() };

		assert!(record.has(CapabilitySlug::Smt));
		assert!(!record.has(CapabilitySlug::BoxBuild));
		assert!(record.has_volume(VolumeLevel::High));
		assert!(!record.has_volume(VolumeLevel::Low));
		assert_eq!(capability_column(CapabilitySlug::MixedTechnology), "pcb_assembly_mixed");
		assert_eq!(volume_column(VolumeLevel::Medium), "medium_volume_production");
	}
}
