use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Manufacturing capability a company can advertise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapabilitySlug {
	Smt,
	ThroughHole,
	CableHarness,
	BoxBuild,
	Prototyping,
	FinePitch,
	MixedTechnology,
}
impl CapabilitySlug {
	pub const ALL: [Self; 7] = [
		Self::Smt,
		Self::ThroughHole,
		Self::CableHarness,
		Self::BoxBuild,
		Self::Prototyping,
		Self::FinePitch,
		Self::MixedTechnology,
	];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Smt => "smt",
			Self::ThroughHole => "through_hole",
			Self::CableHarness => "cable_harness",
			Self::BoxBuild => "box_build",
			Self::Prototyping => "prototyping",
			Self::FinePitch => "fine_pitch",
			Self::MixedTechnology => "mixed_technology",
		}
	}

	/// Case-insensitive lookup; surrounding whitespace is ignored.
	pub fn parse(raw: &str) -> Option<Self> {
		let slug = raw.trim().to_ascii_lowercase();

		Self::ALL.into_iter().find(|candidate| candidate.as_str() == slug)
	}
}
impl Display for CapabilitySlug {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeLevel {
	Low,
	Medium,
	High,
}
impl VolumeLevel {
	pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Low => "low",
			Self::Medium => "medium",
			Self::High => "high",
		}
	}

	pub fn parse(raw: &str) -> Option<Self> {
		let level = raw.trim().to_ascii_lowercase();

		Self::ALL.into_iter().find(|candidate| candidate.as_str() == level)
	}
}
impl Display for VolumeLevel {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}
