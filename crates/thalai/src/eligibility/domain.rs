use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

/// ABO/Rh blood group codes accepted by donor and request intake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BloodType {
    #[serde(rename = "A+")]
    APositive,
    #[serde(rename = "A-")]
    ANegative,
    #[serde(rename = "B+")]
    BPositive,
    #[serde(rename = "B-")]
    BNegative,
    #[serde(rename = "AB+")]
    AbPositive,
    #[serde(rename = "AB-")]
    AbNegative,
    #[serde(rename = "O+")]
    OPositive,
    #[serde(rename = "O-")]
    ONegative,
}

impl BloodType {
    /// Every group in the order used by the compatibility table.
    pub const ALL: [BloodType; 8] = [
        BloodType::APositive,
        BloodType::ANegative,
        BloodType::BPositive,
        BloodType::BNegative,
        BloodType::AbPositive,
        BloodType::AbNegative,
        BloodType::OPositive,
        BloodType::ONegative,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            BloodType::APositive => "A+",
            BloodType::ANegative => "A-",
            BloodType::BPositive => "B+",
            BloodType::BNegative => "B-",
            BloodType::AbPositive => "AB+",
            BloodType::AbNegative => "AB-",
            BloodType::OPositive => "O+",
            BloodType::ONegative => "O-",
        }
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            BloodType::APositive => 0,
            BloodType::ANegative => 1,
            BloodType::BPositive => 2,
            BloodType::BNegative => 3,
            BloodType::AbPositive => 4,
            BloodType::AbNegative => 5,
            BloodType::OPositive => 6,
            BloodType::ONegative => 7,
        }
    }
}

impl fmt::Display for BloodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized blood type '{0}'")]
pub struct UnknownBloodType(pub String);

impl FromStr for BloodType {
    type Err = UnknownBloodType;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_uppercase();
        BloodType::ALL
            .into_iter()
            .find(|candidate| candidate.label() == normalized)
            .ok_or_else(|| UnknownBloodType(raw.to_string()))
    }
}

/// Time-criticality of a blood request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyTier {
    Critical,
    Urgent,
    Routine,
}

impl UrgencyTier {
    pub const fn label(self) -> &'static str {
        match self {
            UrgencyTier::Critical => "critical",
            UrgencyTier::Urgent => "urgent",
            UrgencyTier::Routine => "routine",
        }
    }

    /// Maximum gap between submission and the stated need, inclusive.
    pub fn window(self) -> Duration {
        match self {
            UrgencyTier::Critical => Duration::hours(2),
            UrgencyTier::Urgent => Duration::hours(6),
            UrgencyTier::Routine => Duration::hours(24),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized urgency tier '{0}'")]
pub struct UnknownUrgencyTier(pub String);

impl FromStr for UrgencyTier {
    type Err = UnknownUrgencyTier;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "critical" => Ok(UrgencyTier::Critical),
            "urgent" => Ok(UrgencyTier::Urgent),
            "routine" => Ok(UrgencyTier::Routine),
            _ => Err(UnknownUrgencyTier(raw.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            other => Err(format!("unrecognized gender '{other}'")),
        }
    }
}

/// Donation windows a donor can be contacted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AvailabilitySlot {
    Weekdays,
    Weekends,
    EmergencyOnly,
    Anytime,
}

impl AvailabilitySlot {
    pub const fn label(self) -> &'static str {
        match self {
            AvailabilitySlot::Weekdays => "weekdays",
            AvailabilitySlot::Weekends => "weekends",
            AvailabilitySlot::EmergencyOnly => "emergency-only",
            AvailabilitySlot::Anytime => "anytime",
        }
    }
}

impl FromStr for AvailabilitySlot {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        // Intake labels carry a hint such as "Weekdays (Mon-Fri)".
        let label = match raw.find('(') {
            Some(open) if raw.trim_end().ends_with(')') => &raw[..open],
            _ => raw,
        };
        let normalized = label.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "weekdays" => Ok(AvailabilitySlot::Weekdays),
            "weekends" => Ok(AvailabilitySlot::Weekends),
            "emergency-only" | "emergency" => Ok(AvailabilitySlot::EmergencyOnly),
            "anytime" => Ok(AvailabilitySlot::Anytime),
            _ => Err(format!("unrecognized availability slot '{}'", raw.trim())),
        }
    }
}

/// Donor registration data as captured by intake.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonorProfile {
    pub full_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    /// Raw code; unrecognized values are reported by the evaluator.
    pub blood_type: String,
    pub weight_kg: f64,
    #[serde(default)]
    pub last_donation_date: Option<NaiveDate>,
    /// Unrecognized slots are dropped; a donor left with none is reported
    /// as having no availability.
    #[serde(default, deserialize_with = "recognized_slots")]
    pub availability: BTreeSet<AvailabilitySlot>,
    pub consent_terms: bool,
    pub consent_data_sharing: bool,
}

impl DonorProfile {
    pub fn is_registrable(&self) -> bool {
        self.consent_terms && self.consent_data_sharing
    }
}

fn recognized_slots<'de, D>(deserializer: D) -> Result<BTreeSet<AvailabilitySlot>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<String>::deserialize(deserializer)?;
    let slots = raw
        .iter()
        .filter_map(|slot| match slot.parse::<AvailabilitySlot>() {
            Ok(slot) => Some(slot),
            Err(detail) => {
                debug!(%detail, "ignoring availability slot");
                None
            }
        })
        .collect();
    Ok(slots)
}

/// Request for blood units on behalf of a patient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BloodRequest {
    pub blood_type: String,
    pub units_needed: i64,
    pub urgency: String,
    pub required_by: DateTime<Utc>,
    pub patient_name: String,
    pub contact_number: String,
    pub hospital: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,
}
