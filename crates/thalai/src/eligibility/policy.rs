use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reason a donor profile fails screening, reported as a stable code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DonorReason {
    AgeOutOfRange,
    Underweight,
    DonationTooRecent,
    InvalidBloodType,
    NoAvailability,
    ConsentMissing,
    MissingName,
}

impl DonorReason {
    pub const fn code(self) -> &'static str {
        match self {
            DonorReason::AgeOutOfRange => "AGE_OUT_OF_RANGE",
            DonorReason::Underweight => "UNDERWEIGHT",
            DonorReason::DonationTooRecent => "DONATION_TOO_RECENT",
            DonorReason::InvalidBloodType => "INVALID_BLOOD_TYPE",
            DonorReason::NoAvailability => "NO_AVAILABILITY",
            DonorReason::ConsentMissing => "CONSENT_MISSING",
            DonorReason::MissingName => "MISSING_NAME",
        }
    }

    pub fn summary(self) -> &'static str {
        match self {
            DonorReason::AgeOutOfRange => "donor age is outside the permitted range",
            DonorReason::Underweight => "donor weight is below the minimum",
            DonorReason::DonationTooRecent => "previous donation is within the recovery gap",
            DonorReason::InvalidBloodType => "blood type is not a recognized ABO/Rh code",
            DonorReason::NoAvailability => "no availability slot selected",
            DonorReason::ConsentMissing => "terms and data sharing consent are both required",
            DonorReason::MissingName => "full name is required",
        }
    }
}

/// Reason a blood request is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestReason {
    InvalidUnits,
    InvalidBloodType,
    InvalidUrgency,
    DeadlineInPast,
    MissingPatientName,
    MissingContactNumber,
    MissingHospital,
    MissingAddress,
}

impl RequestReason {
    pub const fn code(self) -> &'static str {
        match self {
            RequestReason::InvalidUnits => "INVALID_UNITS",
            RequestReason::InvalidBloodType => "INVALID_BLOOD_TYPE",
            RequestReason::InvalidUrgency => "INVALID_URGENCY",
            RequestReason::DeadlineInPast => "DEADLINE_IN_PAST",
            RequestReason::MissingPatientName => "MISSING_PATIENT_NAME",
            RequestReason::MissingContactNumber => "MISSING_CONTACT_NUMBER",
            RequestReason::MissingHospital => "MISSING_HOSPITAL",
            RequestReason::MissingAddress => "MISSING_ADDRESS",
        }
    }
}

/// Advisory finding that never invalidates a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestWarning {
    /// The stated deadline lies beyond the tier window; a looser tier fits better.
    UrgencyWindowExceeded,
}

impl RequestWarning {
    pub const fn code(self) -> &'static str {
        match self {
            RequestWarning::UrgencyWindowExceeded => "URGENCY_WINDOW_EXCEEDED",
        }
    }
}

/// Outcome of donor screening.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityVerdict {
    pub eligible: bool,
    pub reasons: Vec<DonorReason>,
}

impl EligibilityVerdict {
    pub(crate) fn from_reasons(reasons: Vec<DonorReason>) -> Self {
        Self {
            eligible: reasons.is_empty(),
            reasons,
        }
    }

    pub fn summary(&self) -> String {
        if self.eligible {
            "donor eligible".to_string()
        } else {
            let codes: Vec<&str> = self.reasons.iter().map(|reason| reason.code()).collect();
            format!("donor ineligible: {}", codes.join(", "))
        }
    }
}

/// Outcome of blood request validation and urgency classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestClassification {
    pub valid: bool,
    pub reasons: Vec<RequestReason>,
    pub warnings: Vec<RequestWarning>,
    /// `as_of` plus the tier window; absent when the tier is unrecognized.
    pub urgency_deadline: Option<DateTime<Utc>>,
}

impl RequestClassification {
    pub fn summary(&self) -> String {
        let mut summary = if self.valid {
            "request valid".to_string()
        } else {
            let codes: Vec<&str> = self.reasons.iter().map(|reason| reason.code()).collect();
            format!("request invalid: {}", codes.join(", "))
        };

        if !self.warnings.is_empty() {
            let codes: Vec<&str> = self.warnings.iter().map(|warning| warning.code()).collect();
            summary.push_str(&format!(" (warnings: {})", codes.join(", ")));
        }

        summary
    }
}
