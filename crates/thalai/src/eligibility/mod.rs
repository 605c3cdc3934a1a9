//! Donor eligibility screening and blood request urgency classification.
//!
//! Every operation is a pure function of its inputs. The caller supplies the
//! evaluation instant so results are reproducible.

mod compatibility;
mod config;
pub mod domain;
mod policy;
pub mod router;
mod rules;

#[cfg(test)]
mod tests;

pub use compatibility::{
    blood_type_compatibility, compatibility_matrix, compatible_donors, compatible_recipients,
    CompatibilityRow,
};
pub use config::{
    EligibilityPolicy, DEFAULT_DONATION_GAP_DAYS, DEFAULT_MAX_DONOR_AGE, DEFAULT_MIN_DONOR_AGE,
    DEFAULT_MIN_WEIGHT_KG,
};
pub use domain::{
    AvailabilitySlot, BloodRequest, BloodType, DonorProfile, Gender, UnknownBloodType,
    UnknownUrgencyTier, UrgencyTier,
};
pub use policy::{
    DonorReason, EligibilityVerdict, RequestClassification, RequestReason, RequestWarning,
};
pub use router::eligibility_router;

use chrono::{DateTime, Utc};

/// Stateless evaluator applying an eligibility policy to donors and requests.
#[derive(Debug, Clone, Default)]
pub struct EligibilityEvaluator {
    policy: EligibilityPolicy,
}

impl EligibilityEvaluator {
    pub fn new(policy: EligibilityPolicy) -> Self {
        Self { policy }
    }

    /// Screen a donor, accumulating every failed check.
    pub fn evaluate_donor(
        &self,
        profile: &DonorProfile,
        as_of: DateTime<Utc>,
    ) -> EligibilityVerdict {
        EligibilityVerdict::from_reasons(rules::donor_reasons(profile, &self.policy, as_of))
    }

    /// Validate a blood request and report its tier deadline.
    pub fn classify_request(
        &self,
        request: &BloodRequest,
        as_of: DateTime<Utc>,
    ) -> RequestClassification {
        let findings = rules::request_findings(request, as_of);

        RequestClassification {
            valid: findings.reasons.is_empty(),
            reasons: findings.reasons,
            warnings: findings.warnings,
            // Deadlines past the representable range are left unset.
            urgency_deadline: findings
                .tier
                .and_then(|tier| as_of.checked_add_signed(tier.window())),
        }
    }

    /// Whether red cells of `donor` may be transfused into `recipient`.
    pub fn blood_type_compatibility(&self, donor: BloodType, recipient: BloodType) -> bool {
        blood_type_compatibility(donor, recipient)
    }
}
