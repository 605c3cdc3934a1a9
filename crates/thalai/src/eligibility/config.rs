use serde::{Deserialize, Serialize};

pub const DEFAULT_MIN_DONOR_AGE: u32 = 18;
pub const DEFAULT_MAX_DONOR_AGE: u32 = 65;
pub const DEFAULT_MIN_WEIGHT_KG: f64 = 45.0;
pub const DEFAULT_DONATION_GAP_DAYS: i64 = 56;

/// Thresholds applied to donor profiles. All bounds are inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityPolicy {
    pub min_age_years: u32,
    pub max_age_years: u32,
    pub min_weight_kg: f64,
    pub min_donation_gap_days: i64,
}

impl Default for EligibilityPolicy {
    fn default() -> Self {
        Self {
            min_age_years: DEFAULT_MIN_DONOR_AGE,
            max_age_years: DEFAULT_MAX_DONOR_AGE,
            min_weight_kg: DEFAULT_MIN_WEIGHT_KG,
            min_donation_gap_days: DEFAULT_DONATION_GAP_DAYS,
        }
    }
}
