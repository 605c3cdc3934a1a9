use std::collections::BTreeSet;

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

use crate::eligibility::domain::{AvailabilitySlot, BloodRequest, DonorProfile, Gender};
use crate::eligibility::{EligibilityEvaluator, EligibilityPolicy};

pub(super) fn as_of() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn evaluator() -> EligibilityEvaluator {
    EligibilityEvaluator::new(EligibilityPolicy::default())
}

pub(super) fn eligible_donor() -> DonorProfile {
    DonorProfile {
        full_name: "Ananya Iyer".to_string(),
        date_of_birth: date(1996, 3, 10),
        gender: Gender::Female,
        blood_type: "B+".to_string(),
        weight_kg: 50.0,
        last_donation_date: Some(as_of().date_naive() - Duration::days(60)),
        availability: BTreeSet::from([AvailabilitySlot::Anytime]),
        consent_terms: true,
        consent_data_sharing: true,
    }
}

pub(super) fn valid_request() -> BloodRequest {
    BloodRequest {
        blood_type: "O-".to_string(),
        units_needed: 2,
        urgency: "critical".to_string(),
        required_by: as_of() + Duration::hours(1),
        patient_name: "X".to_string(),
        contact_number: "+910000000000".to_string(),
        hospital: "City Hospital".to_string(),
        address: "12 MG Road, Pune".to_string(),
        additional_info: None,
    }
}
