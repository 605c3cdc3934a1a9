use chrono::{DateTime, Datelike, NaiveDate, Utc};

use super::config::EligibilityPolicy;
use super::domain::{BloodRequest, BloodType, DonorProfile, UrgencyTier};
use super::policy::{DonorReason, RequestReason, RequestWarning};

pub(crate) fn donor_reasons(
    profile: &DonorProfile,
    policy: &EligibilityPolicy,
    as_of: DateTime<Utc>,
) -> Vec<DonorReason> {
    let today = as_of.date_naive();
    let mut reasons = Vec::new();

    let within_age = age_in_years(profile.date_of_birth, today)
        .map(|age| age >= policy.min_age_years && age <= policy.max_age_years)
        .unwrap_or(false);
    if !within_age {
        reasons.push(DonorReason::AgeOutOfRange);
    }

    // Non-finite weights never pass.
    if !(profile.weight_kg.is_finite() && profile.weight_kg >= policy.min_weight_kg) {
        reasons.push(DonorReason::Underweight);
    }

    if let Some(last_donation) = profile.last_donation_date {
        let gap = today.signed_duration_since(last_donation).num_days();
        if gap < policy.min_donation_gap_days {
            reasons.push(DonorReason::DonationTooRecent);
        }
    }

    if profile.blood_type.parse::<BloodType>().is_err() {
        reasons.push(DonorReason::InvalidBloodType);
    }

    if profile.availability.is_empty() {
        reasons.push(DonorReason::NoAvailability);
    }

    if !profile.is_registrable() {
        reasons.push(DonorReason::ConsentMissing);
    }

    if profile.full_name.trim().is_empty() {
        reasons.push(DonorReason::MissingName);
    }

    reasons
}

pub(crate) struct RequestFindings {
    pub reasons: Vec<RequestReason>,
    pub warnings: Vec<RequestWarning>,
    pub tier: Option<UrgencyTier>,
}

pub(crate) fn request_findings(request: &BloodRequest, as_of: DateTime<Utc>) -> RequestFindings {
    let mut reasons = Vec::new();
    let mut warnings = Vec::new();

    if !(1..=10).contains(&request.units_needed) {
        reasons.push(RequestReason::InvalidUnits);
    }

    if request.blood_type.parse::<BloodType>().is_err() {
        reasons.push(RequestReason::InvalidBloodType);
    }

    let tier = request.urgency.parse::<UrgencyTier>().ok();
    if tier.is_none() {
        reasons.push(RequestReason::InvalidUrgency);
    }

    if request.required_by <= as_of {
        reasons.push(RequestReason::DeadlineInPast);
    } else if let Some(tier) = tier {
        if request.required_by - as_of > tier.window() {
            warnings.push(RequestWarning::UrgencyWindowExceeded);
        }
    }

    let required_text = [
        (&request.patient_name, RequestReason::MissingPatientName),
        (&request.contact_number, RequestReason::MissingContactNumber),
        (&request.hospital, RequestReason::MissingHospital),
        (&request.address, RequestReason::MissingAddress),
    ];
    for (value, reason) in required_text {
        if value.trim().is_empty() {
            reasons.push(reason);
        }
    }

    RequestFindings {
        reasons,
        warnings,
        tier,
    }
}

/// Whole years elapsed; a birthday counts from the day itself. `None` for
/// birth dates after `today`.
pub(crate) fn age_in_years(date_of_birth: NaiveDate, today: NaiveDate) -> Option<u32> {
    if date_of_birth > today {
        return None;
    }

    let mut years = today.year() - date_of_birth.year();
    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        years -= 1;
    }

    u32::try_from(years).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn age_counts_from_the_birthday_itself() {
        assert_eq!(age_in_years(date(2000, 6, 15), date(2018, 6, 15)), Some(18));
        assert_eq!(age_in_years(date(2000, 6, 15), date(2018, 6, 14)), Some(17));
    }

    #[test]
    fn leap_day_birthdays_roll_over_on_march_first() {
        let born = date(2004, 2, 29);
        assert_eq!(age_in_years(born, date(2022, 2, 28)), Some(17));
        assert_eq!(age_in_years(born, date(2022, 3, 1)), Some(18));
    }

    #[test]
    fn future_birth_dates_have_no_age() {
        assert_eq!(age_in_years(date(2030, 1, 1), date(2026, 1, 1)), None);
    }
}
