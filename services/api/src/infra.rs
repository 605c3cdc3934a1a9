use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use thalai::config::AppConfig;
use thalai::eligibility::{AvailabilitySlot, BloodType, EligibilityEvaluator, Gender};
use thalai::error::AppError;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Evaluator built from the environment-configured policy.
pub(crate) fn configured_evaluator() -> Result<EligibilityEvaluator, AppError> {
    let config = AppConfig::load()?;
    Ok(EligibilityEvaluator::new(config.eligibility))
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

/// Accepts RFC 3339, or a zone-less `YYYY-MM-DDTHH:MM` read as UTC.
pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    let trimmed = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M")
        .map(|naive| naive.and_utc())
        .map_err(|err| {
            format!("failed to parse '{raw}' as RFC 3339 or YYYY-MM-DDTHH:MM ({err})")
        })
}

pub(crate) fn parse_blood_type(raw: &str) -> Result<BloodType, String> {
    raw.parse::<BloodType>().map_err(|err| err.to_string())
}

pub(crate) fn parse_gender(raw: &str) -> Result<Gender, String> {
    raw.parse::<Gender>()
}

pub(crate) fn parse_availability(raw: &str) -> Result<AvailabilitySlot, String> {
    raw.parse::<AvailabilitySlot>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamps_accept_offsets_and_local_form() {
        let expected = Utc
            .with_ymd_and_hms(2025, 9, 24, 10, 0, 0)
            .single()
            .expect("valid timestamp");

        assert_eq!(parse_timestamp("2025-09-24T10:00:00Z"), Ok(expected));
        assert_eq!(parse_timestamp("2025-09-24T15:30:00+05:30"), Ok(expected));
        assert_eq!(parse_timestamp("2025-09-24T10:00"), Ok(expected));
        assert!(parse_timestamp("tomorrow").is_err());
    }

    #[test]
    fn blood_type_errors_name_the_code() {
        let err = parse_blood_type("Q+").expect_err("unknown code");
        assert!(err.contains("Q+"));
    }
}
