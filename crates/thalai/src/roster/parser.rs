use std::collections::BTreeSet;
use std::io::Read;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

use super::RosterImportError;
use crate::eligibility::{AvailabilitySlot, DonorProfile, Gender};

pub(crate) fn parse_profiles<R: Read>(
    reader: R,
) -> Result<Vec<DonorProfile>, RosterImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut profiles = Vec::new();

    for record in csv_reader.records() {
        let record = record?;
        // Quoted fields may span lines, so the record start is taken from the reader.
        let line = record
            .position()
            .map_or(0, |position| position.line() as usize);
        let row: RosterRow = record.deserialize(Some(&headers))?;
        profiles.push(row.into_profile(line)?);
    }

    Ok(profiles)
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(rename = "Full Name")]
    full_name: String,
    #[serde(rename = "Date of Birth")]
    date_of_birth: String,
    #[serde(rename = "Gender")]
    gender: String,
    #[serde(rename = "Blood Type")]
    blood_type: String,
    #[serde(rename = "Weight (kg)")]
    weight_kg: String,
    #[serde(
        rename = "Last Donation",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    last_donation: Option<String>,
    #[serde(rename = "Availability", default)]
    availability: String,
    #[serde(rename = "Consent Terms")]
    consent_terms: String,
    #[serde(rename = "Consent Data Sharing")]
    consent_data_sharing: String,
}

impl RosterRow {
    fn into_profile(self, line: usize) -> Result<DonorProfile, RosterImportError> {
        let invalid = |field: &'static str, detail: String| RosterImportError::InvalidRow {
            line,
            field,
            detail,
        };

        let date_of_birth = parse_date(&self.date_of_birth)
            .ok_or_else(|| invalid("Date of Birth", self.date_of_birth.clone()))?;
        let last_donation_date = match self.last_donation.as_deref() {
            Some(raw) => {
                let date =
                    parse_date(raw).ok_or_else(|| invalid("Last Donation", raw.to_string()))?;
                Some(date)
            }
            None => None,
        };
        let gender = self
            .gender
            .parse::<Gender>()
            .map_err(|detail| invalid("Gender", detail))?;
        let weight_kg = self
            .weight_kg
            .parse::<f64>()
            .map_err(|_| invalid("Weight (kg)", self.weight_kg.clone()))?;

        let mut availability = BTreeSet::new();
        for slot in self.availability.split(';').filter(|slot| !slot.trim().is_empty()) {
            let slot = slot
                .parse::<AvailabilitySlot>()
                .map_err(|detail| invalid("Availability", detail))?;
            availability.insert(slot);
        }

        let consent_terms = parse_flag(&self.consent_terms)
            .ok_or_else(|| invalid("Consent Terms", self.consent_terms.clone()))?;
        let consent_data_sharing = parse_flag(&self.consent_data_sharing)
            .ok_or_else(|| invalid("Consent Data Sharing", self.consent_data_sharing.clone()))?;

        Ok(DonorProfile {
            full_name: self.full_name,
            date_of_birth,
            gender,
            blood_type: self.blood_type,
            weight_kg,
            last_donation_date,
            availability,
            consent_terms,
            consent_data_sharing,
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%d/%m/%Y"))
        .ok()
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Some(true),
        "false" | "no" | "n" | "0" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_iso_and_day_first_dates() {
        let expected = NaiveDate::from_ymd_opt(1994, 3, 7).expect("valid date");
        assert_eq!(parse_date("1994-03-07"), Some(expected));
        assert_eq!(parse_date("07/03/1994"), Some(expected));
        assert_eq!(parse_date("March 7th"), None);
    }

    #[test]
    fn blank_consent_reads_as_not_given() {
        assert_eq!(parse_flag(""), Some(false));
        assert_eq!(parse_flag("Yes"), Some(true));
        assert_eq!(parse_flag("maybe"), None);
    }
}
