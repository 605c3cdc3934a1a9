//! Donor roster CSV ingestion for batch screening.

mod parser;

use std::io::Read;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::eligibility::{DonorProfile, EligibilityEvaluator, EligibilityVerdict};

#[derive(Debug, thiserror::Error)]
pub enum RosterImportError {
    #[error("failed to read donor roster: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid donor roster CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: invalid {field} value '{detail}'")]
    InvalidRow {
        line: usize,
        field: &'static str,
        detail: String,
    },
}

pub struct DonorRosterImporter;

impl DonorRosterImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<DonorProfile>, RosterImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<DonorProfile>, RosterImportError> {
        parser::parse_profiles(reader)
    }
}

/// Verdict for one roster entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RosterScreening {
    pub full_name: String,
    pub blood_type: String,
    pub verdict: EligibilityVerdict,
}

pub fn screen_roster(
    evaluator: &EligibilityEvaluator,
    profiles: &[DonorProfile],
    as_of: DateTime<Utc>,
) -> Vec<RosterScreening> {
    profiles
        .iter()
        .map(|profile| RosterScreening {
            full_name: profile.full_name.clone(),
            blood_type: profile.blood_type.clone(),
            verdict: evaluator.evaluate_donor(profile, as_of),
        })
        .collect()
}
