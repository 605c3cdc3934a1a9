//! Donor eligibility, blood request triage, and care summaries for
//! thalassemia patient support.

pub mod care;
pub mod config;
pub mod eligibility;
pub mod error;
pub mod roster;
pub mod telemetry;
