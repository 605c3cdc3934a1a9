use serde::{Deserialize, Serialize};

const CRITICAL_BELOW_G_DL: f64 = 7.0;
const LOW_BELOW_G_DL: f64 = 9.0;
const GAUGE_FULL_SCALE_G_DL: f64 = 15.0;

/// Hemoglobin band shown on the patient dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HemoglobinStatus {
    Critical,
    Low,
    Stable,
}

impl HemoglobinStatus {
    /// Non-finite readings classify as critical.
    pub fn classify(level_g_dl: f64) -> Self {
        if !level_g_dl.is_finite() || level_g_dl < CRITICAL_BELOW_G_DL {
            HemoglobinStatus::Critical
        } else if level_g_dl < LOW_BELOW_G_DL {
            HemoglobinStatus::Low
        } else {
            HemoglobinStatus::Stable
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            HemoglobinStatus::Critical => "Critical",
            HemoglobinStatus::Low => "Low",
            HemoglobinStatus::Stable => "Stable",
        }
    }
}

/// Percentage of the 15 g/dL gauge filled by a reading.
pub fn gauge_percent(level_g_dl: f64) -> f64 {
    if !level_g_dl.is_finite() {
        return 0.0;
    }
    (level_g_dl / GAUGE_FULL_SCALE_G_DL * 100.0).clamp(0.0, 100.0)
}
