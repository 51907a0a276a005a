use std::fmt::Display;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde_derive::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::helpers::FRCMError;
use crate::io::writers;
use crate::modules::frcm::functions::risk_score;

pub const FIRE_RISK_CSV_HEADER: &str = "timestamp,ttf";

/// Qualitative fire risk class of a time to flashover
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, EnumString, Display, Serialize, Deserialize)]
pub enum RiskCategory {
    Low,
    Moderate,
    High,
    Extreme,
}

/// Time to flashover at one observation time. Lower ttf means higher risk.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FireRisk {
    pub timestamp: DateTime<Utc>,
    /// time to flashover [min]
    pub ttf: f64,
}

impl FireRisk {
    pub fn csv_header() -> &'static str {
        FIRE_RISK_CSV_HEADER
    }

    pub fn csv_line(&self) -> String {
        format!("{},{}", self.timestamp.to_rfc3339(), self.ttf)
    }

    /// Normalised risk score in [0, 100], 100 being extreme
    pub fn risk_score(&self) -> f64 {
        risk_score(self.ttf).0
    }

    pub fn risk_category(&self) -> RiskCategory {
        risk_score(self.ttf).1
    }
}

/// One `FireRisk` per input observation, in input order.
///
/// The first entry is computed from the seeded initial state, before any
/// weather interval has been simulated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FireRiskPrediction {
    pub firerisks: Vec<FireRisk>,
}

impl FireRiskPrediction {
    pub fn new(firerisks: Vec<FireRisk>) -> Self {
        Self { firerisks }
    }

    pub fn len(&self) -> usize {
        self.firerisks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.firerisks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FireRisk> {
        self.firerisks.iter()
    }

    /// The "current" risk: the first entry past the warm-up value, or the
    /// warm-up value itself for single-observation runs.
    pub fn current(&self) -> Option<&FireRisk> {
        self.firerisks.get(1).or_else(|| self.firerisks.first())
    }

    /// Lowest time to flashover (highest risk) over the prediction
    pub fn min_ttf(&self) -> Option<&FireRisk> {
        self.firerisks
            .iter()
            .min_by(|a, b| a.ttf.total_cmp(&b.ttf))
    }

    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<(), FRCMError> {
        writers::write_prediction_csv(self, path)
    }
}

impl Display for FireRiskPrediction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", FIRE_RISK_CSV_HEADER)?;
        for risk in &self.firerisks {
            write!(f, "\n{}", risk.csv_line())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn prediction(ttfs: &[f64]) -> FireRiskPrediction {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        FireRiskPrediction::new(
            ttfs.iter()
                .enumerate()
                .map(|(i, ttf)| FireRisk {
                    timestamp: start + Duration::hours(i as i64),
                    ttf: *ttf,
                })
                .collect(),
        )
    }

    #[test]
    fn current_skips_warm_up_entry() {
        assert_eq!(prediction(&[8.0, 6.5, 6.0]).current().unwrap().ttf, 6.5);
        assert_eq!(prediction(&[8.0]).current().unwrap().ttf, 8.0);
        assert!(prediction(&[]).current().is_none());
    }

    #[test]
    fn min_ttf_is_highest_risk() {
        assert_eq!(prediction(&[8.0, 4.2, 6.0]).min_ttf().unwrap().ttf, 4.2);
    }

    #[test]
    fn display_is_csv() {
        let text = prediction(&[8.5, 7.25]).to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "timestamp,ttf");
        assert_eq!(lines[1], "2024-03-01T00:00:00+00:00,8.5");
        assert_eq!(lines[2], "2024-03-01T01:00:00+00:00,7.25");
    }

    #[test]
    fn risk_follows_ttf() {
        let risks = prediction(&[3.0, 12.0, 20.0, 45.0]);
        let categories: Vec<RiskCategory> = risks.iter().map(FireRisk::risk_category).collect();
        assert_eq!(
            categories,
            vec![
                RiskCategory::Extreme,
                RiskCategory::High,
                RiskCategory::Moderate,
                RiskCategory::Low
            ]
        );
        assert_eq!(risks.firerisks[0].risk_score(), 88.0);
        assert_eq!(risks.firerisks[2].risk_score(), 50.0);
        assert_eq!(RiskCategory::Moderate.to_string(), "Moderate");
    }
}
