//! Risk Level Bands
//!
//! Maps a 0-100 risk score onto the bands used for advisories and alerts.

use serde::{Deserialize, Serialize};

/// Lower bound of the medium band
pub const MEDIUM_RISK_MIN: u8 = 30;

/// Lower bound of the high band
pub const HIGH_RISK_MIN: u8 = 60;

/// Lower bound of the critical band
pub const CRITICAL_RISK_MIN: u8 = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn from_score(score: u8) -> Self {
        if score >= CRITICAL_RISK_MIN {
            RiskLevel::Critical
        } else if score >= HIGH_RISK_MIN {
            RiskLevel::High
        } else if score >= MEDIUM_RISK_MIN {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            RiskLevel::Low => "#10B981",      // Green
            RiskLevel::Medium => "#F59E0B",   // Amber
            RiskLevel::High => "#EF4444",     // Red
            RiskLevel::Critical => "#DC2626", // Dark red
        }
    }

    /// High and critical call for intervention
    pub fn requires_action(&self) -> bool {
        *self >= RiskLevel::High
    }

    /// Only critical raises an alert
    pub fn requires_alert(&self) -> bool {
        *self == RiskLevel::Critical
    }

    pub fn details(&self) -> RiskLevelDetails {
        let (description, urgency, actions): (&str, &str, &[&str]) = match self {
            RiskLevel::Low => (
                "Safe conditions - monitor only",
                "none",
                &["Continue regular monitoring", "Maintain current storage conditions"],
            ),
            RiskLevel::Medium => (
                "Moderate risk - advisory recommended",
                "low",
                &[
                    "Review environmental conditions",
                    "Check sensor readings",
                    "Consider preventive measures",
                ],
            ),
            RiskLevel::High => (
                "High risk - immediate action required",
                "high",
                &[
                    "Activate ventilation systems",
                    "Review and implement advisories",
                    "Increase monitoring frequency",
                ],
            ),
            RiskLevel::Critical => (
                "Critical risk - emergency response needed",
                "critical",
                &[
                    "Immediate fan activation",
                    "Emergency inspection",
                    "Alert management",
                    "Consider grain relocation",
                ],
            ),
        };

        RiskLevelDetails {
            level: *self,
            color: self.color().to_string(),
            description: description.to_string(),
            urgency: urgency.to_string(),
            actions: actions.iter().map(|a| a.to_string()).collect(),
            requires_action: self.requires_action(),
            requires_alert: self.requires_alert(),
            fan_recommendation: self.requires_action().then(|| "run".to_string()),
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Band details with recommended actions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskLevelDetails {
    pub level: RiskLevel,
    pub color: String,
    pub description: String,
    pub urgency: String,
    pub actions: Vec<String>,
    pub requires_action: bool,
    pub requires_alert: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fan_recommendation: Option<String>,
}
