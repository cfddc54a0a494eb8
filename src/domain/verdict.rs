use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskTier {
    Low,
    #[serde(rename = "Low-Medium")]
    LowMedium,
    #[serde(rename = "Medium-High")]
    MediumHigh,
    High,
}

impl RiskTier {
    pub fn from_score(score: u32) -> Self {
        match score {
            60.. => RiskTier::High,
            30..=59 => RiskTier::MediumHigh,
            20..=29 => RiskTier::LowMedium,
            _ => RiskTier::Low,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RiskTier::Low => "Low",
            RiskTier::LowMedium => "Low-Medium",
            RiskTier::MediumHigh => "Medium-High",
            RiskTier::High => "High",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Explanation {
    pub title: String,
    pub text: String,
}

impl Explanation {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub overall_risk: RiskTier,
    pub confidence_score: u32,
    pub analysis: Vec<Explanation>,
    pub recommendation: String,
}

/// Verdict for an uploaded image, carrying the OCR output back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageVerdict {
    pub extracted_text: String,
    #[serde(flatten)]
    pub verdict: Verdict,
}
