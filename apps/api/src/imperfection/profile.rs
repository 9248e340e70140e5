//! Severity levels and their fixed probability profiles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImperfectionError {
    #[error("unknown severity level `{0}` (expected one of: minimal, light, medium, heavy)")]
    InvalidLevel(String),
}

/// Named imperfection intensity. These identifiers are the public configuration surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityLevel {
    Minimal,
    Light,
    Medium,
    Heavy,
}

/// Six independent per-character (or per-word, for stuck keys) probabilities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeverityProfile {
    pub typo_chance: f64,
    pub faded_chance: f64,
    pub heavy_chance: f64,
    pub uneven_chance: f64,
    pub spacing_chance: f64,
    pub stuck_key_chance: f64,
}

static MINIMAL: SeverityProfile = SeverityProfile {
    typo_chance: 0.001,
    faded_chance: 0.005,
    heavy_chance: 0.003,
    uneven_chance: 0.002,
    spacing_chance: 0.002,
    stuck_key_chance: 0.0005,
};

static LIGHT: SeverityProfile = SeverityProfile {
    typo_chance: 0.005,
    faded_chance: 0.02,
    heavy_chance: 0.01,
    uneven_chance: 0.015,
    spacing_chance: 0.01,
    stuck_key_chance: 0.002,
};

static MEDIUM: SeverityProfile = SeverityProfile {
    typo_chance: 0.01,
    faded_chance: 0.04,
    heavy_chance: 0.025,
    uneven_chance: 0.03,
    spacing_chance: 0.02,
    stuck_key_chance: 0.005,
};

static HEAVY: SeverityProfile = SeverityProfile {
    typo_chance: 0.02,
    faded_chance: 0.06,
    heavy_chance: 0.04,
    uneven_chance: 0.05,
    spacing_chance: 0.035,
    stuck_key_chance: 0.01,
};

impl SeverityLevel {
    pub const ALL: [SeverityLevel; 4] = [
        SeverityLevel::Minimal,
        SeverityLevel::Light,
        SeverityLevel::Medium,
        SeverityLevel::Heavy,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SeverityLevel::Minimal => "minimal",
            SeverityLevel::Light => "light",
            SeverityLevel::Medium => "medium",
            SeverityLevel::Heavy => "heavy",
        }
    }

    pub fn profile(self) -> &'static SeverityProfile {
        match self {
            SeverityLevel::Minimal => &MINIMAL,
            SeverityLevel::Light => &LIGHT,
            SeverityLevel::Medium => &MEDIUM,
            SeverityLevel::Heavy => &HEAVY,
        }
    }
}

impl fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SeverityLevel {
    type Err = ImperfectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        SeverityLevel::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ImperfectionError::InvalidLevel(s.to_string()))
    }
}
