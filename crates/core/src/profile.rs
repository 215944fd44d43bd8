//! User profile classification and account status enums.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The six weight-loss profile types assigned during checkout or the
/// intake quiz. Stored lower-case in the database and in webhook payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileType {
    Hormonal,
    Inflammatory,
    Cortisol,
    Metabolic,
    Retention,
    Insulinic,
}

impl ProfileType {
    pub const ALL: [ProfileType; 6] = [
        Self::Hormonal,
        Self::Inflammatory,
        Self::Cortisol,
        Self::Metabolic,
        Self::Retention,
        Self::Insulinic,
    ];

    /// Parse a profile type from its database/webhook string form.
    /// Input is lower-cased before matching.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s.to_ascii_lowercase().as_str() {
            "hormonal" => Ok(Self::Hormonal),
            "inflammatory" => Ok(Self::Inflammatory),
            "cortisol" => Ok(Self::Cortisol),
            "metabolic" => Ok(Self::Metabolic),
            "retention" => Ok(Self::Retention),
            "insulinic" => Ok(Self::Insulinic),
            other => Err(CoreError::Validation(format!(
                "Invalid profile type '{other}'. Must be one of: hormonal, \
                 inflammatory, cortisol, metabolic, retention, insulinic"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hormonal => "hormonal",
            Self::Inflammatory => "inflammatory",
            Self::Cortisol => "cortisol",
            Self::Metabolic => "metabolic",
            Self::Retention => "retention",
            Self::Insulinic => "insulinic",
        }
    }
}

/// Account lifecycle status for a profile row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    Active,
    Inactive,
    Cancelled,
}

impl UserStatus {
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(CoreError::Validation(format!(
                "Invalid user status '{other}'"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Mood recorded in a daily check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Happy,
    Neutral,
    Tired,
    Irritated,
}

impl Mood {
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "happy" => Ok(Self::Happy),
            "neutral" => Ok(Self::Neutral),
            "tired" => Ok(Self::Tired),
            "irritated" => Ok(Self::Irritated),
            other => Err(CoreError::Validation(format!("Invalid mood '{other}'"))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Neutral => "neutral",
            Self::Tired => "tired",
            Self::Irritated => "irritated",
        }
    }
}

/// Which part of the day a mood check-in belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
}

impl TimeOfDay {
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "morning" => Ok(Self::Morning),
            "afternoon" => Ok(Self::Afternoon),
            "evening" => Ok(Self::Evening),
            other => Err(CoreError::Validation(format!(
                "Invalid time of day '{other}'"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
        }
    }
}
