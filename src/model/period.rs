use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Named reporting period selected by the caller.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodToken {
    Today,
    Week,
    #[default]
    Month,
    Year,
    All,
    Custom,
}

impl PeriodToken {
    /// Parses a caller-supplied token, falling back to the current month for
    /// anything unrecognized.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "today" => Self::Today,
            "week" => Self::Week,
            "month" => Self::Month,
            "year" => Self::Year,
            "all" => Self::All,
            "custom" => Self::Custom,
            _ => Self::Month,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
            Self::All => "all",
            Self::Custom => "custom",
        }
    }
}

/// Raw period selection as it arrives from the caller. The `from`/`to`
/// strings are only consulted for [`PeriodToken::Custom`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PeriodRequest {
    pub token: PeriodToken,
    pub from: Option<String>,
    pub to: Option<String>,
}

impl PeriodRequest {
    pub fn new(token: PeriodToken) -> Self {
        Self {
            token,
            from: None,
            to: None,
        }
    }

    pub fn custom(from: Option<String>, to: Option<String>) -> Self {
        Self {
            token: PeriodToken::Custom,
            from,
            to,
        }
    }
}

/// Resolved reporting window with inclusive bounds.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Window {
    pub from: NaiveDateTime,
    pub to: NaiveDateTime,
}

impl Window {
    pub fn length(&self) -> chrono::Duration {
        self.to - self.from
    }
}
