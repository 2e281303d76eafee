use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::input::expand_key;

/// How a single calendar day was spent. A day holds at most one state;
/// an unmarked day simply has no entry in the month map.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DayState {
    Home,
    Office,
    Vacation,
    Holiday,
}

const STATE_NAMES: [&str; 4] = ["home", "office", "vacation", "holiday"];

impl DayState {
    pub fn as_str(self) -> &'static str {
        match self {
            DayState::Home => "home",
            DayState::Office => "office",
            DayState::Vacation => "vacation",
            DayState::Holiday => "holiday",
        }
    }

    /// Single-letter tag for compact calendar cells.
    pub fn short(self) -> char {
        match self {
            DayState::Home => 'H',
            DayState::Office => 'O',
            DayState::Vacation => 'V',
            DayState::Holiday => 'F',
        }
    }

    /// Home and office markings only count on workdays.
    pub fn is_attendance(self) -> bool {
        matches!(self, DayState::Home | DayState::Office)
    }
}

impl fmt::Display for DayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayState {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let lowered = s.trim().to_lowercase();
        let key = match lowered.as_str() {
            "wfh" | "remote" => "home",
            "pto" => "vacation",
            other => other,
        };

        match expand_key(key, &STATE_NAMES)?.as_str() {
            "home" => Ok(DayState::Home),
            "office" => Ok(DayState::Office),
            "vacation" => Ok(DayState::Vacation),
            "holiday" => Ok(DayState::Holiday),
            other => Err(anyhow!("Unknown day state: '{}'", other)),
        }
    }
}
