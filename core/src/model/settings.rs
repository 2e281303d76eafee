use serde::{Deserialize, Serialize};

use crate::model::month::Policy;

pub const DEFAULT_OFFICE_GOAL: i32 = 40;
pub const DEFAULT_HOME_LIMIT: i32 = 60;

/// User settings shared across months.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub office_goal_percentage: i32,
    pub home_limit_percentage: i32,
    /// Seed fresh months with the fixed national holidays.
    pub seed_default_holidays: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            office_goal_percentage: DEFAULT_OFFICE_GOAL,
            home_limit_percentage: DEFAULT_HOME_LIMIT,
            seed_default_holidays: true,
        }
    }
}

impl Settings {
    pub fn policy(&self) -> Policy {
        Policy::new(self.office_goal_percentage)
    }
}
