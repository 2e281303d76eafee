use serde::{Deserialize, Serialize};

use crate::alert::HomeLimitAlert;
use crate::model::day_state::DayState;
use crate::model::metrics::Metrics;
use crate::model::month::{MonthContext, Policy};

/// One calendar cell, flattened for display.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DayView {
    pub day: u32,
    pub weekday: String, // Mon, Tue...
    pub is_weekend: bool,
    pub is_holiday: bool,
    pub is_today: bool,
    pub state: Option<DayState>,
}

impl DayView {
    /// Home/office can only be set on days that are neither weekend nor holiday.
    pub fn accepts_attendance(&self) -> bool {
        !self.is_weekend && !self.is_holiday
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MonthSummary {
    pub label: String,
    pub context: MonthContext,
    /// Column of day 1 in a Sunday-first grid.
    pub first_weekday: u32,
    pub days: Vec<DayView>,
    pub policy: Policy,
    pub metrics: Metrics,
    pub alert: HomeLimitAlert,
}
