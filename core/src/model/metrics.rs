use serde::{Deserialize, Serialize};

/// Attendance figures for one month, recomputed from scratch on every change.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Metrics {
    pub home_days_in_month: u32,
    pub office_days_in_month: u32,
    pub vacation_days_in_month: u32,
    pub holidays_in_month: u32,
    pub total_workdays_in_month: u32,

    pub cutoff_day: u32,
    pub home_days_to_date: u32,
    pub office_days_to_date: u32,
    pub workdays_remaining: u32,
    pub unmarked_workdays: u32,

    // Shares of home+office over the whole month, unrounded.
    pub pct_home: f64,
    pub pct_office: f64,

    pub target_office_days: u32,
    pub office_days_needed: u32,
    pub goal_reachable: bool,
}

impl Metrics {
    pub fn marked_attendance_days(&self) -> u32 {
        self.home_days_in_month + self.office_days_in_month
    }

    pub fn pct_home_rounded(&self) -> f64 {
        round_one_decimal(self.pct_home)
    }

    pub fn pct_office_rounded(&self) -> f64 {
        round_one_decimal(self.pct_office)
    }
}

pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
