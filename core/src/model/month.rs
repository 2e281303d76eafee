use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::model::day_state::DayState;

/// Which month is being viewed and where "today" falls in it.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthContext {
    pub year: i32,
    /// 0-based (January = 0).
    pub month: u32,
    pub today_day_of_month: Option<u32>,
    pub is_current_month: bool,
    /// The whole month still lies ahead of today.
    #[serde(default)]
    pub is_future_month: bool,
}

impl MonthContext {
    /// A context for a month that is not the real current month.
    pub fn new(year: i32, month: u32) -> Self {
        Self {
            year,
            month,
            today_day_of_month: None,
            is_current_month: false,
            is_future_month: false,
        }
    }

    pub fn for_today(year: i32, month: u32, today: NaiveDate) -> Self {
        let now = (today.year(), today.month0());
        let is_current_month = now == (year, month);
        Self {
            year,
            month,
            today_day_of_month: is_current_month.then(|| today.day()),
            is_current_month,
            is_future_month: (year, month) > now,
        }
    }

    /// Last day included in the "to date" counts.
    pub fn cutoff(&self, days_in_month: u32) -> u32 {
        match (self.is_current_month, self.today_day_of_month) {
            (true, Some(today)) => today.min(days_in_month),
            _ => days_in_month,
        }
    }

    /// Days after this one have not happened yet.
    pub fn elapsed_through(&self, days_in_month: u32) -> u32 {
        if self.is_current_month {
            self.cutoff(days_in_month)
        } else if self.is_future_month {
            0
        } else {
            days_in_month
        }
    }
}

/// Day-of-month (1-based) to state. Absent days are unmarked.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct DayStateMap {
    days: BTreeMap<u32, DayState>,
}

impl DayStateMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, day: u32) -> Option<DayState> {
        self.days.get(&day).copied()
    }

    pub fn set(&mut self, day: u32, state: DayState) {
        self.days.insert(day, state);
    }

    pub fn clear(&mut self, day: u32) -> Option<DayState> {
        self.days.remove(&day)
    }

    /// Sets the state, or clears the day when `state` is `None`.
    pub fn apply(&mut self, day: u32, state: Option<DayState>) {
        match state {
            Some(state) => self.set(day, state),
            None => {
                self.clear(day);
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, DayState)> + '_ {
        self.days.iter().map(|(day, state)| (*day, *state))
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn holidays(&self) -> Vec<u32> {
        self.iter()
            .filter(|(_, state)| *state == DayState::Holiday)
            .map(|(day, _)| day)
            .collect()
    }

    /// Drops every `Holiday` marking, then marks the given days as holidays.
    pub fn replace_holidays(&mut self, days: &[u32]) {
        self.days.retain(|_, state| *state != DayState::Holiday);
        for &day in days {
            self.set(day, DayState::Holiday);
        }
    }

    pub fn with_holidays(days: &[u32]) -> Self {
        let mut map = Self::new();
        map.replace_holidays(days);
        map
    }
}

impl FromIterator<(u32, DayState)> for DayStateMap {
    fn from_iter<I: IntoIterator<Item = (u32, DayState)>>(iter: I) -> Self {
        Self {
            days: iter.into_iter().collect(),
        }
    }
}

/// Office attendance policy.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Policy {
    pub office_goal_percentage: i32,
}

impl Policy {
    pub fn new(office_goal_percentage: i32) -> Self {
        Self {
            office_goal_percentage,
        }
    }

    pub fn clamped(&self) -> u32 {
        self.office_goal_percentage.clamp(0, 100) as u32
    }
}

impl Default for Policy {
    fn default() -> Self {
        Policy::new(40)
    }
}

/// Persisted day states of one month.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MonthRecord {
    pub year: i32,
    pub month: u32,
    pub days: DayStateMap,
}

impl MonthRecord {
    pub fn new(year: i32, month: u32, days: DayStateMap) -> Self {
        Self { year, month, days }
    }
}
