use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use tracing::debug;

use crate::alert::HomeLimitAlert;
use crate::calendar::{default_holidays, CalendarModel, MonthCalendar};
use crate::engine::compute_metrics;
use crate::error::{validate_day, validate_percentage};
use crate::input::Assignment;
use crate::model::day_state::DayState;
use crate::model::metrics::Metrics;
use crate::model::month::{DayStateMap, MonthContext, MonthRecord};
use crate::model::settings::Settings;
use crate::repository::{MonthRepository, SettingsRepository};
use crate::service::dto::{DayView, MonthSummary};

pub struct AttendanceService<M: MonthRepository, S: SettingsRepository> {
    months: M,
    settings: S,
}

impl<M: MonthRepository, S: SettingsRepository> AttendanceService<M, S> {
    pub fn new(months: M, settings: S) -> Self {
        Self { months, settings }
    }

    pub fn settings(&self) -> Result<Settings> {
        self.settings.load()
    }

    pub fn set_office_goal(&self, pct: i32) -> Result<Settings> {
        validate_percentage(pct)?;
        let mut settings = self.settings.load()?;
        settings.office_goal_percentage = pct;
        self.settings.save(&settings)?;
        Ok(settings)
    }

    pub fn set_home_limit(&self, pct: i32) -> Result<Settings> {
        validate_percentage(pct)?;
        let mut settings = self.settings.load()?;
        settings.home_limit_percentage = pct;
        self.settings.save(&settings)?;
        Ok(settings)
    }

    /// Stored states for the month, or a fresh map seeded with the default holidays.
    pub fn load_month(&self, year: i32, month: u32) -> Result<DayStateMap> {
        if let Some(record) = self.months.get(year, month)? {
            return Ok(record.days);
        }
        self.seed_month(month)
    }

    fn seed_month(&self, month: u32) -> Result<DayStateMap> {
        let settings = self.settings.load()?;
        if settings.seed_default_holidays {
            debug!(month, "seeding default holidays");
            Ok(DayStateMap::with_holidays(&default_holidays(month)))
        } else {
            Ok(DayStateMap::new())
        }
    }

    /// Discards stored states and writes back the seeded default.
    pub fn reset_month(&self, year: i32, month: u32) -> Result<DayStateMap> {
        let days = self.seed_month(month)?;
        self.months.save(&MonthRecord::new(year, month, days.clone()))?;
        Ok(days)
    }

    pub fn set_day(&self, year: i32, month: u32, day: u32, state: Option<DayState>) -> Result<DayStateMap> {
        self.apply_assignments(year, month, &[Assignment { days: day..=day, state }])
    }

    /// Validates every assignment against the month before writing any of them.
    pub fn apply_assignments(&self, year: i32, month: u32, assignments: &[Assignment]) -> Result<DayStateMap> {
        let calendar = MonthCalendar::new(year, month);
        let mut days = self.load_month(year, month)?;

        for assignment in assignments {
            for day in assignment.days.clone() {
                validate_day(day, calendar.days_in_month())?;
                if let Some(state) = assignment.state.filter(|s| s.is_attendance()) {
                    if calendar.is_weekend(day) || days.get(day) == Some(DayState::Holiday) {
                        return Err(anyhow!("Day {} is not a workday; cannot mark it as {}", day, state));
                    }
                }
            }
        }

        for assignment in assignments {
            for day in assignment.days.clone() {
                days.apply(day, assignment.state);
            }
        }

        self.months.save(&MonthRecord::new(year, month, days.clone()))?;
        Ok(days)
    }

    pub fn set_holidays(&self, year: i32, month: u32, holidays: &[u32]) -> Result<DayStateMap> {
        let calendar = MonthCalendar::new(year, month);
        for &day in holidays {
            validate_day(day, calendar.days_in_month())?;
        }
        let mut days = self.load_month(year, month)?;
        days.replace_holidays(holidays);
        self.months.save(&MonthRecord::new(year, month, days.clone()))?;
        Ok(days)
    }

    pub fn stored_months(&self) -> Result<Vec<MonthRecord>> {
        self.months.list()
    }

    pub fn metrics(&self, year: i32, month: u32, today: NaiveDate) -> Result<(MonthContext, Metrics)> {
        let settings = self.settings.load()?;
        let days = self.load_month(year, month)?;
        let context = MonthContext::for_today(year, month, today);
        let metrics = compute_metrics(&context, &MonthCalendar::new(year, month), &days, &settings.policy())?;
        Ok((context, metrics))
    }

    pub fn summary(&self, year: i32, month: u32, today: NaiveDate) -> Result<MonthSummary> {
        let settings = self.settings.load()?;
        let days = self.load_month(year, month)?;
        build_summary(year, month, today, &days, &settings)
    }
}

/// Assembles the display summary of a month from plain data.
pub fn build_summary(
    year: i32,
    month: u32,
    today: NaiveDate,
    days: &DayStateMap,
    settings: &Settings,
) -> Result<MonthSummary> {
    let calendar = MonthCalendar::new(year, month);
    let context = MonthContext::for_today(year, month, today);
    let policy = settings.policy();
    let metrics = compute_metrics(&context, &calendar, days, &policy)?;
    let alert = HomeLimitAlert::evaluate(&metrics, settings.home_limit_percentage);

    let views = (1..=calendar.days_in_month())
        .map(|day| {
            let state = days.get(day);
            DayView {
                day,
                weekday: calendar.weekday(day).map(|w| w.to_string()).unwrap_or_default(),
                is_weekend: calendar.is_weekend(day),
                is_holiday: calendar.is_holiday(day) || state == Some(DayState::Holiday),
                is_today: context.today_day_of_month == Some(day),
                state,
            }
        })
        .collect();

    Ok(MonthSummary {
        label: calendar.label(),
        context,
        first_weekday: calendar.first_weekday(),
        days: views,
        policy,
        metrics,
        alert,
    })
}
