use anyhow::Result;
use chrono::NaiveDate;
use tracing::warn;
use workstyle_core::calendar::{days_in_month, next_month, prev_month};
use workstyle_core::{
    build_summary, AttendanceService, DayState, DayStateMap, FileMonthRepository,
    FileSettingsRepository, MonthSummary, Settings,
};

pub struct App {
    pub service: AttendanceService<FileMonthRepository, FileSettingsRepository>,
    pub year: i32,
    pub month: u32,
    pub today: NaiveDate,
    pub days: DayStateMap,
    pub settings: Settings,
    pub summary: MonthSummary,
    /// Selected day of month, 1-based.
    pub selected: u32,
    pub status: Option<String>,
}

impl App {
    pub fn new(
        service: AttendanceService<FileMonthRepository, FileSettingsRepository>,
        year: i32,
        month: u32,
        today: NaiveDate,
    ) -> Result<App> {
        let settings = service.settings()?;
        let days = service.load_month(year, month)?;
        let summary = build_summary(year, month, today, &days, &settings)?;
        let selected = summary.context.today_day_of_month.unwrap_or(1);
        Ok(App {
            service,
            year,
            month,
            today,
            days,
            settings,
            summary,
            selected,
            status: None,
        })
    }

    fn days_in_month(&self) -> u32 {
        days_in_month(self.year, self.month)
    }

    /// Moves the selection by `delta` days, staying inside the month.
    pub fn move_by(&mut self, delta: i32) {
        let target = self.selected as i32 + delta;
        if target >= 1 && target <= self.days_in_month() as i32 {
            self.selected = target as u32;
        }
    }

    pub fn next_month(&mut self) {
        match next_month(self.year, self.month) {
            Some((year, month)) => self.switch_month(year, month),
            None => self.status = Some("No later month to show".to_string()),
        }
    }

    pub fn previous_month(&mut self) {
        match prev_month(self.year, self.month) {
            Some((year, month)) => self.switch_month(year, month),
            None => self.status = Some("No earlier month to show".to_string()),
        }
    }

    fn switch_month(&mut self, year: i32, month: u32) {
        match self.service.load_month(year, month) {
            Ok(days) => {
                self.year = year;
                self.month = month;
                self.days = days;
                self.selected = self.selected.min(self.days_in_month());
                self.status = None;
                self.refresh();
            }
            Err(err) => self.report(err),
        }
    }

    /// Sets (or clears) the state of the selected day.
    pub fn mark(&mut self, state: Option<DayState>) {
        // Pressing the key of the current state toggles it off
        let state = if state.is_some() && self.days.get(self.selected) == state {
            None
        } else {
            state
        };
        match self.service.set_day(self.year, self.month, self.selected, state) {
            Ok(days) => {
                self.days = days;
                self.status = None;
                self.refresh();
            }
            Err(err) => self.report(err),
        }
    }

    pub fn adjust_goal(&mut self, delta: i32) {
        let pct = (self.settings.office_goal_percentage + delta).clamp(0, 100);
        match self.service.set_office_goal(pct) {
            Ok(settings) => {
                self.settings = settings;
                self.refresh();
            }
            Err(err) => self.report(err),
        }
    }

    /// Recomputes the summary from the in-memory month.
    fn refresh(&mut self) {
        match build_summary(self.year, self.month, self.today, &self.days, &self.settings) {
            Ok(summary) => self.summary = summary,
            Err(err) => self.report(err),
        }
    }

    fn report(&mut self, err: anyhow::Error) {
        warn!(%err, "tui action failed");
        self.status = Some(err.to_string());
    }
}
