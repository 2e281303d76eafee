use crate::calendar::{month_label, MonthCalendar};
use crate::engine::compute_metrics;
use crate::model::metrics::Metrics;
use crate::model::month::MonthContext;
use crate::repository::{MonthRepository, SettingsRepository};
use crate::service::attendance_service::AttendanceService;
use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MonthHistory {
    pub year: i32,
    pub month: u32,
    pub label: String,
    pub metrics: Metrics,
}

pub struct HistoryUseCase<'a, M: MonthRepository, S: SettingsRepository> {
    service: &'a AttendanceService<M, S>,
}

impl<'a, M: MonthRepository, S: SettingsRepository> HistoryUseCase<'a, M, S> {
    pub fn new(service: &'a AttendanceService<M, S>) -> Self {
        Self { service }
    }

    /// Metrics of every stored month, newest first, under the current policy.
    pub fn monthly_history(&self, today: NaiveDate) -> Result<Vec<MonthHistory>> {
        let policy = self.service.settings()?.policy();
        let mut history = Vec::new();

        for record in self.service.stored_months()? {
            let context = MonthContext::for_today(record.year, record.month, today);
            let calendar = MonthCalendar::new(record.year, record.month);
            match compute_metrics(&context, &calendar, &record.days, &policy) {
                Ok(metrics) => history.push(MonthHistory {
                    year: record.year,
                    month: record.month,
                    label: month_label(record.year, record.month),
                    metrics,
                }),
                Err(err) => warn!(year = record.year, month = record.month, %err, "skipping month"),
            }
        }

        history.sort_by(|a, b| (b.year, b.month).cmp(&(a.year, a.month)));
        Ok(history)
    }
}
