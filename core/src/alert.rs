use serde::{Deserialize, Serialize};

use crate::model::metrics::{round_one_decimal, Metrics};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    WithinLimit,
    Exceeded,
}

/// Whether the share of home days went over the allowed limit.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HomeLimitAlert {
    pub level: AlertLevel,
    pub pct_home: f64,
    pub limit: i32,
    pub office_days_needed: u32,
}

impl HomeLimitAlert {
    pub fn evaluate(metrics: &Metrics, limit: i32) -> Self {
        let limit = limit.clamp(0, 100);
        let level = if metrics.pct_home > limit as f64 {
            AlertLevel::Exceeded
        } else {
            AlertLevel::WithinLimit
        };
        Self {
            level,
            pct_home: metrics.pct_home,
            limit,
            office_days_needed: metrics.office_days_needed,
        }
    }

    pub fn is_exceeded(&self) -> bool {
        self.level == AlertLevel::Exceeded
    }

    pub fn title(&self) -> &'static str {
        match self.level {
            AlertLevel::Exceeded => "Remote work limit exceeded",
            AlertLevel::WithinLimit => "Remote work within limit",
        }
    }

    pub fn message(&self) -> String {
        let position = match self.level {
            AlertLevel::Exceeded => "over",
            AlertLevel::WithinLimit => "within",
        };
        format!(
            "{:.1}% of marked days at home, {} the {}% limit. {} more office day(s) needed this month.",
            round_one_decimal(self.pct_home),
            position,
            self.limit,
            self.office_days_needed
        )
    }
}
