use thiserror::Error;

/// Errors raised while deriving or validating month metrics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetricsError {
    #[error("month length {0} is outside 28..=31")]
    InvalidMonthLength(u32),

    #[error("day {day} is outside 1..={days_in_month}")]
    InvalidRange { day: u32, days_in_month: u32 },

    #[error("office goal {0}% is outside 0..=100")]
    InvalidPercentage(i32),
}

pub type MetricsResult<T> = Result<T, MetricsError>;

pub fn validate_month_length(days_in_month: u32) -> MetricsResult<()> {
    if (28..=31).contains(&days_in_month) {
        Ok(())
    } else {
        Err(MetricsError::InvalidMonthLength(days_in_month))
    }
}

pub fn validate_day(day: u32, days_in_month: u32) -> MetricsResult<()> {
    if day >= 1 && day <= days_in_month {
        Ok(())
    } else {
        Err(MetricsError::InvalidRange { day, days_in_month })
    }
}

pub fn validate_percentage(pct: i32) -> MetricsResult<()> {
    if (0..=100).contains(&pct) {
        Ok(())
    } else {
        Err(MetricsError::InvalidPercentage(pct))
    }
}
