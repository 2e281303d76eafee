use std::collections::BTreeSet;

use anyhow::{anyhow, Result};
use chrono::{Datelike, Months, NaiveDate, Weekday};

/// Calendar facts the metrics engine needs about one month.
pub trait CalendarModel {
    fn days_in_month(&self) -> u32;
    fn is_weekend(&self, day: u32) -> bool;
    fn is_holiday(&self, day: u32) -> bool;
}

/// Gregorian month with a Saturday/Sunday weekend and an explicit holiday list.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthCalendar {
    pub year: i32,
    pub month: u32,
    days_in_month: u32,
    holidays: BTreeSet<u32>,
}

impl MonthCalendar {
    pub fn new(year: i32, month: u32) -> Self {
        Self {
            year,
            month,
            days_in_month: days_in_month(year, month),
            holidays: BTreeSet::new(),
        }
    }

    pub fn with_holidays(mut self, days: impl IntoIterator<Item = u32>) -> Self {
        self.holidays.extend(days);
        self
    }

    pub fn weekday(&self, day: u32) -> Option<Weekday> {
        weekday_of(self.year, self.month, day)
    }

    /// Column of day 1 in a Sunday-first week grid.
    pub fn first_weekday(&self) -> u32 {
        self.weekday(1).map(|w| w.num_days_from_sunday()).unwrap_or(0)
    }

    pub fn label(&self) -> String {
        month_label(self.year, self.month)
    }
}

impl CalendarModel for MonthCalendar {
    fn days_in_month(&self) -> u32 {
        self.days_in_month
    }

    fn is_weekend(&self, day: u32) -> bool {
        matches!(self.weekday(day), Some(Weekday::Sat | Weekday::Sun))
    }

    fn is_holiday(&self, day: u32) -> bool {
        self.holidays.contains(&day)
    }
}

fn first_of(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month + 1, 1)
}

/// Number of days in a 0-based month; 0 for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    first_of(year, month)
        .and_then(|start| Some((start.checked_add_months(Months::new(1))? - start).num_days() as u32))
        .unwrap_or(0)
}

pub fn weekday_of(year: i32, month: u32, day: u32) -> Option<Weekday> {
    NaiveDate::from_ymd_opt(year, month + 1, day).map(|d| d.weekday())
}

pub fn next_month(year: i32, month: u32) -> Option<(i32, u32)> {
    shift_month(year, month, 1).ok()
}

pub fn prev_month(year: i32, month: u32) -> Option<(i32, u32)> {
    shift_month(year, month, -1).ok()
}

/// Moves `delta` months away, staying inside the years chrono can represent.
pub fn shift_month(year: i32, month: u32, delta: i64) -> Result<(i32, u32)> {
    let index = (year as i64 * 12 + month as i64)
        .checked_add(delta)
        .ok_or_else(|| anyhow!("Month offset out of range: {}", delta))?;
    let year = i32::try_from(index.div_euclid(12))
        .map_err(|_| anyhow!("Month offset out of range: {}", delta))?;
    Ok((check_year(year)?, index.rem_euclid(12) as u32))
}

fn check_year(year: i32) -> Result<i32> {
    if (NaiveDate::MIN.year()..=NaiveDate::MAX.year()).contains(&year) {
        Ok(year)
    } else {
        Err(anyhow!("Year out of range: {}", year))
    }
}

pub fn month_label(year: i32, month: u32) -> String {
    match first_of(year, month) {
        Some(date) => date.format("%B %Y").to_string(),
        None => format!("{:04}-{:02}", year, month + 1),
    }
}

/// Fixed-date national holidays (Portugal) for a 0-based month.
/// Carnival, Good Friday and Corpus Christi move every year and are entered by hand.
pub fn default_holidays(month: u32) -> Vec<u32> {
    match month {
        0 => vec![1],
        3 => vec![25],
        4 => vec![1],
        5 => vec![10, 13],
        7 => vec![15],
        9 => vec![5],
        10 => vec![1],
        11 => vec![1, 8, 25],
        _ => Vec::new(),
    }
}

/// Parses "1, 15,25" into day numbers, dropping anything that is not a day in 1..=31.
pub fn parse_holiday_list(input: &str) -> Vec<u32> {
    let mut days: Vec<u32> = input
        .split(',')
        .filter_map(|part| part.trim().parse::<u32>().ok())
        .filter(|day| (1..=31).contains(day))
        .collect();
    days.sort_unstable();
    days.dedup();
    days
}

/// Resolves a month argument relative to `today`.
///
/// Accepts `this`, `next`, `prev`/`last`, `+N`/`-N` (months from now) and `YYYY-MM`.
pub fn parse_month(input: &str, today: NaiveDate) -> Result<(i32, u32)> {
    let current = (today.year(), today.month0());
    let input = input.trim();

    match input.to_lowercase().as_str() {
        "" | "this" | "now" => return Ok(current),
        "next" => return shift_month(current.0, current.1, 1),
        "prev" | "last" => return shift_month(current.0, current.1, -1),
        _ => {}
    }

    if let Some(sign) = input.chars().next().filter(|c| *c == '+' || *c == '-') {
        let count: u32 = input[1..]
            .parse()
            .map_err(|_| anyhow!("Invalid relative month: {}", input))?;
        let delta = if sign == '-' { -i64::from(count) } else { i64::from(count) };
        return shift_month(current.0, current.1, delta);
    }

    if let Some((year_str, month_str)) = input.split_once('-') {
        let year: i32 = year_str
            .parse()
            .map_err(|_| anyhow!("Invalid year in month: {}", input))?;
        let month: u32 = month_str
            .parse()
            .map_err(|_| anyhow!("Invalid month number: {}", input))?;
        if !(1..=12).contains(&month) {
            return Err(anyhow!("Month must be between 1 and 12: {}", input));
        }
        return Ok((check_year(year)?, month - 1));
    }

    Err(anyhow!("Could not parse month: {}", input))
}
