//! Derivation of monthly attendance metrics.
//!
//! A day is non-working when it is a weekend or a holiday (listed by the
//! calendar or marked `Holiday`). Workdays are the remaining days that are
//! not marked `Vacation`. Home and office markings only count on workdays;
//! vacation markings count wherever they fall.

use tracing::{debug, warn};

use crate::calendar::CalendarModel;
use crate::error::{validate_month_length, validate_percentage, MetricsResult};
use crate::model::day_state::DayState;
use crate::model::metrics::Metrics;
use crate::model::month::{DayStateMap, MonthContext, Policy};

pub fn compute_metrics<C: CalendarModel + ?Sized>(
    context: &MonthContext,
    calendar: &C,
    states: &DayStateMap,
    policy: &Policy,
) -> MetricsResult<Metrics> {
    let days_in_month = calendar.days_in_month();
    validate_month_length(days_in_month)?;

    for (day, state) in states.iter() {
        if day == 0 || day > days_in_month {
            debug!(day, %state, days_in_month, "ignoring day outside the month");
        }
    }

    if let Err(err) = validate_percentage(policy.office_goal_percentage) {
        warn!(%err, "clamping office goal");
    }
    let goal = policy.clamped();
    let cutoff = context.cutoff(days_in_month);
    let elapsed = context.elapsed_through(days_in_month);

    let mut m = Metrics {
        cutoff_day: cutoff,
        ..Metrics::default()
    };

    for day in 1..=days_in_month {
        let state = states.get(day);
        let is_holiday = calendar.is_holiday(day) || state == Some(DayState::Holiday);
        let is_weekend = calendar.is_weekend(day);

        if is_holiday {
            m.holidays_in_month += 1;
        }
        if state == Some(DayState::Vacation) {
            m.vacation_days_in_month += 1;
            continue;
        }
        if is_weekend || is_holiday {
            continue;
        }

        let to_date = day <= cutoff;
        m.total_workdays_in_month += 1;
        if day > elapsed {
            m.workdays_remaining += 1;
        }

        match state {
            Some(DayState::Home) => {
                m.home_days_in_month += 1;
                if to_date {
                    m.home_days_to_date += 1;
                }
            }
            Some(DayState::Office) => {
                m.office_days_in_month += 1;
                if to_date {
                    m.office_days_to_date += 1;
                }
            }
            _ => m.unmarked_workdays += 1,
        }
    }

    let marked = m.marked_attendance_days();
    if marked > 0 {
        m.pct_home = m.home_days_in_month as f64 * 100.0 / marked as f64;
        m.pct_office = m.office_days_in_month as f64 * 100.0 / marked as f64;
    }

    m.target_office_days = target_office_days(m.total_workdays_in_month, goal);
    m.office_days_needed = m.target_office_days.saturating_sub(m.office_days_in_month);
    m.goal_reachable = m.office_days_needed <= m.unmarked_workdays;

    debug!(
        year = context.year,
        month = context.month,
        workdays = m.total_workdays_in_month,
        office = m.office_days_in_month,
        needed = m.office_days_needed,
        "computed month metrics"
    );

    Ok(m)
}

/// `ceil(workdays * goal / 100)` without going through floating point.
pub fn target_office_days(workdays: u32, goal: u32) -> u32 {
    (workdays * goal.min(100)).div_ceil(100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::MonthCalendar;
    use crate::error::MetricsError;
    use std::collections::BTreeSet;

    /// Month with a configurable length and explicit weekend days.
    struct FixedCalendar {
        days: u32,
        weekends: BTreeSet<u32>,
        holidays: BTreeSet<u32>,
    }

    impl FixedCalendar {
        fn plain(days: u32) -> Self {
            Self {
                days,
                weekends: BTreeSet::new(),
                holidays: BTreeSet::new(),
            }
        }
    }

    impl CalendarModel for FixedCalendar {
        fn days_in_month(&self) -> u32 {
            self.days
        }
        fn is_weekend(&self, day: u32) -> bool {
            self.weekends.contains(&day)
        }
        fn is_holiday(&self, day: u32) -> bool {
            self.holidays.contains(&day)
        }
    }

    fn ctx() -> MonthContext {
        MonthContext::new(2025, 5)
    }

    #[test]
    fn test_unmarked_month_without_weekends() {
        let cal = FixedCalendar::plain(30);
        let m = compute_metrics(&ctx(), &cal, &DayStateMap::new(), &Policy::new(40)).unwrap();

        assert_eq!(m.total_workdays_in_month, 30);
        assert_eq!(m.target_office_days, 12);
        assert_eq!(m.office_days_in_month, 0);
        assert_eq!(m.office_days_needed, 12);
        assert_eq!(m.unmarked_workdays, 30);
        assert!(m.goal_reachable);
        assert_eq!(m.pct_home, 0.0);
        assert_eq!(m.pct_office, 0.0);
    }

    #[test]
    fn test_vacation_on_weekend_counts_as_vacation_only() {
        // 2025-04-05 is a Saturday
        let cal = MonthCalendar::new(2025, 3);
        assert!(cal.is_weekend(5));
        let mut states = DayStateMap::new();
        states.set(5, DayState::Vacation);

        let m = compute_metrics(&ctx(), &cal, &states, &Policy::default()).unwrap();
        let baseline = compute_metrics(&ctx(), &cal, &DayStateMap::new(), &Policy::default()).unwrap();

        assert_eq!(m.vacation_days_in_month, 1);
        assert_eq!(m.total_workdays_in_month, baseline.total_workdays_in_month);
        assert_eq!(m.total_workdays_in_month, 22);
    }

    #[test]
    fn test_vacation_on_workday_leaves_denominator() {
        let cal = FixedCalendar::plain(30);
        let mut states = DayStateMap::new();
        states.set(3, DayState::Vacation);

        let m = compute_metrics(&ctx(), &cal, &states, &Policy::default()).unwrap();
        assert_eq!(m.vacation_days_in_month, 1);
        assert_eq!(m.total_workdays_in_month, 29);
    }

    #[test]
    fn test_office_goal_met() {
        let cal = FixedCalendar::plain(28);
        let mut states = DayStateMap::new();
        for day in 1..=10 {
            states.set(day, DayState::Office);
        }
        for day in 11..=18 {
            states.set(day, DayState::Home);
        }
        // Six vacation days leave 22 workdays
        for day in 23..=28 {
            states.set(day, DayState::Vacation);
        }

        let m = compute_metrics(&ctx(), &cal, &states, &Policy::new(40)).unwrap();
        assert_eq!(m.total_workdays_in_month, 22);
        assert_eq!(m.target_office_days, 9);
        assert_eq!(m.office_days_in_month, 10);
        assert_eq!(m.office_days_needed, 0);
        assert_eq!(m.pct_office_rounded(), 55.6);
        assert_eq!(m.pct_home_rounded(), 44.4);
    }

    #[test]
    fn test_goal_above_hundred_is_clamped() {
        let cal = FixedCalendar::plain(30);
        let m = compute_metrics(&ctx(), &cal, &DayStateMap::new(), &Policy::new(150)).unwrap();
        let full = compute_metrics(&ctx(), &cal, &DayStateMap::new(), &Policy::new(100)).unwrap();
        assert_eq!(m.target_office_days, 30);
        assert_eq!(m, full);

        let negative = compute_metrics(&ctx(), &cal, &DayStateMap::new(), &Policy::new(-20)).unwrap();
        assert_eq!(negative.target_office_days, 0);
        assert_eq!(negative.office_days_needed, 0);
    }

    #[test]
    fn test_to_date_counts_stop_at_today() {
        let cal = FixedCalendar::plain(30);
        let states: DayStateMap = (1..=20).map(|day| (day, DayState::Home)).collect();
        let context = MonthContext {
            year: 2025,
            month: 5,
            today_day_of_month: Some(10),
            is_current_month: true,
            is_future_month: false,
        };

        let m = compute_metrics(&context, &cal, &states, &Policy::default()).unwrap();
        assert_eq!(m.cutoff_day, 10);
        assert_eq!(m.home_days_to_date, 10);
        assert_eq!(m.home_days_in_month, 20);
        assert_eq!(m.workdays_remaining, 20);
        // Percentages use the full month
        assert_eq!(m.pct_home, 100.0);
    }

    #[test]
    fn test_cutoff_is_clamped_to_month_length() {
        let cal = FixedCalendar::plain(28);
        let states: DayStateMap = (1..=28).map(|day| (day, DayState::Office)).collect();
        let context = MonthContext {
            today_day_of_month: Some(31),
            is_current_month: true,
            ..MonthContext::new(2025, 1)
        };

        let m = compute_metrics(&context, &cal, &states, &Policy::default()).unwrap();
        assert_eq!(m.cutoff_day, 28);
        assert_eq!(m.office_days_to_date, 28);
        assert_eq!(m.workdays_remaining, 0);
    }

    #[test]
    fn test_current_month_without_today_covers_whole_month() {
        let cal = FixedCalendar::plain(30);
        let states: DayStateMap = (1..=30).map(|day| (day, DayState::Home)).collect();
        let context = MonthContext {
            is_current_month: true,
            ..ctx()
        };

        let m = compute_metrics(&context, &cal, &states, &Policy::default()).unwrap();
        assert_eq!(m.cutoff_day, 30);
        assert_eq!(m.home_days_to_date, 30);
    }

    #[test]
    fn test_today_is_ignored_outside_current_month() {
        let cal = FixedCalendar::plain(30);
        let states: DayStateMap = (1..=30).map(|day| (day, DayState::Home)).collect();
        let context = MonthContext {
            today_day_of_month: Some(5),
            ..ctx()
        };

        let m = compute_metrics(&context, &cal, &states, &Policy::default()).unwrap();
        assert_eq!(m.cutoff_day, 30);
        assert_eq!(m.home_days_to_date, 30);
    }

    #[test]
    fn test_remaining_workdays_for_past_current_and_future_months() {
        // 2025-06-10 is a Tuesday; June 2025 has 21 weekdays, 7 of them by the 10th
        let cal = MonthCalendar::new(2025, 5);
        let today = chrono::NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let remaining = |context: MonthContext| {
            compute_metrics(&context, &cal, &DayStateMap::new(), &Policy::default())
                .unwrap()
                .workdays_remaining
        };

        assert_eq!(remaining(MonthContext::for_today(2025, 5, today)), 14);
        let earlier = chrono::NaiveDate::from_ymd_opt(2025, 5, 20).unwrap();
        assert_eq!(remaining(MonthContext::for_today(2025, 5, earlier)), 21);
        let later = chrono::NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        assert_eq!(remaining(MonthContext::for_today(2025, 5, later)), 0);
    }

    #[test]
    fn test_vacation_on_listed_holiday_counts_in_both_tallies() {
        let mut cal = FixedCalendar::plain(30);
        cal.holidays.insert(10);
        let mut states = DayStateMap::new();
        states.set(10, DayState::Vacation);

        let m = compute_metrics(&ctx(), &cal, &states, &Policy::default()).unwrap();
        assert_eq!(m.vacation_days_in_month, 1);
        assert_eq!(m.holidays_in_month, 1);
        assert_eq!(m.total_workdays_in_month, 29);
    }

    #[test]
    fn test_shares_are_exact_at_halfway_values() {
        let cal = FixedCalendar::plain(30);
        let mut states: DayStateMap = (2..=16).map(|day| (day, DayState::Home)).collect();
        states.set(1, DayState::Office);

        let m = compute_metrics(&ctx(), &cal, &states, &Policy::default()).unwrap();
        assert_eq!(m.pct_home, 93.75);
        assert_eq!(m.pct_office, 6.25);
        assert_eq!(m.pct_home_rounded(), 93.8);
    }

    #[test]
    fn test_attendance_on_non_working_days_is_ignored() {
        let mut cal = FixedCalendar::plain(30);
        cal.weekends.insert(6);
        cal.holidays.insert(10);
        let mut states = DayStateMap::new();
        states.set(6, DayState::Office);
        states.set(10, DayState::Home);
        states.set(11, DayState::Holiday);

        let m = compute_metrics(&ctx(), &cal, &states, &Policy::default()).unwrap();
        assert_eq!(m.office_days_in_month, 0);
        assert_eq!(m.home_days_in_month, 0);
        assert_eq!(m.holidays_in_month, 2);
        assert_eq!(m.total_workdays_in_month, 27);
    }

    #[test]
    fn test_stale_keys_are_skipped() {
        let cal = MonthCalendar::new(2025, 1);
        let mut states = DayStateMap::new();
        states.set(0, DayState::Office);
        states.set(30, DayState::Office);
        states.set(31, DayState::Home);

        let m = compute_metrics(&ctx(), &cal, &states, &Policy::default()).unwrap();
        assert_eq!(m.office_days_in_month, 0);
        assert_eq!(m.home_days_in_month, 0);
        assert_eq!(m.total_workdays_in_month, 20);
    }

    #[test]
    fn test_invalid_month_length() {
        let cal = FixedCalendar::plain(27);
        let err = compute_metrics(&ctx(), &cal, &DayStateMap::new(), &Policy::default()).unwrap_err();
        assert_eq!(err, MetricsError::InvalidMonthLength(27));
    }

    #[test]
    fn test_target_matches_ceiling_everywhere() {
        for total in 0..=31u32 {
            for pct in 0..=100u32 {
                let expected = (total as f64 * pct as f64 / 100.0).ceil() as u32;
                assert_eq!(target_office_days(total, pct), expected, "total={} pct={}", total, pct);
            }
        }
    }

    #[test]
    fn test_percentages_sum_to_hundred() {
        let cal = FixedCalendar::plain(31);
        for office in 0..=31u32 {
            for home in 0..=(31 - office) {
                let mut states = DayStateMap::new();
                for day in 1..=office {
                    states.set(day, DayState::Office);
                }
                for day in (office + 1)..=(office + home) {
                    states.set(day, DayState::Home);
                }
                let m = compute_metrics(&ctx(), &cal, &states, &Policy::default()).unwrap();
                if office + home > 0 {
                    assert!((m.pct_home + m.pct_office - 100.0).abs() < 1e-9);
                } else {
                    assert_eq!((m.pct_home, m.pct_office), (0.0, 0.0));
                }
            }
        }
    }

    #[test]
    fn test_day_budget_holds_for_real_months() {
        for month in 0..12 {
            let cal = MonthCalendar::new(2025, month).with_holidays(crate::calendar::default_holidays(month));
            let days = cal.days_in_month();
            let mut states = DayStateMap::new();
            for day in (1..=days).step_by(3) {
                states.set(day, DayState::Vacation);
            }
            for day in (2..=days).step_by(3) {
                states.set(day, DayState::Office);
            }

            let m = compute_metrics(&ctx(), &cal, &states, &Policy::new(60)).unwrap();
            let weekend_days = (1..=days).filter(|d| cal.is_weekend(*d)).count() as u32;
            let vacation_on_workdays = (1..=days)
                .filter(|d| states.get(*d) == Some(DayState::Vacation))
                .filter(|d| !cal.is_weekend(*d) && !cal.is_holiday(*d))
                .count() as u32;
            let plain_holidays = (1..=days)
                .filter(|d| cal.is_holiday(*d) && !cal.is_weekend(*d))
                .filter(|d| states.get(*d) != Some(DayState::Vacation))
                .count() as u32;

            assert!(m.total_workdays_in_month + vacation_on_workdays + plain_holidays + weekend_days <= days);
            assert!(m.office_days_needed <= m.target_office_days);
        }
    }

    #[test]
    fn test_same_input_same_output() {
        let cal = MonthCalendar::new(2025, 9).with_holidays([5]);
        let states: DayStateMap = vec![(1, DayState::Office), (2, DayState::Home), (3, DayState::Vacation)]
            .into_iter()
            .collect();
        let first = compute_metrics(&ctx(), &cal, &states, &Policy::default()).unwrap();
        let second = compute_metrics(&ctx(), &cal, &states, &Policy::default()).unwrap();
        assert_eq!(first, second);
    }
}
