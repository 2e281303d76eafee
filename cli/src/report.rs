use tabled::builder::Builder;
use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};
use workstyle_core::usecase::advisor::Advice;
use workstyle_core::usecase::history::MonthHistory;
use workstyle_core::{DayView, MonthSummary};

const WEEK_HEADER: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[derive(Tabled)]
struct StatRow {
    #[tabled(rename = "Metric")]
    name: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Tabled)]
struct HistoryRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Workdays")]
    workdays: u32,
    #[tabled(rename = "Office")]
    office: u32,
    #[tabled(rename = "Home")]
    home: u32,
    #[tabled(rename = "Vacation")]
    vacation: u32,
    #[tabled(rename = "Office %")]
    pct_office: String,
    #[tabled(rename = "Target")]
    target: u32,
    #[tabled(rename = "Needed")]
    needed: u32,
}

/// Calendar cell text: day number, a state tag and `*` for today.
fn cell_text(view: &DayView) -> String {
    let tag = match view.state {
        Some(state) => state.short().to_string(),
        None if view.is_holiday => "F".to_string(),
        None if view.is_weekend => "-".to_string(),
        None => " ".to_string(),
    };
    let today = if view.is_today { "*" } else { " " };
    format!("{:>2}{}{}", view.day, tag, today)
}

pub fn print_calendar(summary: &MonthSummary) {
    let mut builder = Builder::default();
    builder.push_record(WEEK_HEADER);

    let mut week: Vec<String> = vec![String::new(); summary.first_weekday as usize];
    for view in &summary.days {
        week.push(cell_text(view));
        if week.len() == 7 {
            builder.push_record(std::mem::take(&mut week));
        }
    }
    if !week.is_empty() {
        week.resize(7, String::new());
        builder.push_record(week);
    }

    let mut table = builder.build();
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));

    println!("\n\x1b[1;36m{}\x1b[0m", summary.label);
    println!("{}", table);
    println!("H home  O office  V vacation  F holiday  - weekend  * today");
}

pub fn print_stats(summary: &MonthSummary) {
    let m = &summary.metrics;
    let rows = vec![
        StatRow { name: "Holidays in month", value: m.holidays_in_month.to_string() },
        StatRow { name: "Vacation days in month", value: m.vacation_days_in_month.to_string() },
        StatRow { name: "Workdays in month", value: m.total_workdays_in_month.to_string() },
        StatRow {
            name: "Home days (to date / month)",
            value: format!("{} / {}", m.home_days_to_date, m.home_days_in_month),
        },
        StatRow {
            name: "Office days (to date / month)",
            value: format!("{} / {}", m.office_days_to_date, m.office_days_in_month),
        },
        StatRow { name: "Workdays remaining", value: m.workdays_remaining.to_string() },
        StatRow { name: "Home %", value: format!("{:.1}%", m.pct_home_rounded()) },
        StatRow { name: "Office %", value: format!("{:.1}%", m.pct_office_rounded()) },
        StatRow {
            name: "Office target (days)",
            value: format!("{} ({}%)", m.target_office_days, summary.policy.clamped()),
        },
        StatRow { name: "Office days needed", value: m.office_days_needed.to_string() },
    ];

    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    println!("{}", table);

    let alert = &summary.alert;
    let color = if alert.is_exceeded() { "\x1b[1;31m" } else { "\x1b[1;32m" };
    println!("{}{}\x1b[0m: {}", color, alert.title(), alert.message());
    if !m.goal_reachable {
        println!(
            "\x1b[1;33mOnly {} unmarked workday(s) left; the office goal can no longer be met.\x1b[0m",
            m.unmarked_workdays
        );
    }
}

pub fn print_history(history: &[MonthHistory]) {
    if history.is_empty() {
        println!("No stored months found.");
        return;
    }

    let rows: Vec<HistoryRow> = history
        .iter()
        .map(|h| HistoryRow {
            month: h.label.clone(),
            workdays: h.metrics.total_workdays_in_month,
            office: h.metrics.office_days_in_month,
            home: h.metrics.home_days_in_month,
            vacation: h.metrics.vacation_days_in_month,
            pct_office: format!("{:.1}", h.metrics.pct_office_rounded()),
            target: h.metrics.target_office_days,
            needed: h.metrics.office_days_needed,
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    println!("{}", table);
}

pub fn print_advice(advice: &Advice) {
    println!(
        "Office days needed: {} (tracker) / {} (advisor)",
        advice.metrics.office_days_needed, advice.recommendation.office_days_needed
    );
    println!();
    println!("{}", advice.recommendation.recommendation_reasoning);
}
