use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Gauge, Paragraph, Row, Table, Wrap},
    Frame,
};
use workstyle_core::{DayState, DayView};

use crate::tui::app::App;

// --- THEME ---
struct Theme {
    primary: Color,
    muted: Color,
    text: Color,
    home: Color,
    office: Color,
    vacation: Color,
    holiday: Color,
}

const THEME: Theme = Theme {
    primary: Color::Cyan,
    muted: Color::DarkGray,
    text: Color::White,
    home: Color::Green,
    office: Color::Blue,
    vacation: Color::Yellow,
    holiday: Color::Red,
};

const WEEK_HEADER: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub fn draw(f: &mut Frame, app: &App) {
    let size = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Calendar + stats
            Constraint::Length(3), // Alert / status
            Constraint::Length(1), // Footer
        ])
        .split(size);

    let header = Paragraph::new(Line::from(vec![
        Span::styled("WORKSTYLE  ", Style::default().fg(THEME.primary).add_modifier(Modifier::BOLD)),
        Span::styled(" < ", Style::default().fg(THEME.muted)),
        Span::styled(app.summary.label.clone(), Style::default().fg(THEME.text).add_modifier(Modifier::BOLD)),
        Span::styled(" > ", Style::default().fg(THEME.muted)),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(header, main_chunks[0]);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(main_chunks[1]);

    draw_calendar(f, app, content_chunks[0]);
    draw_stats(f, app, content_chunks[1]);
    draw_alert(f, app, main_chunks[2]);

    let footer = Paragraph::new(
        "arrows/hjkl: move | o: office  w: home  v: vacation  f: holiday  x: clear | [ ]: month | +/-: goal | q: quit",
    )
    .style(Style::default().fg(THEME.muted))
    .alignment(Alignment::Center);
    f.render_widget(footer, main_chunks[3]);
}

fn state_color(state: DayState) -> Color {
    match state {
        DayState::Home => THEME.home,
        DayState::Office => THEME.office,
        DayState::Vacation => THEME.vacation,
        DayState::Holiday => THEME.holiday,
    }
}

fn day_cell(view: &DayView, selected: bool) -> Cell<'static> {
    let (tag, color) = match view.state {
        Some(state) => (state.short().to_string(), state_color(state)),
        None if view.is_holiday => ("F".to_string(), THEME.holiday),
        None if view.is_weekend => ("-".to_string(), THEME.muted),
        None => (" ".to_string(), THEME.text),
    };

    let mut style = Style::default().fg(color);
    if view.is_today {
        style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
    }
    if selected {
        style = style.bg(THEME.muted).add_modifier(Modifier::BOLD);
    }
    Cell::from(Span::styled(format!("{:>2} {}", view.day, tag), style))
}

fn draw_calendar(f: &mut Frame, app: &App, area: Rect) {
    let mut rows = Vec::new();
    let mut week: Vec<Cell> = (0..app.summary.first_weekday).map(|_| Cell::from("")).collect();

    for view in &app.summary.days {
        week.push(day_cell(view, view.day == app.selected));
        if week.len() == 7 {
            rows.push(Row::new(std::mem::take(&mut week)).height(2));
        }
    }
    if !week.is_empty() {
        rows.push(Row::new(week).height(2));
    }

    let table = Table::new(rows, [Constraint::Length(6); 7])
        .header(Row::new(WEEK_HEADER).style(Style::default().fg(THEME.primary)))
        .block(
            Block::default()
                .title(" Calendar ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );
    f.render_widget(table, area);
}

fn draw_stats(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(12), Constraint::Length(3)])
        .split(area);

    let m = &app.summary.metrics;
    let label = |text: &'static str| Span::styled(text, Style::default().fg(THEME.muted));
    let value = |text: String, color: Color| {
        Span::styled(text, Style::default().fg(color).add_modifier(Modifier::BOLD))
    };

    let lines = vec![
        Line::from(vec![label("Holidays:        "), value(m.holidays_in_month.to_string(), THEME.holiday)]),
        Line::from(vec![label("Vacation:        "), value(m.vacation_days_in_month.to_string(), THEME.vacation)]),
        Line::from(vec![label("Workdays:        "), value(m.total_workdays_in_month.to_string(), THEME.text)]),
        Line::from(""),
        Line::from(vec![
            label("Home (to date):  "),
            value(format!("{} / {}", m.home_days_to_date, m.home_days_in_month), THEME.home),
        ]),
        Line::from(vec![
            label("Office (to date):"),
            value(format!(" {} / {}", m.office_days_to_date, m.office_days_in_month), THEME.office),
        ]),
        Line::from(vec![label("Remaining:       "), value(m.workdays_remaining.to_string(), THEME.text)]),
        Line::from(""),
        Line::from(vec![
            label("Home / Office:   "),
            value(format!("{:.1}% / {:.1}%", m.pct_home_rounded(), m.pct_office_rounded()), THEME.text),
        ]),
        Line::from(vec![
            label("Target:          "),
            value(format!("{} ({}%)", m.target_office_days, app.summary.policy.clamped()), THEME.text),
        ]),
        Line::from(vec![label("Office needed:   "), value(m.office_days_needed.to_string(), THEME.primary)]),
    ];

    let stats = Paragraph::new(lines).block(
        Block::default()
            .title(" Summary ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(stats, chunks[0]);

    let ratio = if m.target_office_days > 0 {
        (m.office_days_in_month as f64 / m.target_office_days as f64).min(1.0)
    } else {
        1.0
    };
    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(" Office goal ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .gauge_style(Style::default().fg(if m.office_days_needed == 0 { THEME.home } else { THEME.office }))
        .ratio(ratio)
        .label(format!("{} of {} days", m.office_days_in_month, m.target_office_days));
    f.render_widget(gauge, chunks[1]);
}

fn draw_alert(f: &mut Frame, app: &App, area: Rect) {
    let (text, color) = match &app.status {
        Some(status) => (status.clone(), THEME.holiday),
        None => {
            let alert = &app.summary.alert;
            let color = if alert.is_exceeded() { THEME.holiday } else { THEME.home };
            (alert.message(), color)
        }
    };

    let paragraph = Paragraph::new(Span::styled(text, Style::default().fg(color)))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(format!(" {} ", app.summary.alert.title()))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );
    f.render_widget(paragraph, area);
}
