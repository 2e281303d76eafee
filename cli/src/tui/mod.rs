pub mod app;
pub mod ui;

use std::io;

use anyhow::Result;
use chrono::NaiveDate;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use workstyle_core::{AttendanceService, DayState, FileMonthRepository, FileSettingsRepository};

use crate::tui::app::App;

pub fn run(
    service: AttendanceService<FileMonthRepository, FileSettingsRepository>,
    year: i32,
    month: u32,
    today: NaiveDate,
) -> Result<()> {
    // Load before touching the terminal so errors print normally
    let mut app = App::new(service, year, month, today)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{:?}", err);
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .map_err(|e| io::Error::other(e.to_string()))?;

        if event::poll(std::time::Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Left | KeyCode::Char('h') => app.move_by(-1),
                    KeyCode::Right | KeyCode::Char('l') => app.move_by(1),
                    KeyCode::Up | KeyCode::Char('k') => app.move_by(-7),
                    KeyCode::Down | KeyCode::Char('j') => app.move_by(7),
                    KeyCode::Char('[') => app.previous_month(),
                    KeyCode::Char(']') => app.next_month(),
                    KeyCode::Char('o') => app.mark(Some(DayState::Office)),
                    KeyCode::Char('w') => app.mark(Some(DayState::Home)),
                    KeyCode::Char('v') => app.mark(Some(DayState::Vacation)),
                    KeyCode::Char('f') => app.mark(Some(DayState::Holiday)),
                    KeyCode::Char('x') | KeyCode::Delete | KeyCode::Backspace => app.mark(None),
                    KeyCode::Char('+') | KeyCode::Char('=') => app.adjust_goal(5),
                    KeyCode::Char('-') => app.adjust_goal(-5),
                    _ => {}
                }
            }
        }
    }
}
