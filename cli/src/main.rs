mod logging;
mod report;
mod tui;

use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use tracing::info;
use workstyle_core::repository::data_dir;
use workstyle_core::usecase::advisor::AdvisorUseCase;
use workstyle_core::usecase::history::HistoryUseCase;
use workstyle_core::{
    parse_assignments, parse_holiday_list, parse_month, render_prompt, AdvisorRecommendation,
    AdvisorRequest, AdvisoryService, AttendanceService, FileMonthRepository, FileSettingsRepository,
};

type Service = AttendanceService<FileMonthRepository, FileSettingsRepository>;

#[derive(Parser)]
#[command(name = "workstyle")]
#[command(about = "Track home and office days against an attendance goal", long_about = None)]
struct Cli {
    /// Data directory (defaults to $WORKSTYLE_HOME or ~/.workstyle)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Also print logs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Show the month calendar and its statistics
    Show {
        /// this, next, prev, +N, -N or YYYY-MM
        #[arg(short, long, default_value = "this")]
        month: String,
    },
    /// Mark days (usage: set 3:office 4-6:vacation 9)
    Set {
        #[arg(short, long, default_value = "this")]
        month: String,
        /// DAY[:STATE] or FROM-TO[:STATE]; no state clears the day
        #[arg(required = true)]
        assignments: Vec<String>,
    },
    /// Show or replace the holidays of a month (usage: holidays 1,15,25)
    Holidays {
        #[arg(short, long, default_value = "this")]
        month: String,
        /// Comma separated day numbers
        list: Option<String>,
        /// Restore the default national holidays
        #[arg(long, conflicts_with = "list")]
        reset: bool,
    },
    /// Set the office goal percentage
    Goal { pct: i32 },
    /// Set the home-work limit percentage used for the alert
    Limit { pct: i32 },
    /// Print the month statistics
    Stats {
        #[arg(short, long, default_value = "this")]
        month: String,
        /// Print the raw metrics as JSON
        #[arg(long)]
        json: bool,
    },
    /// Summaries of every stored month
    History,
    /// Print the advisor request, or compare it with a saved advisor answer
    Advise {
        #[arg(short, long, default_value = "this")]
        month: String,
        /// JSON file holding {"officeDaysNeeded", "recommendationReasoning"}
        #[arg(long)]
        answer: Option<PathBuf>,
    },
    /// Open the Terminal User Interface
    Tui {
        #[arg(short, long, default_value = "this")]
        month: String,
    },
}

/// Advisor answer produced elsewhere and saved to disk.
struct SavedAnswer {
    path: Option<PathBuf>,
}

impl AdvisoryService for SavedAnswer {
    fn recommend(&self, _request: &AdvisorRequest) -> Result<AdvisorRecommendation> {
        let path = self
            .path
            .as_ref()
            .ok_or_else(|| anyhow!("No advisor answer file given (use --answer)"))?;
        let content = fs::read_to_string(path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        serde_json::from_str(&content).with_context(|| format!("Invalid advisor answer in {}", path.display()))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let data_dir = data_dir(cli.data_dir.clone())?;
    let interactive = matches!(cli.command, None | Some(Commands::Tui { .. }));
    let _guard = logging::init(&data_dir, cli.verbose && !interactive)?;

    let service = AttendanceService::new(
        FileMonthRepository::new(Some(data_dir.clone()))?,
        FileSettingsRepository::new(Some(data_dir))?,
    );
    let today = Local::now().date_naive();

    match cli.command {
        Some(Commands::Show { month }) => {
            let (year, month) = parse_month(&month, today)?;
            let summary = service.summary(year, month, today)?;
            report::print_calendar(&summary);
            report::print_stats(&summary);
        }
        Some(Commands::Set { month, assignments }) => {
            let (year, month) = parse_month(&month, today)?;
            let assignments = parse_assignments(&assignments)?;
            service.apply_assignments(year, month, &assignments)?;
            let changed: usize = assignments.iter().map(|a| a.days.clone().count()).sum();
            info!(year, month, changed, "marked days");

            let summary = service.summary(year, month, today)?;
            println!("Updated {} day(s) in {}", changed, summary.label);
            report::print_stats(&summary);
        }
        Some(Commands::Holidays { month, list, reset }) => {
            let (year, month) = parse_month(&month, today)?;
            let days = if reset {
                service.reset_month(year, month)?
            } else if let Some(list) = list {
                service.set_holidays(year, month, &parse_holiday_list(&list))?
            } else {
                service.load_month(year, month)?
            };
            let holidays: Vec<String> = days.holidays().iter().map(|d| d.to_string()).collect();
            if holidays.is_empty() {
                println!("No holidays set.");
            } else {
                println!("Holidays: {}", holidays.join(","));
            }
        }
        Some(Commands::Goal { pct }) => {
            let settings = service.set_office_goal(pct)?;
            println!("Office goal set to {}%", settings.office_goal_percentage);
        }
        Some(Commands::Limit { pct }) => {
            let settings = service.set_home_limit(pct)?;
            println!("Home-work limit set to {}%", settings.home_limit_percentage);
        }
        Some(Commands::Stats { month, json }) => {
            let (year, month) = parse_month(&month, today)?;
            let summary = service.summary(year, month, today)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summary.metrics)?);
            } else {
                report::print_stats(&summary);
            }
        }
        Some(Commands::History) => {
            let history = HistoryUseCase::new(&service).monthly_history(today)?;
            report::print_history(&history);
        }
        Some(Commands::Advise { month, answer }) => {
            let (year, month) = parse_month(&month, today)?;
            advise(&service, year, month, today, answer)?;
        }
        Some(Commands::Tui { month }) => {
            let (year, month) = parse_month(&month, today)?;
            tui::run(service, year, month, today)?;
        }
        None => {
            let (year, month) = parse_month("this", today)?;
            tui::run(service, year, month, today)?;
        }
    }
    Ok(())
}

fn advise(service: &Service, year: i32, month: u32, today: NaiveDate, answer: Option<PathBuf>) -> Result<()> {
    let advisor = SavedAnswer { path: answer };
    let usecase = AdvisorUseCase::new(service, &advisor);

    if advisor.path.is_some() {
        let advice = usecase.advise(year, month, today)?;
        report::print_advice(&advice);
    } else {
        let (_, request) = usecase.request(year, month, today)?;
        println!("{}", serde_json::to_string_pretty(&request)?);
        println!();
        println!("{}", render_prompt(&request));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use workstyle_core::{Metrics, Policy};

    fn request() -> AdvisorRequest {
        AdvisorRequest::from_metrics(&Metrics::default(), &Policy::default())
    }

    #[test]
    fn test_saved_answer_reads_camel_case_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("answer.json");
        fs::write(&path, r#"{"officeDaysNeeded": 3, "recommendationReasoning": "Go in on Tuesdays."}"#).unwrap();

        let advisor = SavedAnswer { path: Some(path) };
        let answer = advisor.recommend(&request()).unwrap();
        assert_eq!(answer.office_days_needed, 3.0);
        assert_eq!(answer.recommendation_reasoning, "Go in on Tuesdays.");
    }

    #[test]
    fn test_saved_answer_errors_name_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        let err = SavedAnswer { path: Some(missing.clone()) }.recommend(&request()).unwrap_err();
        assert!(err.to_string().contains(&missing.display().to_string()));

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "not json").unwrap();
        let err = SavedAnswer { path: Some(broken) }.recommend(&request()).unwrap_err();
        assert!(err.to_string().starts_with("Invalid advisor answer"));

        assert!(SavedAnswer { path: None }.recommend(&request()).is_err());
    }

    #[test]
    fn test_request_is_built_without_an_answer_file() {
        let dir = tempfile::tempdir().unwrap();
        let service = AttendanceService::new(
            FileMonthRepository::new(Some(dir.path().to_path_buf())).unwrap(),
            FileSettingsRepository::new(Some(dir.path().to_path_buf())).unwrap(),
        );
        let advisor = SavedAnswer { path: None };
        let today = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();

        // June 2025 has 21 weekdays; the 10th and 13th are seeded holidays
        let (metrics, request) = AdvisorUseCase::new(&service, &advisor).request(2025, 5, today).unwrap();
        assert_eq!(request.total_workdays_in_month, 19);
        assert_eq!(request.holidays_in_month, 2);
        assert_eq!(request.office_days_goal_percentage, 40);
        assert_eq!(metrics.office_days_needed, 8);
    }
}
