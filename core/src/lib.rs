pub mod advisory;
pub mod alert;
pub mod calendar;
pub mod engine;
pub mod error;
pub mod input;
pub mod model;
pub mod repository;
pub mod service;
pub mod usecase;

pub use advisory::{render_prompt, AdvisorRecommendation, AdvisorRequest, AdvisoryService};
pub use alert::{AlertLevel, HomeLimitAlert};
pub use calendar::{default_holidays, parse_holiday_list, parse_month, CalendarModel, MonthCalendar};
pub use engine::compute_metrics;
pub use error::{MetricsError, MetricsResult};
pub use input::{parse_assignments, Assignment};
pub use model::day_state::DayState;
pub use model::metrics::Metrics;
pub use model::month::{DayStateMap, MonthContext, MonthRecord, Policy};
pub use model::settings::Settings;
pub use repository::{FileMonthRepository, FileSettingsRepository, MonthRepository, SettingsRepository};
pub use service::attendance_service::{build_summary, AttendanceService};
pub use service::dto::{DayView, MonthSummary};
