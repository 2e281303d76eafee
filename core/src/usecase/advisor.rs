use crate::advisory::{AdvisorRecommendation, AdvisorRequest, AdvisoryService};
use crate::model::metrics::Metrics;
use crate::repository::{MonthRepository, SettingsRepository};
use crate::service::attendance_service::AttendanceService;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::info;

/// Engine figures next to the advisor's answer. The two are not reconciled.
#[derive(Debug, Clone, PartialEq)]
pub struct Advice {
    pub metrics: Metrics,
    pub request: AdvisorRequest,
    pub recommendation: AdvisorRecommendation,
}

pub struct AdvisorUseCase<'a, M: MonthRepository, S: SettingsRepository, A: AdvisoryService> {
    service: &'a AttendanceService<M, S>,
    advisor: &'a A,
}

impl<'a, M: MonthRepository, S: SettingsRepository, A: AdvisoryService> AdvisorUseCase<'a, M, S, A> {
    pub fn new(service: &'a AttendanceService<M, S>, advisor: &'a A) -> Self {
        Self { service, advisor }
    }

    pub fn request(&self, year: i32, month: u32, today: NaiveDate) -> Result<(Metrics, AdvisorRequest)> {
        let policy = self.service.settings()?.policy();
        let (_, metrics) = self.service.metrics(year, month, today)?;
        let request = AdvisorRequest::from_metrics(&metrics, &policy);
        Ok((metrics, request))
    }

    pub fn advise(&self, year: i32, month: u32, today: NaiveDate) -> Result<Advice> {
        let (metrics, request) = self.request(year, month, today)?;
        let recommendation = self
            .advisor
            .recommend(&request)
            .context("attendance advisor failed")?;
        info!(
            engine_needed = metrics.office_days_needed,
            advisor_needed = recommendation.office_days_needed,
            "received advisor recommendation"
        );
        Ok(Advice {
            metrics,
            request,
            recommendation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::month::MonthRecord;
    use crate::model::settings::Settings;
    use anyhow::anyhow;
    use std::cell::RefCell;

    struct EmptyMonthRepo;
    impl MonthRepository for EmptyMonthRepo {
        fn get(&self, _year: i32, _month: u32) -> Result<Option<MonthRecord>> { Ok(None) }
        fn save(&self, _record: &MonthRecord) -> Result<()> { Ok(()) }
        fn list(&self) -> Result<Vec<MonthRecord>> { Ok(Vec::new()) }
    }

    #[derive(Default)]
    struct MockSettingsRepo;
    impl SettingsRepository for MockSettingsRepo {
        fn load(&self) -> Result<Settings> { Ok(Settings::default()) }
        fn save(&self, _settings: &Settings) -> Result<()> { Ok(()) }
    }

    struct FixedAdvisor {
        seen: RefCell<Option<AdvisorRequest>>,
    }
    impl AdvisoryService for FixedAdvisor {
        fn recommend(&self, request: &AdvisorRequest) -> Result<AdvisorRecommendation> {
            *self.seen.borrow_mut() = Some(request.clone());
            Ok(AdvisorRecommendation {
                office_days_needed: 3.0,
                recommendation_reasoning: "Plan three office days.".to_string(),
            })
        }
    }

    struct DownAdvisor;
    impl AdvisoryService for DownAdvisor {
        fn recommend(&self, _request: &AdvisorRequest) -> Result<AdvisorRecommendation> {
            Err(anyhow!("connection refused"))
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
    }

    #[test]
    fn test_advice_keeps_both_figures() {
        let service = AttendanceService::new(EmptyMonthRepo, MockSettingsRepo);
        let advisor = FixedAdvisor { seen: RefCell::new(None) };
        let advice = AdvisorUseCase::new(&service, &advisor).advise(2025, 5, today()).unwrap();

        // June 2025: 19 workdays after the two seeded holidays, 40% goal
        assert_eq!(advice.metrics.office_days_needed, 8);
        assert_eq!(advice.recommendation.office_days_needed, 3.0);

        let seen = advisor.seen.borrow().clone().unwrap();
        assert_eq!(seen.total_workdays_in_month, 19);
        assert_eq!(seen.holidays_in_month, 2);
        assert_eq!(seen.office_days_goal_percentage, 40);
    }

    #[test]
    fn test_advisor_failure_propagates() {
        let service = AttendanceService::new(EmptyMonthRepo, MockSettingsRepo);
        let err = AdvisorUseCase::new(&service, &DownAdvisor).advise(2025, 5, today()).unwrap_err();
        assert!(format!("{:#}", err).contains("connection refused"));
    }
}
