use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::model::metrics::Metrics;
use crate::model::month::Policy;

/// Numbers handed to the text-generation advisor.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdvisorRequest {
    pub work_from_home_days: u32,
    pub work_from_office_days: u32,
    pub vacation_days: u32,
    pub holidays_in_month: u32,
    pub total_workdays_in_month: u32,
    pub office_days_goal_percentage: u32,
}

impl AdvisorRequest {
    pub fn from_metrics(metrics: &Metrics, policy: &Policy) -> Self {
        Self {
            work_from_home_days: metrics.home_days_in_month,
            work_from_office_days: metrics.office_days_in_month,
            vacation_days: metrics.vacation_days_in_month,
            holidays_in_month: metrics.holidays_in_month,
            total_workdays_in_month: metrics.total_workdays_in_month,
            office_days_goal_percentage: policy.clamped(),
        }
    }
}

/// What the advisor answers. Shown as-is; never reconciled with the engine's own figure.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdvisorRecommendation {
    pub office_days_needed: f64,
    pub recommendation_reasoning: String,
}

pub trait AdvisoryService {
    fn recommend(&self, request: &AdvisorRequest) -> Result<AdvisorRecommendation>;
}

/// Instruction text for the advisor, filled with the request numbers.
pub fn render_prompt(request: &AdvisorRequest) -> String {
    format!(
        "You provide personalized recommendations on how many days a user should work from \
the office this month to meet their employer's attendance policy.

Based on the following information, calculate the number of additional office days needed \
to meet the goal and explain the reasoning.

Work from home days: {}
Work from office days: {}
Vacation days: {}
Holidays in month: {}
Total workdays in month: {}
Office days goal percentage: {}

The goal percentage is the minimum share of workdays to be spent in the office.
Answer with officeDaysNeeded and recommendationReasoning.",
        request.work_from_home_days,
        request.work_from_office_days,
        request.vacation_days,
        request.holidays_in_month,
        request.total_workdays_in_month,
        request.office_days_goal_percentage,
    )
}
