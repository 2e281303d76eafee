use crate::model::month::MonthRecord;
use crate::model::settings::Settings;
use anyhow::Result;

/// Storage of day states, one record per (year, 0-based month).
pub trait MonthRepository {
    fn get(&self, year: i32, month: u32) -> Result<Option<MonthRecord>>;
    fn save(&self, record: &MonthRecord) -> Result<()>;
    fn list(&self) -> Result<Vec<MonthRecord>>;
}

pub trait SettingsRepository {
    fn load(&self) -> Result<Settings>;
    fn save(&self, settings: &Settings) -> Result<()>;
}
