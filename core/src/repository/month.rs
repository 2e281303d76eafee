use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::model::month::MonthRecord;
use crate::repository::data_dir;
use crate::repository::traits::MonthRepository;

const MONTHS_DIR_NAME: &str = "months";

#[derive(Clone)]
pub struct FileMonthRepository {
    base_dir: PathBuf,
}

impl FileMonthRepository {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let path = data_dir(base_dir)?.join(MONTHS_DIR_NAME);
        fs::create_dir_all(&path)?;
        Ok(Self { base_dir: path })
    }

    fn path_for(&self, year: i32, month: u32) -> PathBuf {
        // File names use the calendar month number
        self.base_dir
            .join(format!("month_{:04}_{:02}.json", year, month + 1))
    }
}

impl MonthRepository for FileMonthRepository {
    fn get(&self, year: i32, month: u32) -> Result<Option<MonthRecord>> {
        let path = self.path_for(year, month);
        if !path.exists() {
            debug!(year, month, "no stored month");
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        let record: MonthRecord = serde_json::from_str(&content)?;
        Ok(Some(record))
    }

    fn save(&self, record: &MonthRecord) -> Result<()> {
        let path = self.path_for(record.year, record.month);
        let content = serde_json::to_string_pretty(record)?;
        fs::write(&path, content)?;
        info!(year = record.year, month = record.month, days = record.days.len(), "saved month");
        Ok(())
    }

    fn list(&self) -> Result<Vec<MonthRecord>> {
        let mut records = Vec::new();
        if self.base_dir.exists() {
            for entry in fs::read_dir(&self.base_dir)? {
                let entry = entry?;
                let path = entry.path();
                if path.extension().and_then(|s| s.to_str()) == Some("json") {
                    let content = fs::read_to_string(&path)?;
                    match serde_json::from_str::<MonthRecord>(&content) {
                        Ok(record) => records.push(record),
                        Err(err) => warn!(path = %path.display(), %err, "skipping unreadable month file"),
                    }
                }
            }
        }
        records.sort_by_key(|r| (r.year, r.month));
        Ok(records)
    }
}
