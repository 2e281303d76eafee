use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use crate::model::settings::Settings;
use crate::repository::data_dir;
use crate::repository::traits::SettingsRepository;

const SETTINGS_FILE_NAME: &str = "settings.json";

#[derive(Clone)]
pub struct FileSettingsRepository {
    file_path: PathBuf,
}

impl FileSettingsRepository {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let mut path = data_dir(base_dir)?;
        fs::create_dir_all(&path)?;
        path.push(SETTINGS_FILE_NAME);

        let repo = FileSettingsRepository { file_path: path };
        if !repo.file_path.exists() {
            repo.write_settings(&Settings::default())?;
        }
        Ok(repo)
    }

    fn write_settings(&self, settings: &Settings) -> Result<()> {
        let file = File::create(&self.file_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, settings)?;
        writer.flush()?;
        Ok(())
    }
}

impl SettingsRepository for FileSettingsRepository {
    fn load(&self) -> Result<Settings> {
        let file = File::open(&self.file_path)?;
        let reader = BufReader::new(file);
        let settings = serde_json::from_reader(reader)?;
        Ok(settings)
    }

    fn save(&self, settings: &Settings) -> Result<()> {
        self.write_settings(settings)?;
        info!(
            office_goal = settings.office_goal_percentage,
            home_limit = settings.home_limit_percentage,
            "saved settings"
        );
        Ok(())
    }
}
