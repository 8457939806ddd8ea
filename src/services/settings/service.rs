use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;

use crate::models::settings::Settings;

const SETTINGS_FILE: &str = "settings.toml";

/// Loads and stores [`Settings`] in a TOML file.
pub struct SettingsService {
    path: PathBuf,
}

impl SettingsService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Service bound to the platform configuration directory.
    pub fn with_default_path() -> Result<Self> {
        Self::default_path().map(Self::new)
    }

    pub fn default_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", "CalendarPages", "CalendarPages")
            .ok_or_else(|| anyhow!("Could not determine a configuration directory"))?;
        Ok(dirs.config_dir().join(SETTINGS_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the current settings, falling back to defaults when no file exists yet
    pub fn get(&self) -> Result<Settings> {
        if !self.path.exists() {
            log::info!(
                "No settings file at {}, using defaults",
                self.path.display()
            );
            return Ok(Settings::default());
        }

        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read settings from {}", self.path.display()))?;
        let settings: Settings = toml::from_str(&data)
            .with_context(|| format!("Failed to parse settings in {}", self.path.display()))?;
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings in {}: {}", self.path.display(), e))?;

        log::info!("Loaded settings from {}", self.path.display());
        Ok(settings)
    }

    /// Update settings
    pub fn update(&self, settings: &Settings) -> Result<()> {
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create dir {}", parent.display()))?;
        }

        let data = toml::to_string_pretty(settings).context("Failed to serialize settings")?;
        fs::write(&self.path, data)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))?;

        log::info!("Saved settings to {}", self.path.display());
        Ok(())
    }

    /// Reset settings to defaults
    pub fn reset(&self) -> Result<()> {
        self.update(&Settings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ui::ViewType;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn setup_service() -> (TempDir, SettingsService) {
        let dir = tempfile::tempdir().unwrap();
        let service = SettingsService::new(dir.path().join("nested").join(SETTINGS_FILE));
        (dir, service)
    }

    #[test]
    fn test_get_default_settings() {
        let (_dir, service) = setup_service();
        let settings = service.get().unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_update_settings() {
        let (_dir, service) = setup_service();

        let mut settings = service.get().unwrap();
        settings.first_day_of_week = 1;
        settings.default_view = ViewType::Week;
        settings.initial_date = NaiveDate::from_ymd_opt(2022, 6, 1);

        service.update(&settings).unwrap();

        let updated = service.get().unwrap();
        assert_eq!(updated.first_day_of_week, 1);
        assert_eq!(updated.default_view, ViewType::Week);
        assert_eq!(updated.initial_date, NaiveDate::from_ymd_opt(2022, 6, 1));
    }

    #[test]
    fn test_update_invalid_settings() {
        let (_dir, service) = setup_service();

        let mut settings = service.get().unwrap();
        settings.first_day_of_week = 8;

        assert!(service.update(&settings).is_err());
        assert!(!service.path().exists());
    }

    #[test]
    fn test_get_rejects_inverted_bounds_on_disk() {
        let (dir, _) = setup_service();
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(
            &path,
            "min_date = \"2025-01-01\"\nmax_date = \"2020-01-01\"\n",
        )
        .unwrap();

        let err = SettingsService::new(path.clone()).get().unwrap_err();
        assert!(err.to_string().contains("Invalid settings"));
    }

    #[test]
    fn test_reset_settings() {
        let (_dir, service) = setup_service();

        let mut settings = service.get().unwrap();
        settings.first_day_of_week = 1;
        service.update(&settings).unwrap();

        service.reset().unwrap();

        let reset_settings = service.get().unwrap();
        assert_eq!(reset_settings.first_day_of_week, Settings::default().first_day_of_week);
    }
}
