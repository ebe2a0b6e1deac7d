use crate::errors::{AppError, AppResult};
use crate::utils::path::resolve_db_path;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

pub mod migrate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_school_name")]
    pub school_name: String,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_attendance_window")]
    pub attendance_window_days: u32,
    #[serde(default = "default_dashboard_announcements")]
    pub dashboard_announcements: u32,
    #[serde(default = "default_recent_grades")]
    pub recent_grades: u32,
    #[serde(default = "default_zero_fill")]
    pub attendance_summary_zero_fill: bool,
}

fn default_school_name() -> String {
    "My School".to_string()
}
fn default_page_size() -> u32 {
    20
}
fn default_attendance_window() -> u32 {
    30
}
fn default_dashboard_announcements() -> u32 {
    5
}
fn default_recent_grades() -> u32 {
    5
}
fn default_zero_fill() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self::with_database(Self::database_file().to_string_lossy().to_string())
    }
}

impl Config {
    pub fn with_database(database: String) -> Self {
        Self {
            database,
            school_name: default_school_name(),
            page_size: default_page_size(),
            attendance_window_days: default_attendance_window(),
            dashboard_announcements: default_dashboard_announcements(),
            recent_grades: default_recent_grades(),
            attendance_summary_zero_fill: default_zero_fill(),
        }
    }

    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("racademic")
        } else {
            let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
            home.join(".racademic")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("racademic.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("racademic.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Database path with `~` expanded.
    pub fn db_path(&self) -> String {
        resolve_db_path(&self.database)
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Initialize configuration and database files.
    /// Returns the database path that was set up.
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> AppResult<String> {
        let dir = Self::config_dir();

        // DB name: user provided or default
        let db_path = if let Some(name) = custom_name {
            let p = crate::utils::path::expand_tilde(&name);
            if p.is_absolute() { p } else { dir.join(p) }
        } else {
            Self::database_file()
        };

        // Write config file
        if !is_test {
            fs::create_dir_all(&dir)?;
            let config = Config::with_database(db_path.to_string_lossy().to_string());
            fs::write(Self::config_file(), config.to_yaml()?).map_err(|_| AppError::ConfigSave)?;
        }

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        Ok(db_path.to_string_lossy().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let cfg: Config = serde_yaml::from_str("database: /tmp/school.sqlite\n").unwrap();
        assert_eq!(cfg.page_size, 20);
        assert_eq!(cfg.attendance_window_days, 30);
        assert_eq!(cfg.dashboard_announcements, 5);
        assert!(cfg.attendance_summary_zero_fill);
    }

    #[test]
    fn yaml_roundtrip_keeps_overrides() {
        let mut cfg = Config::with_database("/tmp/x.sqlite".into());
        cfg.page_size = 50;
        let back: Config = serde_yaml::from_str(&cfg.to_yaml().unwrap()).unwrap();
        assert_eq!(back.page_size, 50);
        assert_eq!(back.database, "/tmp/x.sqlite");
    }
}
