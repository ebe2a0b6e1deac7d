//! Configuration file upgrades: detect keys added in newer releases and
//! write their defaults back without touching the user's values.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

fn default_mapping() -> AppResult<Mapping> {
    let defaults = serde_yaml::to_value(Config::default())
        .map_err(|e| AppError::Config(e.to_string()))?;
    match defaults {
        Value::Mapping(m) => Ok(m),
        _ => Err(AppError::Config("default configuration is not a mapping".into())),
    }
}

fn read_mapping(path: &Path) -> AppResult<Mapping> {
    let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
    match serde_yaml::from_str::<Value>(&content) {
        Ok(Value::Mapping(m)) => Ok(m),
        Ok(Value::Null) => Ok(Mapping::new()),
        Ok(_) => Err(AppError::Config(format!(
            "{} does not contain a YAML mapping",
            path.display()
        ))),
        Err(e) => Err(AppError::Config(e.to_string())),
    }
}

/// Keys known to this release that are absent from the file.
pub fn missing_keys(path: &Path) -> AppResult<Vec<String>> {
    let current = read_mapping(path)?;
    let missing = default_mapping()?
        .keys()
        .filter(|k| !current.contains_key(*k))
        .filter_map(|k| k.as_str().map(str::to_string))
        .collect();
    Ok(missing)
}

/// Add every missing key with its default value.
/// Returns `Ok(true)` when the file was rewritten.
pub fn run_config_migrations(path: &Path) -> AppResult<bool> {
    if !path.exists() {
        info(format!("No configuration file at {}", path.display()));
        return Ok(false);
    }

    let mut current = read_mapping(path)?;
    let mut added = Vec::new();

    for (key, value) in default_mapping()? {
        if !current.contains_key(&key) {
            if let Some(k) = key.as_str() {
                added.push(k.to_string());
            }
            current.insert(key, value);
        }
    }

    if added.is_empty() {
        return Ok(false);
    }

    let serialized = serde_yaml::to_string(&Value::Mapping(current))
        .map_err(|e| AppError::Config(e.to_string()))?;
    fs::write(path, serialized).map_err(|_| AppError::ConfigSave)?;

    success(format!("Configuration updated, added: {}", added.join(", ")));
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn temp_conf(name: &str, body: &str) -> std::path::PathBuf {
        let p = env::temp_dir().join(format!("{name}_racademic.conf"));
        fs::write(&p, body).unwrap();
        p
    }

    #[test]
    fn missing_keys_are_reported_and_filled() {
        let p = temp_conf("cfg_migrate", "database: /tmp/a.sqlite\npage_size: 10\n");

        let missing = missing_keys(&p).unwrap();
        assert!(missing.contains(&"attendance_window_days".to_string()));
        assert!(!missing.contains(&"page_size".to_string()));

        assert!(run_config_migrations(&p).unwrap());
        assert!(missing_keys(&p).unwrap().is_empty());

        let cfg: Config = serde_yaml::from_str(&fs::read_to_string(&p).unwrap()).unwrap();
        assert_eq!(cfg.page_size, 10);

        // second run is a no-op
        assert!(!run_config_migrations(&p).unwrap());
        fs::remove_file(&p).ok();
    }
}
