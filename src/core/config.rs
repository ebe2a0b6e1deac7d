use crate::config::Config;
use crate::config::migrate::{missing_keys, run_config_migrations};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use std::fs;
use std::path::Path;
use std::process::Command;

pub struct ConfigLogic;

impl ConfigLogic {
    pub fn print(path: &Path) -> AppResult<()> {
        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        println!("{}", content);
        Ok(())
    }

    /// Print the effective configuration when no file exists yet.
    pub fn print_effective(cfg: &Config) -> AppResult<()> {
        println!("{}", cfg.to_yaml()?);
        Ok(())
    }

    pub fn edit(path: &Path, editor: &Option<String>) -> AppResult<()> {
        let ed = editor
            .clone()
            .or_else(|| std::env::var("EDITOR").ok())
            .unwrap_or_else(|| {
                if cfg!(target_os = "windows") {
                    "notepad".into()
                } else {
                    "nano".into()
                }
            });

        let status = Command::new(&ed)
            .arg(path)
            .status()
            .map_err(|e| AppError::Config(format!("cannot start '{ed}': {e}")))?;

        if !status.success() {
            return Err(AppError::Config(format!("editor '{ed}' exited with {status}")));
        }
        Ok(())
    }

    /// Report keys missing from the file. Returns `true` when complete.
    pub fn check(path: &Path) -> AppResult<bool> {
        let missing = missing_keys(path)?;
        if missing.is_empty() {
            success("Configuration is complete.");
            return Ok(true);
        }
        warning(format!(
            "Missing configuration keys: {}",
            missing.join(", ")
        ));
        info("Run `racademic config --migrate` to add them with default values.");
        Ok(false)
    }

    pub fn migrate(path: &Path) -> AppResult<()> {
        if !run_config_migrations(path)? && path.exists() {
            info("Configuration already up to date.");
        }
        Ok(())
    }
}
