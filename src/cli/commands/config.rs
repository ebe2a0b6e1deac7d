use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::config::ConfigLogic;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
        migrate,
        edit_config,
        editor,
    } = cmd
    {
        let path = Config::config_file();

        if *print_config {
            if path.exists() {
                println!("📄 Current configuration ({}):\n", path.display());
                ConfigLogic::print(&path)?;
            } else {
                info(format!(
                    "No configuration file at {}, showing defaults:",
                    path.display()
                ));
                ConfigLogic::print_effective(cfg)?;
            }
        }

        if *check {
            ConfigLogic::check(&path)?;
        }

        if *migrate {
            ConfigLogic::migrate(&path)?;
        }

        if *edit_config {
            ConfigLogic::edit(&path, editor)?;
            success(format!("Configuration file edited: {}", path.display()));
        }
    }

    Ok(())
}
