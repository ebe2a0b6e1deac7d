use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        kind,
        format,
        file,
        force,
    } = cmd
    {
        let mut pool = open_pool(cfg)?;
        ExportLogic::export(&mut pool, *kind, *format, file, *force)?;
    }
    Ok(())
}
