use crate::cli::commands::open_state;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::ui::messages::info;
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        what,
        format,
        file,
        force,
    } = cmd
    {
        let state = open_state(cfg)?;
        let logs = state.repo().list_all()?;
        let path = expand_tilde(file);

        let written = ExportLogic::export(
            *what,
            *format,
            &path,
            *force,
            state.students(),
            &logs,
            &cfg.standing,
        )?;
        if written == 0 {
            info(format!("{} file not written.", format.as_str()));
        }
    }
    Ok(())
}
