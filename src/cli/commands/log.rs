use crate::cli::commands::open_state;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{header, info};
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Log { print: true }) {
        let state = open_state(cfg)?;
        let entries = state.repo().audit_log()?;

        if entries.is_empty() {
            info("The internal log is empty.");
            return Ok(());
        }

        header("Internal log");
        let mut table = Table::new(vec!["#", "Date", "Operation", "Target", "Message"]);
        for e in entries {
            table.add_row(vec![
                e.id.to_string(),
                e.date,
                e.operation,
                e.target,
                e.message,
            ]);
        }
        print!("{}", table.render());
    }

    Ok(())
}
