use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{header, info, success, warning};
use std::fs;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
    } = cmd
    {
        let path = Config::config_file();

        if *print_config {
            header("Current configuration");
            println!("{}", serde_yaml::to_string(cfg)?);
        }

        if *check {
            if !path.exists() {
                warning(format!(
                    "No configuration file at {} (defaults in use)",
                    path.display()
                ));
                return Ok(());
            }

            let content = fs::read_to_string(&path)?;
            let missing = Config::missing_keys(&content)?;
            if missing.is_empty() {
                success("Configuration file is complete.");
            } else {
                warning(format!("Missing fields in {}:", path.display()));
                for key in &missing {
                    info(format!("  - {key} (default in use)"));
                }
            }
        }
    }

    Ok(())
}
