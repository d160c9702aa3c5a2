use crate::errors::{AppError, AppResult};
use crate::models::StandingThresholds;
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Whether an I/S mark without a proof document blocks a save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProofPolicy {
    /// Incomplete rows are reported, the save goes through.
    #[default]
    Warn,
    /// The save is refused until every I/S row carries a proof.
    Require,
}

/// When a student is surfaced on the "at risk" list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AtRiskPolicy {
    /// Flag once the student has this many unexcused absences.
    pub min_alpha: u32,
    /// Flag once unexcused absences reach this share of recorded days.
    pub max_absence_ratio: f64,
}

impl Default for AtRiskPolicy {
    fn default() -> Self {
        Self {
            min_alpha: 3,
            max_absence_ratio: 0.2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// SQLite file for attendance logs; in-memory storage when absent.
    #[serde(default)]
    pub database: Option<String>,
    /// Directory with `students.json` / `attendance_logs.json` overriding
    /// the built-in seed data.
    #[serde(default)]
    pub fixtures: Option<String>,
    #[serde(default)]
    pub proof_policy: ProofPolicy,
    #[serde(default)]
    pub standing: StandingThresholds,
    #[serde(default)]
    pub at_risk: AtRiskPolicy,
    #[serde(default = "default_low_gpa")]
    pub low_gpa_threshold: f64,
    #[serde(default = "default_sort")]
    pub default_sort: String,
}

fn default_low_gpa() -> f64 {
    3.0
}
fn default_sort() -> String {
    "name:asc".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: None,
            fixtures: None,
            proof_policy: ProofPolicy::default(),
            standing: StandingThresholds::default(),
            at_risk: AtRiskPolicy::default(),
            low_gpa_threshold: default_low_gpa(),
            default_sort: default_sort(),
        }
    }
}

/// Top-level keys every complete configuration file carries.
pub const KNOWN_KEYS: [&str; 7] = [
    "database",
    "fixtures",
    "proof_policy",
    "standing",
    "at_risk",
    "low_gpa_threshold",
    "default_sort",
];

impl Config {
    /// Return the standard configuration directory
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".rcampus")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rcampus.conf")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> AppResult<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| AppError::Config(format!("failed to parse configuration: {e}")))
    }

    /// Keys of `KNOWN_KEYS` absent from a YAML document.
    pub fn missing_keys(content: &str) -> AppResult<Vec<String>> {
        let yaml: serde_yaml::Value = serde_yaml::from_str(content)?;
        let Some(map) = yaml.as_mapping() else {
            return Ok(KNOWN_KEYS.iter().map(|k| k.to_string()).collect());
        };

        Ok(KNOWN_KEYS
            .iter()
            .filter(|k| !map.contains_key(**k))
            .map(|k| k.to_string())
            .collect())
    }

    /// `~/` is expanded; other relative names land in the config directory.
    pub fn resolve_db_path(name: &str) -> String {
        let p = expand_tilde(name);
        let p = if p.is_absolute() {
            p
        } else {
            Self::config_dir().join(p)
        };
        p.to_string_lossy().to_string()
    }

    /// Write the configuration file. With a custom database name the path is
    /// resolved against the config directory unless already absolute.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();

        let config = Config {
            database: custom_db.map(|name| Self::resolve_db_path(&name)),
            ..Config::default()
        };

        if !is_test {
            fs::create_dir_all(&dir)?;
            let yaml = serde_yaml::to_string(&config)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        Ok(config)
    }
}
