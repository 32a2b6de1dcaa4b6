//! `tranquil config`: read and edit `config.toml` by dotted key.

use std::path::Path;

use clap::Subcommand;
use serde::Serialize;
use tranquil_core::{Config, ConfigError};

use super::{print_json, CmdResult};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one value, e.g. "breathing.default_session_minutes"
    Get { key: String },
    /// Change one value; the whole file is re-validated before saving
    Set { key: String, value: String },
    /// Print every setting and check that the file is usable
    List,
    /// Print where the config file lives
    Path,
    /// Overwrite the file with defaults
    Reset,
}

#[derive(Serialize)]
struct ConfigReport<'a> {
    path: String,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    problem: Option<String>,
    settings: &'a Config,
}

fn report<'a>(config: &'a Config, path: &Path) -> ConfigReport<'a> {
    let problem = config.validate().err().map(|e| e.to_string());
    ConfigReport {
        path: path.display().to_string(),
        valid: problem.is_none(),
        problem,
        settings: config,
    }
}

pub fn run(action: ConfigAction) -> CmdResult {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            let value = config.get(&key).ok_or(ConfigError::UnknownKey(key))?;
            println!("{value}");
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            config.save()?;
            tracing::info!(%key, %value, "config updated");
            print_json(&serde_json::json!({ "key": key, "value": config.get(&key) }))?;
        }
        ConfigAction::List => {
            let config = Config::load()?;
            print_json(&report(&config, &Config::path()?))?;
        }
        ConfigAction::Path => {
            println!("{}", Config::path()?.display());
        }
        ConfigAction::Reset => {
            let config = Config::default();
            config.save()?;
            print_json(&report(&config, &Config::path()?))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_flags_invalid_settings() {
        let path = Path::new("/tmp/tranquil/config.toml");
        let ok = serde_json::to_value(report(&Config::default(), path)).unwrap();
        assert_eq!(ok["valid"], true);
        assert!(ok.get("problem").is_none());
        assert_eq!(ok["settings"]["countdown"]["default_minutes"], 5);

        let mut config = Config::default();
        config.breathing.default_session_minutes = 4;
        let bad = serde_json::to_value(report(&config, path)).unwrap();
        assert_eq!(bad["valid"], false);
        assert!(bad["problem"]
            .as_str()
            .unwrap()
            .contains("breathing.default_session_minutes"));
    }
}
