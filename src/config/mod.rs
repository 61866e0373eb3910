use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    core::utils::{ensure_dir, PathResolver},
    errors::LedgerError,
    export::DEFAULT_PAGE_LINES,
    utils::persistence::write_atomic,
};

const DEFAULT_CURRENCY_SYMBOL: &str = "₦";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub currency_symbol: String,
    #[serde(default = "default_page_lines")]
    pub report_page_lines: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_export_dir: Option<PathBuf>,
}

fn default_page_lines() -> usize {
    DEFAULT_PAGE_LINES
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.into(),
            report_page_lines: DEFAULT_PAGE_LINES,
            last_export_dir: None,
        }
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, LedgerError> {
        Self::from_base(PathResolver::resolve_base(None))
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, LedgerError> {
        Self::from_base(base)
    }

    fn from_base(base: PathBuf) -> Result<Self, LedgerError> {
        ensure_dir(&base)?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
        })
    }

    /// Reads the config file, falling back to defaults when it does not exist.
    pub fn load(&self) -> Result<Config, LedgerError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), LedgerError> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        assert_eq!(manager.load().unwrap(), Config::default());
    }

    #[test]
    fn save_then_load_roundtrip() {
        let temp = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let config = Config {
            currency_symbol: "$".into(),
            report_page_lines: 25,
            ..Config::default()
        };
        manager.save(&config).unwrap();
        assert!(manager.path().ends_with("config.json"));
        assert_eq!(manager.load().unwrap(), config);
    }

    #[test]
    fn saved_files_carry_only_known_preferences() {
        let temp = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        manager.save(&Config::default()).unwrap();
        let saved: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(manager.path()).unwrap()).unwrap();
        let keys: Vec<&str> = saved
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["currency_symbol", "report_page_lines"]);
    }

    #[test]
    fn older_files_without_page_lines_still_load() {
        let temp = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        fs::write(manager.path(), r#"{"locale":"en-US","currency_symbol":"$"}"#).unwrap();
        assert_eq!(manager.load().unwrap().report_page_lines, DEFAULT_PAGE_LINES);
    }
}
