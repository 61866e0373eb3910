use dirs::home_dir;
use std::{
    env, fs, io,
    path::{Path, PathBuf},
};

const DEFAULT_DIR_NAME: &str = ".budget_tracker";
const STORE_DIR: &str = "store";
const CONFIG_FILE: &str = "config.json";
const HISTORY_FILE: &str = "history.txt";

/// Returns the application-specific data directory, defaulting to `~/.budget_tracker`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("BUDGET_TRACKER_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Resolves the directory layout beneath a chosen base directory.
pub struct PathResolver;

impl PathResolver {
    pub fn resolve_base(custom: Option<PathBuf>) -> PathBuf {
        custom.unwrap_or_else(app_data_dir)
    }

    /// Directory holding one JSON document per key-value store key.
    pub fn store_dir_in(base: &Path) -> PathBuf {
        base.join(STORE_DIR)
    }

    pub fn config_file_in(base: &Path) -> PathBuf {
        base.join(CONFIG_FILE)
    }

    /// Line history kept by the interactive shell.
    pub fn history_file_in(base: &Path) -> PathBuf {
        base.join(HISTORY_FILE)
    }
}

pub fn ensure_dir(path: &Path) -> io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn layout_lives_under_the_chosen_base() {
        let base = Path::new("/data/budget");
        assert_eq!(PathResolver::resolve_base(Some(base.to_path_buf())), base);
        assert_eq!(PathResolver::store_dir_in(base), base.join("store"));
        assert_eq!(PathResolver::config_file_in(base), base.join("config.json"));
        assert_eq!(PathResolver::history_file_in(base), base.join("history.txt"));
    }

    #[test]
    fn ensure_dir_creates_nested_directories_once() {
        let temp = tempdir().unwrap();
        let nested = temp.path().join("a").join("b");
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
        ensure_dir(&nested).unwrap();
    }
}
