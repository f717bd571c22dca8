//! Optional `.wisp.toml` project configuration (SPEC_FULL §2). Purely
//! additive: a missing file resolves to [`Config::default`] and nothing
//! about the language pipeline changes.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".wisp.toml";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Default verbosity for the `wisp` binary when `-v` is not given.
    #[serde(default)]
    pub verbose: bool,

    /// Extra directories `RUN` searches when a script path does not resolve
    /// relative to the current directory (SPEC_FULL §3, "RUN's relative path
    /// resolution").
    #[serde(default)]
    pub run_search_path: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            verbose: false,
            run_search_path: Vec::new(),
        }
    }
}

#[derive(Debug)]
pub struct ConfigError(String);

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Load `.wisp.toml` from the current directory, falling back to
    /// defaults when it is absent.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Path::new(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from_path(path)
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("could not read {}: {}", path.display(), e)))?;
        toml::from_str(&content)
            .map_err(|e| ConfigError(format!("could not parse {}: {}", path.display(), e)))
    }

    /// Resolve a `RUN` argument against the configured search path,
    /// returning the first candidate that exists on disk (or the original
    /// path unchanged if none do, so the caller's own error reporting still
    /// applies).
    pub fn resolve_run_path(&self, requested: &str) -> String {
        let direct = Path::new(requested);
        if direct.exists() {
            return requested.to_string();
        }
        for dir in &self.run_search_path {
            let candidate = Path::new(dir).join(requested);
            if candidate.exists() {
                return candidate.to_string_lossy().into_owned();
            }
        }
        requested.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_default() {
        let config = Config::load_from_path(Path::new("/nonexistent/.wisp.toml"));
        assert!(config.is_err());
        assert_eq!(Config::default().verbose, false);
    }

    #[test]
    fn round_trips_through_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".wisp.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "verbose = true\nrun_search_path = [\"lib\"]").unwrap();

        let config = Config::load_from_path(&path).unwrap();
        assert!(config.verbose);
        assert_eq!(config.run_search_path, vec!["lib".to_string()]);
    }

    #[test]
    fn resolve_run_path_falls_back_to_search_dirs() {
        let dir = TempDir::new().unwrap();
        let lib_dir = dir.path().join("lib");
        std::fs::create_dir(&lib_dir).unwrap();
        std::fs::write(lib_dir.join("helper.wisp"), "VAR x = 1").unwrap();

        let config = Config {
            verbose: false,
            run_search_path: vec![lib_dir.to_string_lossy().into_owned()],
        };
        let resolved = config.resolve_run_path("helper.wisp");
        assert!(resolved.ends_with("helper.wisp"));
        assert!(Path::new(&resolved).exists());
    }
}
