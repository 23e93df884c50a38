//! Configuration file loader.

use std::path::PathBuf;

use super::types::QuizConfig;

/// Loads the engine configuration from the first TOML file found on its
/// search paths, falling back to defaults when none exists.
#[derive(Debug)]
pub struct ConfigLoader {
    /// Search paths in order of priority.
    search_paths: Vec<PathBuf>,
}

impl ConfigLoader {
    /// Create a loader with the default search path
    /// (`.roster-quiz.toml` in the working directory).
    #[must_use]
    pub fn new() -> Self {
        Self {
            search_paths: vec![PathBuf::from(".roster-quiz.toml")],
        }
    }

    /// Create a loader for a specific config file path.
    #[must_use]
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            search_paths: vec![path],
        }
    }

    /// Load configuration from the first available file, or return
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read or
    /// parsed.
    pub fn load(&self) -> Result<QuizConfig, ConfigError> {
        for path in &self.search_paths {
            if path.exists() {
                tracing::debug!(path = %path.display(), "Loading config file");
                return Self::load_from_path(path);
            }
        }
        tracing::debug!("No config file found, using defaults");
        Ok(QuizConfig::default())
    }

    fn load_from_path(path: &PathBuf) -> Result<QuizConfig, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.clone(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.clone(),
            source: e,
        })
    }

    /// The search paths, for diagnostics.
    #[must_use]
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur during configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let loader = ConfigLoader::with_path(PathBuf::from("/nonexistent/quiz.toml"));
        let config = loader.load().unwrap();
        assert_eq!(config.choices, 4);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "choices = 5\nhistory_window = 3").unwrap();
        let loader = ConfigLoader::with_path(file.path().to_path_buf());
        let config = loader.load().unwrap();
        assert_eq!(config.choices, 5);
        assert_eq!(config.history_window, 3);
    }

    #[test]
    fn test_malformed_file_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "choices = \"many\"").unwrap();
        let loader = ConfigLoader::with_path(file.path().to_path_buf());
        assert!(matches!(
            loader.load(),
            Err(ConfigError::ParseError { .. })
        ));
    }
}
