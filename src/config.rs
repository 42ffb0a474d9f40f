// src/config.rs

//! Configuration loading utilities.

use std::path::Path;

use crate::constants::BASE_URL_ENV;
use crate::error::{AppError, Result};
use crate::models::Config;

/// Load the configuration file, apply the `ECODELI_API_URL` override and
/// validate the result.
///
/// Only a missing file falls back to defaults. A file that fails to parse
/// is reported, never replaced.
pub fn load_config(path: &Path) -> Result<Config> {
    let mut config = Config::load_or_default(path)?;
    config.override_base_url(std::env::var(BASE_URL_ENV).ok());

    config
        .validate()
        .map_err(|e| AppError::config(format!("Invalid configuration: {e}")))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[api]\nbase_url = \"https://api.ecodeli.test/api\"\ntimeout_secs = 3"
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.api.timeout_secs, 3);
    }

    #[test]
    fn test_load_config_rejects_invalid_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api]\ntimeout_secs = 0").unwrap();

        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_load_config_keeps_parse_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[api]\nbase_url = \"https://api.ecodeli.test/api\"\ntimeout_secs = \"ten\""
        )
        .unwrap();

        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, AppError::Toml(_)));
    }

    #[test]
    fn test_load_config_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.api.timeout_secs, 10);
    }
}
