//! Config command implementation.

use crate::cli::{ConfigAction, Output};
use crate::config::Settings;
use anyhow::Result;
use std::path::Path;

/// Run the config command.
pub fn run_config(action: &ConfigAction, settings: Settings) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let toml_str = toml::to_string_pretty(&settings)
                .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;
            println!("{}", toml_str);
        }

        ConfigAction::Path => {
            let config_path = Settings::default_config_path();
            println!("{}", config_path.display());
        }

        ConfigAction::Init { force } => {
            let config_path = Settings::default_config_path();
            if write_config(&settings, &config_path, *force)? {
                Output::success(&format!("Wrote config to {}", config_path.display()));
            } else {
                Output::warning(&format!(
                    "{} already exists. Use --force to overwrite.",
                    config_path.display()
                ));
            }
        }
    }

    Ok(())
}

/// Save `settings` to `path` unless a file is already there.
///
/// Returns `false` when an existing file was left untouched.
fn write_config(settings: &Settings, path: &Path, force: bool) -> Result<bool> {
    if path.exists() && !force {
        return Ok(false);
    }
    settings.save_to(path)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_config_respects_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vidchunk").join("config.toml");

        let mut settings = Settings::default();
        settings.chunking.search_window_seconds = 12.5;
        assert!(write_config(&settings, &path, false).unwrap());

        settings.chunking.search_window_seconds = 40.0;
        assert!(!write_config(&settings, &path, false).unwrap());
        let loaded = Settings::load_from(Some(&path.to_path_buf())).unwrap();
        assert_eq!(loaded.chunking.search_window_seconds, 12.5);

        assert!(write_config(&settings, &path, true).unwrap());
        let loaded = Settings::load_from(Some(&path.to_path_buf())).unwrap();
        assert_eq!(loaded.chunking.search_window_seconds, 40.0);
    }
}
