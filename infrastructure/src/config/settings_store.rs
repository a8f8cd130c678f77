//! File-backed settings store.
//!
//! Reads go through [`ConfigLoader`] on every call. The format-on-save flag
//! is written back by editing `formatter.format_on_save` in one TOML file;
//! every other key and section in that file is kept.

use super::loader::{ConfigError, ConfigLoader, ConfigSources};
use pipefmt_application::{SettingsError, SettingsPort};
use pipefmt_domain::FormatterSettings;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub struct FileSettingsStore {
    sources: ConfigSources,
}

impl FileSettingsStore {
    pub fn new(sources: ConfigSources) -> Self {
        Self { sources }
    }

    pub fn sources(&self) -> &ConfigSources {
        &self.sources
    }

    fn target(&self) -> Result<PathBuf, SettingsError> {
        self.sources.write_target().ok_or_else(|| SettingsError::Store {
            path: "<none>".to_string(),
            message: "no writable configuration file location".to_string(),
        })
    }
}

impl SettingsPort for FileSettingsStore {
    fn load(&self) -> Result<FormatterSettings, SettingsError> {
        let config =
            ConfigLoader::load_from(&self.sources).map_err(|e| SettingsError::Load(e.to_string()))?;
        let (settings, issues) = config.to_settings();
        for issue in &issues {
            warn!("{}", issue);
        }
        Ok(settings)
    }

    fn set_format_on_persist(&self, enabled: bool) -> Result<(), SettingsError> {
        let path = self.target()?;
        write_format_on_save(&path, enabled).map_err(|e| SettingsError::Store {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        debug!("Stored formatter.format_on_save = {} in {}", enabled, path.display());
        Ok(())
    }
}

/// Set `formatter.format_on_save` in `path`, creating the file if needed.
pub fn write_format_on_save(path: &Path, enabled: bool) -> Result<(), ConfigError> {
    let existing = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let mut table: toml::Table = existing.parse().map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let formatter = table
        .entry("formatter")
        .or_insert_with(|| toml::Value::Table(toml::Table::new()));
    let toml::Value::Table(formatter) = formatter else {
        return Err(ConfigError::Parse {
            path: path.to_path_buf(),
            source: <toml::de::Error as serde::de::Error>::custom("`formatter` is not a table"),
        });
    };
    formatter.insert("format_on_save".to_string(), toml::Value::Boolean(enabled));

    let write_error = |source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }
    std::fs::write(path, table.to_string()).map_err(write_error)
}
