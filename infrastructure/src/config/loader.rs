//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Project-level config file names, checked in order.
pub const PROJECT_CONFIG_FILES: [&str; 2] = ["pipefmt.toml", ".pipefmt.toml"];

/// Environment variable prefix; `__` separates nested keys
/// (`PIPEFMT_FORMATTER__TIMEOUT_MS=5000`).
pub const ENV_PREFIX: &str = "PIPEFMT_";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] Box<figment::Error>),

    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Where configuration is read from, lowest priority first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigSources {
    pub global: Option<PathBuf>,
    pub project: Option<PathBuf>,
    pub explicit: Option<PathBuf>,
    /// Merge `PIPEFMT_*` environment variables last
    pub env: bool,
}

impl ConfigSources {
    /// The standard locations for the current user and directory.
    pub fn discover(explicit: Option<&Path>) -> Self {
        Self {
            global: ConfigLoader::global_config_path(),
            project: ConfigLoader::project_config_path(),
            explicit: explicit.map(Path::to_path_buf),
            env: true,
        }
    }

    /// Built-in defaults plus environment only (`--no-config`).
    pub fn defaults_only() -> Self {
        Self {
            env: true,
            ..Self::default()
        }
    }

    /// The file a settings change should be written to.
    ///
    /// The most specific file wins so that the change is not shadowed by a
    /// higher-priority file: explicit, then an existing project file, then
    /// the global file.
    pub fn write_target(&self) -> Option<PathBuf> {
        self.explicit
            .clone()
            .or_else(|| self.project.clone().filter(|p| p.exists()))
            .or_else(|| self.global.clone())
    }
}

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment: `PIPEFMT_FORMATTER__PATH=...`
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./pipefmt.toml` or `./.pipefmt.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/pipefmt/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, ConfigError> {
        Self::load_from(&ConfigSources::discover(config_path))
    }

    pub fn load_from(sources: &ConfigSources) -> Result<FileConfig, ConfigError> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global) = &sources.global
            && global.exists()
        {
            figment = figment.merge(Toml::file(global));
        }

        if let Some(project) = &sources.project
            && project.exists()
        {
            figment = figment.merge(Toml::file(project));
        }

        // A missing explicit file is an error, not a silent fallback
        if let Some(path) = &sources.explicit {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.clone()));
            }
            figment = figment.merge(Toml::file(path));
        }

        if sources.env {
            figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));
        }

        figment.extract().map_err(|e| ConfigError::Invalid(Box::new(e)))
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns `$XDG_CONFIG_HOME/pipefmt/config.toml` if set,
    /// otherwise the platform config directory.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("pipefmt").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_CONFIG_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(sources: &ConfigSources) {
        println!("Configuration sources (in priority order):");

        if sources.env {
            println!("  [     ] Env:     {}*", ENV_PREFIX);
        }

        if let Some(path) = &sources.explicit {
            println!("  [FOUND] Explicit: {}", path.display());
        }

        match &sources.project {
            Some(path) => println!("  [FOUND] Project: {}", path.display()),
            None => println!("  [     ] Project: ./pipefmt.toml or ./.pipefmt.toml"),
        }

        if let Some(path) = &sources.global {
            let mark = if path.exists() { "FOUND" } else { "     " };
            println!("  [{}] Global:  {}", mark, path.display());
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn file_only(path: PathBuf) -> ConfigSources {
        ConfigSources {
            explicit: Some(path),
            ..ConfigSources::default()
        }
    }

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        let (settings, issues) = config.to_settings();
        assert!(settings.format_on_persist);
        assert!(issues.is_empty());
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("pipefmt"));
    }

    #[test]
    fn test_project_overrides_global() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("global.toml");
        let project = dir.path().join("pipefmt.toml");
        std::fs::write(
            &global,
            "[formatter]\npath = \"global-fmt\"\ntimeout_ms = 1000\n",
        )
        .unwrap();
        std::fs::write(&project, "[formatter]\npath = \"project-fmt\"\n").unwrap();

        let config = ConfigLoader::load_from(&ConfigSources {
            global: Some(global),
            project: Some(project),
            ..ConfigSources::default()
        })
        .unwrap();

        let (settings, _) = config.to_settings();
        assert_eq!(settings.tool_path.as_deref(), Some("project-fmt"));
        assert_eq!(settings.timeout, Duration::from_millis(1000));
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = ConfigLoader::load_from(&file_only(dir.path().join("absent.toml")));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_wrong_type_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[formatter]\ntimeout_ms = \"soon\"\n").unwrap();

        let result = ConfigLoader::load_from(&file_only(path));

        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_write_target_prefers_most_specific() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("config.toml");
        let project = dir.path().join("pipefmt.toml");

        let sources = ConfigSources {
            global: Some(global.clone()),
            project: Some(project.clone()),
            ..ConfigSources::default()
        };
        // Project file does not exist yet
        assert_eq!(sources.write_target(), Some(global));

        std::fs::write(&project, "").unwrap();
        assert_eq!(sources.write_target(), Some(project));

        let explicit = dir.path().join("custom.toml");
        let sources = ConfigSources {
            explicit: Some(explicit.clone()),
            ..sources
        };
        assert_eq!(sources.write_target(), Some(explicit));
    }
}
