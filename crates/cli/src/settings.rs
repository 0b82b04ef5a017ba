//! Configuration: optional TOML/INI file merged with `SCHOOLHOUSE_*` environment variables
//!
//! ```text
//! [database]
//! url = "sqlite:///var/lib/schoolhouse/school.db"   # or: path = "~/school.db"
//!
//! [paths]
//! data_dir = "~/schoolhouse/csv"                    # CSV seed files
//! ```
//!
//! `SCHOOLHOUSE_DATABASE__URL=sqlite::memory: schoolhouse rooms` overrides the file.

use anyhow::{anyhow, bail, Context, Result};
use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const ENV_PREFIX: &str = "SCHOOLHOUSE";
const CONFIG_FILE: &str = "schoolhouse.toml";
const DATABASE_FILE: &str = "schoolhouse.db";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub database: DatabaseSettings,

    #[serde(default)]
    pub paths: PathSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatabaseSettings {
    /// Full sqlx URL; wins over `path`
    pub url: Option<String>,
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathSettings {
    /// Directory holding `<Table>.csv` seed files
    pub data_dir: Option<String>,
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "schoolhouse", "schoolhouse")
}

/// `<config dir>/schoolhouse.toml` for this platform
pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

impl Settings {
    /// Load from `path` (must exist) or the default location (optional), then the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        match path {
            Some(p) => {
                if !p.exists() {
                    bail!("Config file {} does not exist", p.display());
                }
                builder = builder.add_source(File::from(p).required(true));
            }
            None => {
                if let Some(p) = default_config_path() {
                    builder = builder.add_source(File::from(p).required(false));
                }
            }
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        );

        builder
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Database URL, creating the parent directory of a file-backed default
    pub fn database_url(&self) -> Result<String> {
        if let Some(url) = &self.database.url {
            return Ok(url.clone());
        }

        let path = match &self.database.path {
            Some(p) => PathBuf::from(shellexpand::tilde(p).into_owned()),
            None => project_dirs()
                .ok_or_else(|| anyhow!("Could not determine a data directory; set database.url"))?
                .data_dir()
                .join(DATABASE_FILE),
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Unable to create {}", parent.display()))?;
        }
        Ok(format!("sqlite://{}", path.display()))
    }

    pub fn seed_dir(&self) -> Option<PathBuf> {
        self.paths
            .data_dir
            .as_deref()
            .map(|p| PathBuf::from(shellexpand::tilde(p).into_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schoolhouse.toml");
        fs::write(
            &path,
            "[database]\nurl = \"sqlite::memory:\"\n\n[paths]\ndata_dir = \"/srv/seed\"\n",
        )
        .unwrap();

        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.database_url().unwrap(), "sqlite::memory:");
        assert_eq!(settings.seed_dir(), Some(PathBuf::from("/srv/seed")));
    }

    #[test]
    fn test_load_ini_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db_config.ini");
        fs::write(&path, "[paths]\ndata_dir = /srv/csv\n").unwrap();

        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.seed_dir(), Some(PathBuf::from("/srv/csv")));
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Settings::load(Some(&dir.path().join("absent.toml"))).is_err());
    }

    #[test]
    fn test_database_path_becomes_url() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("nested").join("school.db");
        let settings = Settings {
            database: DatabaseSettings {
                url: None,
                path: Some(db.display().to_string()),
            },
            paths: PathSettings::default(),
        };

        assert_eq!(
            settings.database_url().unwrap(),
            format!("sqlite://{}", db.display())
        );
        assert!(dir.path().join("nested").is_dir());
    }
}
