//! Global configuration.
//!
//! Loaded once from `render.toml` (or `Render.toml`) in the working directory.
//! If no file is found, defaults are used.
//!
//! ```toml
//! [general]
//! host = "0.0.0.0"
//! port = 8000
//!
//! [http]
//! header_max_size = 16384
//! body_max_size = 1048576
//!
//! [views]
//! path = "views"
//! locations = ["{name}.html", "shared/{name}.html"]
//! view_start = "_ViewStart"
//! ```
use once_cell::sync::OnceCell;
use std::fs::read_to_string;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

static CONFIG: OnceCell<Config> = OnceCell::new();

#[derive(Error, Debug)]
pub enum Error {
    #[error("config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("config file could not be read: {0}")]
    Io(#[from] std::io::Error),

    #[error("view location \"{0}\" is missing the {{name}} placeholder")]
    Location(String),

    #[error("config not found")]
    NoConfig,
}

/// Global configuration.
#[derive(Debug, Clone)]
pub struct Config {
    path: Option<PathBuf>,
    error: Option<String>,
    pub tty: bool,
    pub general: General,
    pub http: Http,
    pub views: ViewsConfig,
}

/// Where the server listens.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct General {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Http {
    pub header_max_size: usize,
    /// Largest `Content-Length` a request may declare.
    pub body_max_size: usize,
}

/// Where views live and how their names are resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewsConfig {
    /// Root directory of the view files.
    pub path: PathBuf,
    /// Location formats searched in order; `{name}` is replaced by the view name.
    pub locations: Vec<String>,
    /// View evaluated before every full render. It can pick a layout.
    pub view_start: String,
}

impl Default for General {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8000,
        }
    }
}

impl Default for Http {
    fn default() -> Self {
        Self {
            header_max_size: 16 * 1024,     // 16KB
            body_max_size: 1024 * 1024,     // 1MB
        }
    }
}

impl Default for ViewsConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("views"),
            locations: vec!["{name}.html".into(), "shared/{name}.html".into()],
            view_start: "_ViewStart".into(),
        }
    }
}

impl ViewsConfig {
    /// Make sure every location can actually produce a name.
    pub fn validate(&self) -> Result<(), Error> {
        for location in &self.locations {
            if !location.contains("{name}") {
                return Err(Error::Location(location.clone()));
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path: None,
            error: None,
            tty: std::io::stderr().is_terminal(),
            general: General::default(),
            http: Http::default(),
            views: ViewsConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from the first config file found in the working directory.
    pub fn load() -> Result<Config, Error> {
        for name in ["render.toml", "Render.toml"] {
            let path = PathBuf::from(name);
            if path.exists() {
                return Self::load_file(&path);
            }
        }

        Err(Error::NoConfig)
    }

    /// Load configuration from a specific file.
    pub fn load_file(path: impl AsRef<Path>) -> Result<Config, Error> {
        let file = read_to_string(path.as_ref())?;
        let mut config = Self::from_str(&file)?;
        config.path = Some(path.as_ref().to_owned());

        Ok(config)
    }

    /// Parse configuration from TOML.
    pub fn from_str(toml: &str) -> Result<Config, Error> {
        let file: ConfigFile = toml::from_str(toml)?;
        file.views.validate()?;

        Ok(Config {
            general: file.general,
            http: file.http,
            views: file.views,
            ..Default::default()
        })
    }

    pub fn get() -> &'static Config {
        get_config()
    }

    /// Print where the configuration came from.
    pub fn log_info(&self) {
        match (&self.path, &self.error) {
            (Some(path), _) => info!("Configuration loaded from \"{}\"", path.display()),
            (None, Some(err)) => warn!("Configuration not loaded ({}), using defaults", err),
            (None, None) => info!("Configuration file not found, using defaults"),
        }
    }
}

pub fn get_config() -> &'static Config {
    CONFIG.get_or_init(|| or_default(Config::load()))
}

/// Fall back to defaults, remembering why the file wasn't used.
/// It's reported by `log_info` once logging is up.
fn or_default(loaded: Result<Config, Error>) -> Config {
    match loaded {
        Ok(config) => config,
        Err(Error::NoConfig) => Config::default(),
        Err(err) => Config {
            error: Some(err.to_string()),
            ..Default::default()
        },
    }
}

#[derive(Serialize, Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    general: General,
    #[serde(default)]
    http: Http,
    #[serde(default)]
    views: ViewsConfig,
}

#[cfg(test)]
mod test {
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::from_str("").expect("empty config");
        assert_eq!(config.general.port, 8000);
        assert_eq!(config.http.header_max_size, 16 * 1024);
        assert_eq!(config.http.body_max_size, 1024 * 1024);
        assert_eq!(config.views.path, PathBuf::from("views"));
        assert_eq!(config.views.view_start, "_ViewStart");
        assert_eq!(
            config.views.locations,
            vec!["{name}.html".to_string(), "shared/{name}.html".to_string()]
        );
    }

    #[test]
    fn test_views_section() {
        let config = Config::from_str(
            r#"
            [general]
            port = 9000

            [views]
            path = "templates"
            locations = ["pages/{name}.jinja"]
        "#,
        )
        .expect("config");

        assert_eq!(config.general.port, 9000);
        assert_eq!(config.general.host, "0.0.0.0");
        assert_eq!(config.views.path, PathBuf::from("templates"));
        assert_eq!(config.views.locations, vec!["pages/{name}.jinja".to_string()]);
        assert_eq!(config.views.view_start, "_ViewStart");
    }

    #[test]
    fn test_location_without_placeholder() {
        let err = Config::from_str(
            r#"
            [views]
            locations = ["index.html"]
        "#,
        )
        .expect_err("location should be rejected");

        assert!(matches!(err, Error::Location(_)));
    }

    #[test]
    fn test_load_file_errors() {
        let dir = TempDir::new("config").expect("tempdir");

        let err = Config::load_file(dir.path().join("missing.toml")).expect_err("no file");
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().starts_with("config file could not be read"));

        let path = dir.path().join("render.toml");
        std::fs::write(&path, "[http]\nbody_max_size = \"big\"\n").expect("write");
        let err = Config::load_file(&path).expect_err("bad toml");
        assert!(matches!(err, Error::Toml(_)));

        std::fs::write(&path, "[http]\nbody_max_size = 512\n").expect("write");
        let config = Config::load_file(&path).expect("config");
        assert_eq!(config.http.body_max_size, 512);
        assert_eq!(config.path, Some(path));
        assert!(config.error.is_none());
    }

    #[test]
    fn test_fallback_keeps_error() {
        let config = or_default(Err(Error::NoConfig));
        assert!(config.error.is_none());

        let config = or_default(Config::from_str("[http]\nheader_max_size = -1\n"));
        assert!(config.error.is_some());
        assert!(config.path.is_none());
        assert_eq!(config.http.header_max_size, 16 * 1024);
    }
}
