//! Global configuration.
//!
//! Loaded from `stache.toml` in the current working directory, if one exists:
//!
//! ```toml
//! [general]
//! tty = true
//!
//! [render]
//! max_depth = 64 # 0 disables the limit
//! ```
//!
//! `STACHE_MAX_DEPTH` in the environment overrides `render.max_depth`.
use once_cell::sync::OnceCell;
use std::env::var;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use std::fs::read_to_string;
use thiserror::Error;
use tracing::{info, warn};

static CONFIG: OnceCell<Config> = OnceCell::new();

#[derive(Error, Debug)]
pub enum Error {
    #[error("config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("config: {0}")]
    Io(#[from] std::io::Error),

    #[error("\"{0}\" is not a valid value for {1}")]
    Env(String, &'static str),

    #[error("config is already loaded")]
    ConfigLoaded,

    #[error("config not found")]
    NoConfig,
}

/// Global configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    path: Option<PathBuf>,
    pub general: General,
    pub render: Render,
}

#[derive(Debug, Clone)]
pub struct General {
    /// Use colors in log output.
    pub tty: bool,
}

#[derive(Debug, Clone)]
pub struct Render {
    /// Maximum number of nested blocks [`crate::Renderer`] accepts. `0` means no limit.
    pub max_depth: usize,
}

impl Default for General {
    fn default() -> Self {
        Self {
            tty: std::io::stderr().is_terminal(),
        }
    }
}

impl Default for Render {
    fn default() -> Self {
        Self {
            max_depth: RenderConfig::default_max_depth(),
        }
    }
}

impl Config {
    /// Load configuration from `stache.toml` (or `Stache.toml`)
    /// and the environment.
    pub fn load() -> Result<Config, Error> {
        match Config::find() {
            Some(path) => Config::load_from(&path),
            None => Err(Error::NoConfig),
        }
    }

    /// Load configuration from a file and the environment.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Config, Error> {
        let mut config = Config::load_file(path)?;
        config.apply_env()?;

        Ok(config)
    }

    /// Load configuration from a file only.
    pub fn load_file(path: impl AsRef<Path>) -> Result<Config, Error> {
        let file = ConfigFile::load(path.as_ref())?;
        let mut config = Config::from_config_file(file);
        config.path = Some(path.as_ref().to_owned());

        Ok(config)
    }

    /// Config file in the current working directory, if there is one.
    fn find() -> Option<PathBuf> {
        ["stache.toml", "Stache.toml"]
            .into_iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Load configuration from `path` and the environment, never failing.
    ///
    /// A file that can't be read or parsed is replaced with defaults. A bad
    /// environment variable is ignored and the file's setting is kept.
    fn load_lenient(path: Option<&Path>) -> Config {
        let mut config = match path {
            Some(path) => Config::load_file(path).unwrap_or_else(|err| {
                warn!("{}, using default configuration", err);
                Config::default()
            }),
            None => Config::default(),
        };

        if let Err(err) = config.apply_env() {
            warn!("{}, ignoring it", err);
        }

        config
    }

    /// Parse configuration from a TOML string. The environment isn't consulted.
    pub fn from_str(text: &str) -> Result<Config, Error> {
        let file: ConfigFile = toml::from_str(text)?;
        Ok(Config::from_config_file(file))
    }

    fn from_config_file(file: ConfigFile) -> Config {
        let mut config = Config::default();

        if let Some(general) = file.general {
            if let Some(tty) = general.tty {
                config.general.tty = tty;
            }
        }

        if let Some(render) = file.render {
            config.render.max_depth = render.max_depth;
        }

        config
    }

    fn apply_env(&mut self) -> Result<(), Error> {
        if let Ok(max_depth) = var("STACHE_MAX_DEPTH") {
            self.render.max_depth = max_depth
                .trim()
                .parse()
                .map_err(|_| Error::Env(max_depth, "STACHE_MAX_DEPTH"))?;
        }

        Ok(())
    }

    /// Nesting limit, if any.
    pub fn max_depth(&self) -> Option<usize> {
        match self.render.max_depth {
            0 => None,
            n => Some(n),
        }
    }

    /// Where the config was loaded from.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Install this configuration globally. Fails if the global config is already in use.
    pub fn init(self) -> Result<(), Error> {
        CONFIG.set(self).map_err(|_| Error::ConfigLoaded)
    }

    pub fn get() -> &'static Config {
        get_config()
    }

    pub fn log_info(&self) {
        match self.path {
            Some(ref path) => info!("Configuration loaded from \"{}\"", path.display()),
            None => info!("Using default configuration"),
        }

        match self.max_depth() {
            Some(max_depth) => info!("Templates may nest up to {} blocks", max_depth),
            None => info!("Template nesting is unlimited"),
        }
    }
}

pub fn get_config() -> &'static Config {
    CONFIG.get_or_init(|| Config::load_lenient(Config::find().as_deref()))
}

#[derive(Serialize, Deserialize)]
struct ConfigFile {
    general: Option<GeneralConfig>,
    render: Option<RenderConfig>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<ConfigFile, Error> {
        let file = read_to_string(path)?;
        let config: Self = toml::from_str(&file)?;

        Ok(config)
    }
}

#[derive(Serialize, Deserialize)]
struct GeneralConfig {
    tty: Option<bool>,
}

#[derive(Serialize, Deserialize)]
struct RenderConfig {
    #[serde(default = "RenderConfig::default_max_depth")]
    max_depth: usize,
}

impl RenderConfig {
    fn default_max_depth() -> usize {
        256
    }
}
