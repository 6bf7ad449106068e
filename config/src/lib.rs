//! Plotter configuration.
//!
//! Loaded once from `~/.sudoplot/config.toml` (or the file named by
//! `SUDOPLOT_CONFIG`) and then passed by reference. A missing file means
//! defaults.
//!
//! ```toml
//! puzzle = 2
//! assets_dir = "${HOME}/sudoplot-assets"
//!
//! [pen]
//! up = 70
//! down = 170
//! dock = 235
//!
//! [origin]
//! x = 27
//! y = 0
//!
//! [draw]
//! grid = true
//! numbers = true
//! wipe = false
//! start_end = true
//!
//! [device]
//! port = "/dev/ttyACM0"
//! ```

mod env;

use std::path::{Path, PathBuf};

use serde::Deserialize;
use sudoplot_types::PenSettings;
use thiserror::Error;

pub use env::expand_vars;

/// Overrides the config file location.
pub const CONFIG_PATH_VAR: &str = "SUDOPLOT_CONFIG";
/// Overrides `[device] port`. Empty means "no device".
pub const PORT_VAR: &str = "SUDOPLOT_PORT";
/// Overrides `puzzle`. Empty or `-1` means "random".
pub const PUZZLE_VAR: &str = "SUDOPLOT_PUZZLE";

const RANDOM_PUZZLE: &str = "-1";

// Default value function for serde (bool::default() is false, so only true needs a fn)
const fn default_true() -> bool {
    true
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("{var}='{value}' is not a valid puzzle index")]
    Env { var: &'static str, value: String },
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlotterConfig {
    /// Puzzle index into the book; `None` picks one at random.
    pub puzzle: Option<usize>,
    /// Directory holding resource files that replace the built-in ones.
    pub assets_dir: Option<PathBuf>,
    pub pen: PenConfig,
    pub origin: OriginConfig,
    pub draw: DrawConfig,
    pub device: DeviceConfig,
}

/// Servo values for the pen actuator.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PenConfig {
    pub up: f64,
    pub down: f64,
    pub dock: f64,
}

impl Default for PenConfig {
    fn default() -> Self {
        let pens = PenSettings::default();
        Self {
            up: pens.up,
            down: pens.down,
            dock: pens.dock,
        }
    }
}

impl PenConfig {
    #[must_use]
    pub fn settings(&self) -> PenSettings {
        PenSettings {
            up: self.up,
            down: self.down,
            dock: self.dock,
        }
    }
}

/// Offset of the grid's top-left corner from the board's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OriginConfig {
    pub x: i32,
    pub y: i32,
}

impl Default for OriginConfig {
    fn default() -> Self {
        Self { x: 27, y: 0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DrawConfig {
    #[serde(default = "default_true")]
    pub grid: bool,
    #[serde(default = "default_true")]
    pub numbers: bool,
    /// Wipe the board before drawing.
    #[serde(default = "default_true")]
    pub wipe: bool,
    /// Wrap the drawing in the start and end blocks.
    #[serde(default = "default_true")]
    pub start_end: bool,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            grid: true,
            numbers: true,
            wipe: true,
            start_end: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeviceConfig {
    /// Serial port path. Absent or empty prints the instructions instead.
    pub port: Option<String>,
}

impl PlotterConfig {
    /// Load from the default location with the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        let lookup = |name: &str| std::env::var(name).ok();
        let path = lookup(CONFIG_PATH_VAR)
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .or_else(config_path);

        let config = match path {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };
        config.resolve(lookup)
    }

    /// Parse `path`; a missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "Loaded config");
                Ok(config)
            }
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    /// Expand `${VAR}` references, apply environment overrides, and validate.
    pub fn resolve(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        self.device.port = self
            .device
            .port
            .map(|port| expand_vars(&port, &lookup))
            .filter(|port| !port.trim().is_empty());
        self.assets_dir = self
            .assets_dir
            .map(|dir| PathBuf::from(expand_vars(&dir.to_string_lossy(), &lookup)));

        if let Some(port) = lookup(PORT_VAR) {
            let port = port.trim();
            self.device.port = (!port.is_empty()).then(|| port.to_string());
        }

        if let Some(raw) = lookup(PUZZLE_VAR) {
            let raw = raw.trim();
            self.puzzle = if raw.is_empty() || raw == RANDOM_PUZZLE {
                None
            } else {
                Some(raw.parse().map_err(|_| ConfigError::Env {
                    var: PUZZLE_VAR,
                    value: raw.to_string(),
                })?)
            };
        }

        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("pen.up", self.pen.up),
            ("pen.down", self.pen.down),
            ("pen.dock", self.pen.dock),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::Invalid(format!("{name} must be a finite number")));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn port(&self) -> Option<&str> {
        self.device.port.as_deref()
    }
}

#[must_use]
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".sudoplot").join("config.toml"))
}
