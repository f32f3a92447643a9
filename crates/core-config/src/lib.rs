//! Configuration loading and parsing.
//!
//! Reads `caret.toml` (or an override path supplied by the binary) into a
//! [`ConfigFile`]. Missing sections and fields fall back to defaults; unknown
//! fields are ignored so older binaries tolerate newer files. A file that
//! fails to parse is reported with `warn!` and replaced by defaults.
//!
//! Values outside their usable range are clamped by [`Config::sanitize`],
//! each clamp logged at info on target `config`.

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

pub const FILE_NAME: &str = "caret.toml";

pub const DPI_SCALE_MIN: f32 = 0.5;
pub const DPI_SCALE_MAX: f32 = 4.0;
pub const TICK_MS_MIN: u64 = 16;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ClickConfig {
    /// Maximum gap between presses that still counts as a multi-click.
    pub multi_click_ms: u64,
}

impl Default for ClickConfig {
    fn default() -> Self {
        Self { multi_click_ms: 400 }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AutoScrollConfig {
    /// Pixels of overshoot per unit of speed.
    pub distance_divisor: f32,
    pub max_scalar: f32,
    /// Pixels scrolled per tick at speed 1.
    pub step: f32,
    pub tick_ms: u64,
}

impl Default for AutoScrollConfig {
    fn default() -> Self {
        Self {
            distance_divisor: 33.0,
            max_scalar: 7.0,
            step: 15.0,
            tick_ms: 100,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    pub dpi_scale: f32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { dpi_scale: 1.0 }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct UndoConfig {
    /// `None` keeps the whole history.
    pub history_limit: Option<usize>,
    pub coalesce_cursor: bool,
}

impl Default for UndoConfig {
    fn default() -> Self {
        Self {
            history_limit: None,
            coalesce_cursor: true,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
    pub file: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            file: "caret.log".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(default)]
pub struct ConfigFile {
    pub click: ClickConfig,
    pub autoscroll: AutoScrollConfig,
    pub display: DisplayConfig,
    pub undo: UndoConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>, // original file string (optional)
    pub source: Option<PathBuf>,
    pub file: ConfigFile,
}

/// Best-effort config path: `caret.toml` in the working directory, then the
/// platform config dir (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from(FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("caret").join(FILE_NAME);
    }
    PathBuf::from(FILE_NAME)
}

/// Strict parse of a configuration document (no clamping).
pub fn parse(content: &str) -> Result<ConfigFile, ConfigError> {
    Ok(toml::from_str::<ConfigFile>(content)?)
}

/// Strict read + parse of `path`, clamped.
pub fn read(path: PathBuf) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    let mut cfg = Config {
        file: parse(&content)?,
        raw: Some(content),
        source: Some(path),
    };
    cfg.sanitize();
    Ok(cfg)
}

/// Lenient load: a missing file yields defaults, a malformed one is logged
/// and yields defaults.
pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    match read(path.clone()) {
        Ok(cfg) => {
            info!(target: "config", path = %path.display(), "config_loaded");
            Ok(cfg)
        }
        Err(ConfigError::Read { .. }) => Ok(Config::default()),
        Err(err @ ConfigError::Parse(_)) => {
            warn!(target: "config", path = %path.display(), error = %err, "config_parse_failed_using_defaults");
            Ok(Config::default())
        }
    }
}

fn clamp_f32(name: &'static str, value: &mut f32, min: f32, max: f32, fallback: f32) {
    let clamped = if value.is_finite() {
        value.clamp(min, max)
    } else {
        fallback
    };
    if clamped != *value {
        info!(target: "config", field = name, raw = *value, clamped, min, max, "config_value_clamped");
        *value = clamped;
    }
}

impl Config {
    /// Clamp every knob into its usable range.
    pub fn sanitize(&mut self) {
        let file = &mut self.file;
        clamp_f32(
            "display.dpi_scale",
            &mut file.display.dpi_scale,
            DPI_SCALE_MIN,
            DPI_SCALE_MAX,
            1.0,
        );
        clamp_f32(
            "autoscroll.distance_divisor",
            &mut file.autoscroll.distance_divisor,
            1.0,
            f32::MAX,
            33.0,
        );
        clamp_f32(
            "autoscroll.max_scalar",
            &mut file.autoscroll.max_scalar,
            1.0,
            f32::MAX,
            7.0,
        );
        clamp_f32("autoscroll.step", &mut file.autoscroll.step, 0.0, f32::MAX, 15.0);
        if file.autoscroll.tick_ms < TICK_MS_MIN {
            info!(
                target: "config",
                field = "autoscroll.tick_ms",
                raw = file.autoscroll.tick_ms,
                clamped = TICK_MS_MIN,
                "config_value_clamped"
            );
            file.autoscroll.tick_ms = TICK_MS_MIN;
        }
    }

    pub fn dpi_scale(&self) -> f32 {
        self.file.display.dpi_scale
    }
}
