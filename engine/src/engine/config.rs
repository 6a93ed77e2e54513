// engine/src/engine/config.rs
#![forbid(unsafe_code)]

/*
Game configuration

Everything a session needs to know up front: grid bounds, tick interval, start length,
item categories, and where finished sessions are reported. Values are plain data; the
engine takes its own copy at construction and never reads global state.

TOML layout
-----------
    [grid]
    width = 24
    height = 16
    tick_ms = 100
    start_len = 3

    [[items]]
    name = "plastic"
    points = 10
    glyph = "B"

    [report]
    endpoint = "http://localhost:8000/game/save_score/"
    timeout_ms = 5000

Every table is optional; missing values fall back to `GameConfig::default()`.
Supplying any `[[items]]` replaces the default category list as a whole.
*/

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::constants::{
    DEFAULT_H, DEFAULT_REPORT_TIMEOUT_MS, DEFAULT_START_LEN, DEFAULT_TICK_MS, DEFAULT_W,
};
use crate::engine::geometry::Cell;
use crate::engine::items::TrashKind;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),

    #[error("grid cannot be resized while a session is active")]
    SessionActive,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub width: usize,
    pub height: usize,
    pub tick_ms: u64,
    pub start_len: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_W,
            height: DEFAULT_H,
            tick_ms: DEFAULT_TICK_MS,
            start_len: DEFAULT_START_LEN,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Score-saving endpoint. `None` keeps reporting local.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    pub timeout_ms: u64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_ms: DEFAULT_REPORT_TIMEOUT_MS,
        }
    }
}

impl ReportConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub grid: GridConfig,
    pub items: Vec<TrashKind>,
    pub report: ReportConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            items: TrashKind::defaults(),
            report: ReportConfig::default(),
        }
    }
}

impl GameConfig {
    /// Parse and validate.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: GameConfig = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Same config with different bounds (not validated).
    pub fn with_grid(mut self, width: usize, height: usize) -> Self {
        self.grid.width = width;
        self.grid.height = height;
        self
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.grid.tick_ms)
    }

    /// Head cell at session start: the grid centre.
    pub fn start_head(&self) -> Cell {
        Cell::new((self.grid.width / 2) as i32, (self.grid.height / 2) as i32)
    }

    /// Initial path, head first, body trailing to the left of the head.
    pub fn start_path(&self) -> Vec<Cell> {
        let head = self.start_head();
        (0..self.grid.start_len as i32)
            .map(|i| Cell::new(head.x - i, head.y))
            .collect()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let g = &self.grid;
        if g.width == 0 || g.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "grid must be at least 1x1, got {}x{}",
                g.width, g.height
            )));
        }
        if g.width > i32::MAX as usize || g.height > i32::MAX as usize {
            return Err(ConfigError::Invalid("grid dimensions overflow i32".into()));
        }
        if g.tick_ms == 0 {
            return Err(ConfigError::Invalid("tick_ms must be > 0".into()));
        }
        if g.start_len == 0 {
            return Err(ConfigError::Invalid("start_len must be >= 1".into()));
        }
        if g.start_len > g.width / 2 + 1 {
            return Err(ConfigError::Invalid(format!(
                "start_len {} does not fit left of the centre column of a {}-wide grid",
                g.start_len, g.width
            )));
        }
        if g.width * g.height <= g.start_len {
            return Err(ConfigError::Invalid(
                "grid leaves no free cell for the first item".into(),
            ));
        }

        if self.items.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one item category is required".into(),
            ));
        }
        let mut seen = HashSet::new();
        for k in &self.items {
            if k.name.trim().is_empty() {
                return Err(ConfigError::Invalid("item category with empty name".into()));
            }
            if !seen.insert(k.name.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate item category '{}'",
                    k.name
                )));
            }
        }

        if self.report.timeout_ms == 0 {
            return Err(ConfigError::Invalid("report.timeout_ms must be > 0".into()));
        }
        Ok(())
    }
}
