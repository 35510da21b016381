use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::api::ScheduleSource;
use crate::layout::{PlacementParams, ViewSelector, DEFAULT_BREAKPOINT};

/// Used when neither the config nor the command line names a source
pub const DEFAULT_SOURCE: &str = "schedule.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// URL or file path of the schedule document
    #[serde(default)]
    pub data_source: Option<String>,
    #[serde(default = "default_breakpoint")]
    pub breakpoint: f32,
    #[serde(default = "default_overlay_margin")]
    pub overlay_margin: f32,
    #[serde(default = "default_overlay_gap")]
    pub overlay_gap: f32,
    #[serde(default = "default_overlay_width")]
    pub overlay_width: f32,
    #[serde(default = "default_docked_height_fraction")]
    pub docked_height_fraction: f32,
    /// Height of one timeline row in the grid
    #[serde(default = "default_row_height")]
    pub row_height: f32,
    #[serde(default = "default_font_scale")]
    pub font_scale: f32,
}

fn default_breakpoint() -> f32 {
    DEFAULT_BREAKPOINT
}

fn default_overlay_margin() -> f32 {
    12.0
}

fn default_overlay_gap() -> f32 {
    10.0
}

fn default_overlay_width() -> f32 {
    340.0
}

fn default_docked_height_fraction() -> f32 {
    0.6
}

fn default_row_height() -> f32 {
    56.0
}

fn default_font_scale() -> f32 {
    1.0
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_source: None,
            breakpoint: default_breakpoint(),
            overlay_margin: default_overlay_margin(),
            overlay_gap: default_overlay_gap(),
            overlay_width: default_overlay_width(),
            docked_height_fraction: default_docked_height_fraction(),
            row_height: default_row_height(),
            font_scale: default_font_scale(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = fs::read_to_string(&config_path)
                .context("Failed to read config file")?;
            serde_json::from_str(&contents)
                .context("Failed to parse config file")
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        // Ensure directory exists
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, contents)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;

        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "schedule-board", "schedule-board")
            .context("Could not determine config directory")?;
        Ok(proj_dirs.config_dir().join("config.json"))
    }

    pub fn source(&self) -> ScheduleSource {
        let raw = self.data_source
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SOURCE);
        ScheduleSource::parse(raw)
    }

    pub fn view_selector(&self) -> ViewSelector {
        ViewSelector::new(self.breakpoint)
    }

    pub fn placement_params(&self) -> PlacementParams {
        PlacementParams {
            margin: self.overlay_margin,
            gap: self.overlay_gap,
            docked_height_fraction: self.docked_height_fraction,
        }
    }
}

/// Command-line values that win over the saved config for this run only
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub source: Option<String>,
    pub breakpoint: Option<f32>,
}

impl Overrides {
    pub fn source(&self, config: &Config) -> ScheduleSource {
        match self.source.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(source) => ScheduleSource::parse(source),
            None => config.source(),
        }
    }

    pub fn view_selector(&self, config: &Config) -> ViewSelector {
        ViewSelector::new(self.breakpoint.unwrap_or(config.breakpoint))
    }
}
