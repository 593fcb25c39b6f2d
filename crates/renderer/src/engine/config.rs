// SPDX-License-Identifier: MIT

//!
//! Scene configuration
//!

use crate::{
    DEFAULT_CIRCLE_RADIUS, DEFAULT_FONT_SIZE_PX, PULSE_FRAME_MODULUS, PULSE_FRAMES_PER_PX,
    PULSE_MIN_THICKNESS, PULSE_RANGE, Point, SceneColours, Size,
};
use algoscene_core::Layer;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can arise when loading a [`SceneConfig`]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("JSON error: {0}")]
    Json(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(error: std::io::Error) -> Self {
        ConfigError::Io(error.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(error: serde_json::Error) -> Self {
        ConfigError::Json(error.to_string())
    }
}

/// Parameters of the pulsing highlight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PulseParams {
    /// The frame index wraps at this value
    pub modulus: u64,

    /// The thinnest the highlight gets
    pub min_thickness: f64,

    /// The highlight grows to `min_thickness + range - 1`
    pub range: f64,

    /// Frames spent per pixel of growth
    pub frames_per_px: f64,
}

impl Default for PulseParams {
    fn default() -> Self {
        Self {
            modulus: PULSE_FRAME_MODULUS,
            min_thickness: PULSE_MIN_THICKNESS,
            range: PULSE_RANGE,
            frames_per_px: PULSE_FRAMES_PER_PX,
        }
    }
}

/// The persistent status label drawn bottom-left of the surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusLabelConfig {
    /// Initial text
    pub text: String,

    /// Offset of the label's top left from the surface's bottom left corner
    /// (y counts upwards)
    pub offset: Point,

    pub font_size_px: f64,
}

impl Default for StatusLabelConfig {
    fn default() -> Self {
        Self {
            text: String::new(),
            offset: Point::new(5.0, 15.0),
            font_size_px: DEFAULT_FONT_SIZE_PX,
        }
    }
}

/// Everything about a scene that isn't set by commands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// The size of the drawing surface (used by surfaces that don't know
    /// their own size, e.g. when recording)
    pub surface_size: Size,

    /// Font size (px) for object text
    pub font_size_px: f64,

    /// The radius of circles and highlight circles created without one
    pub circle_radius: f64,

    /// The layers active when the engine is created
    pub active_layers: Vec<Layer>,

    pub pulse: PulseParams,

    pub status: StatusLabelConfig,

    pub colours: SceneColours,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            surface_size: Size::new(1000.0, 500.0),
            font_size_px: DEFAULT_FONT_SIZE_PX,
            circle_radius: DEFAULT_CIRCLE_RADIUS,
            active_layers: vec![0],
            pulse: PulseParams::default(),
            status: StatusLabelConfig::default(),
            colours: SceneColours::default(),
        }
    }
}

impl SceneConfig {
    /// Parse a config from JSON.  Missing fields take their default values
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a config from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        info!("Loading config from {}", path.as_ref().display());
        let data = fs::read_to_string(path)?;
        let config = Self::from_json(&data)?;
        info!("Config loaded = {config:?}");
        Ok(config)
    }
}
