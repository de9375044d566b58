//! Render options consumed by the renderer.
//!
//! Options are plain data owned by the caller. They can be built in code,
//! deserialized from JSON (missing fields fall back to defaults), or parsed
//! piecewise from strings on the command line.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading or parsing options.
#[derive(Error, Debug)]
pub enum OptionsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown mirror wall '{0}' (expected none, left, right, floor, ceiling, back or front)")]
    UnknownMirrorWall(String),

    #[error("Unknown second light placement '{0}' (expected none, right, left, floor, back or front)")]
    UnknownLight(String),
}

/// Result type for option loading.
pub type OptionsResult<T> = Result<T, OptionsError>;

/// Which room wall, if any, is replaced with a mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MirrorWall {
    #[default]
    None,
    Left,
    Right,
    Floor,
    Ceiling,
    Back,
    Front,
}

impl MirrorWall {
    pub const ALL: [MirrorWall; 7] = [
        MirrorWall::None,
        MirrorWall::Left,
        MirrorWall::Right,
        MirrorWall::Floor,
        MirrorWall::Ceiling,
        MirrorWall::Back,
        MirrorWall::Front,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MirrorWall::None => "none",
            MirrorWall::Left => "left",
            MirrorWall::Right => "right",
            MirrorWall::Floor => "floor",
            MirrorWall::Ceiling => "ceiling",
            MirrorWall::Back => "back",
            MirrorWall::Front => "front",
        }
    }
}

impl fmt::Display for MirrorWall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MirrorWall {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        MirrorWall::ALL
            .into_iter()
            .find(|wall| wall.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| OptionsError::UnknownMirrorWall(s.to_string()))
    }
}

/// Placement of the optional second point light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecondLight {
    #[default]
    None,
    Right,
    Left,
    Floor,
    Back,
    Front,
}

impl SecondLight {
    pub const ALL: [SecondLight; 6] = [
        SecondLight::None,
        SecondLight::Right,
        SecondLight::Left,
        SecondLight::Floor,
        SecondLight::Back,
        SecondLight::Front,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SecondLight::None => "none",
            SecondLight::Right => "right",
            SecondLight::Left => "left",
            SecondLight::Floor => "floor",
            SecondLight::Back => "back",
            SecondLight::Front => "front",
        }
    }
}

impl fmt::Display for SecondLight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SecondLight {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        SecondLight::ALL
            .into_iter()
            .find(|light| light.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| OptionsError::UnknownLight(s.to_string()))
    }
}

/// Everything the renderer needs to know about a single render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Output width in pixels
    pub width: u32,

    /// Output height in pixels
    pub height: u32,

    /// Anti-aliasing samples per pixel (values below 1 are treated as 1)
    pub samples_per_pixel: u32,

    /// Recursion budget for reflected and refracted rays (values below 1 are treated as 1)
    pub max_depth: u32,

    /// Give the left sphere a mirror material
    pub mirror_spheres: bool,

    /// Give the left cube a mirror material
    pub mirror_cubes: bool,

    /// Give the right sphere a dielectric material
    pub transparent_spheres: bool,

    /// Give the right cube a dielectric material
    pub transparent_cubes: bool,

    /// Room wall replaced with a mirror
    pub mirror_wall: MirrorWall,

    /// Placement of the optional warm-white second light
    pub second_light: SecondLight,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            samples_per_pixel: 4,
            max_depth: 5,
            mirror_spheres: false,
            mirror_cubes: false,
            transparent_spheres: false,
            transparent_cubes: false,
            mirror_wall: MirrorWall::None,
            second_light: SecondLight::None,
        }
    }
}

impl RenderOptions {
    /// Create options for the plain scene at the given resolution.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples_per_pixel: u32, max_depth: u32) -> Self {
        self.samples_per_pixel = samples_per_pixel;
        self.max_depth = max_depth;
        self
    }

    /// Width over height. A zero height is treated as one row.
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height.max(1) as f64
    }
}

/// Parse options from a JSON string. Missing fields take their defaults.
pub fn options_from_str(json: &str) -> OptionsResult<RenderOptions> {
    Ok(serde_json::from_str(json)?)
}

/// Load options from a JSON file.
pub fn load_options<P: AsRef<Path>>(path: P) -> OptionsResult<RenderOptions> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)?;
    let options = options_from_str(&contents)?;
    log::info!("Loaded render options from {}", path.display());
    Ok(options)
}
