//! Cornell Core - render options for the Cornell box renderer.
//!
//! This crate provides:
//!
//! - **Render options**: `RenderOptions`, the caller-owned configuration the
//!   renderer reads (resolution, sampling, recursion budget, scene variants)
//! - **Scene variants**: `MirrorWall` and `SecondLight`
//! - **Loading**: JSON option files via serde
//!
//! # Example
//!
//! ```ignore
//! use cornell_core::{load_options, MirrorWall};
//!
//! let mut options = load_options("render.json")?;
//! options.mirror_wall = MirrorWall::Back;
//! ```

pub mod options;

// Re-export commonly used types
pub use options::{
    load_options, options_from_str, MirrorWall, OptionsError, OptionsResult, RenderOptions,
    SecondLight,
};
