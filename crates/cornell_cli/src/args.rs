use std::path::PathBuf;

use anyhow::{Context, Result};
use cornell_core::{load_options, MirrorWall, RenderOptions, SecondLight};

/// Cornell box renderer command line arguments.
///
/// Flags override values read from `--config`; anything left unset falls
/// back to the config file, then to the built-in defaults.
#[derive(clap::Parser, Debug)]
#[clap(
    name = "cornell",
    author,
    version,
    about = "Render a Cornell box with a CPU Whitted-style ray tracer."
)]
pub struct CliArgs {
    /// Image width in pixels.
    #[clap(long, help = "Image width in pixels [default: 640]")]
    pub width: Option<u32>,

    /// Image height in pixels.
    #[clap(long, help = "Image height in pixels [default: 480]")]
    pub height: Option<u32>,

    /// Samples per pixel.
    #[clap(
        short,
        long,
        help = "Samples per pixel; 1 samples pixel centers only [default: 4]"
    )]
    pub samples: Option<u32>,

    /// Maximum recursion depth.
    #[clap(short, long, help = "Maximum mirror/refraction depth [default: 5]")]
    pub depth: Option<u32>,

    #[clap(long, help = "Make the left sphere a mirror")]
    pub mirror_spheres: bool,

    #[clap(long, help = "Make the left box a mirror")]
    pub mirror_cubes: bool,

    #[clap(long, help = "Make the right sphere glass")]
    pub transparent_spheres: bool,

    #[clap(long, help = "Make the right box glass")]
    pub transparent_cubes: bool,

    /// Wall replaced by a mirror.
    #[clap(
        long,
        help = "Replace a wall with a mirror\n  [none, left, right, floor, ceiling, back, front]"
    )]
    pub mirror_wall: Option<MirrorWall>,

    /// Placement of the second light.
    #[clap(
        long,
        help = "Add a warm second light\n  [none, right, left, floor, back, front]"
    )]
    pub second_light: Option<SecondLight>,

    /// JSON options file.
    #[clap(short, long, help = "Path to a JSON render options file")]
    pub config: Option<PathBuf>,

    /// Output image path.
    #[clap(
        short,
        long,
        default_value = "cornell.png",
        help = "Output image; format follows the extension"
    )]
    pub output: PathBuf,
}

impl CliArgs {
    /// Resolve the final render options.
    pub fn render_options(&self) -> Result<RenderOptions> {
        let base = match &self.config {
            Some(path) => load_options(path)
                .with_context(|| format!("Failed to load options from {}", path.display()))?,
            None => RenderOptions::default(),
        };
        Ok(self.apply(base))
    }

    fn apply(&self, mut options: RenderOptions) -> RenderOptions {
        if let Some(width) = self.width {
            options.width = width;
        }
        if let Some(height) = self.height {
            options.height = height;
        }
        if let Some(samples) = self.samples {
            options.samples_per_pixel = samples;
        }
        if let Some(depth) = self.depth {
            options.max_depth = depth;
        }
        options.mirror_spheres |= self.mirror_spheres;
        options.mirror_cubes |= self.mirror_cubes;
        options.transparent_spheres |= self.transparent_spheres;
        options.transparent_cubes |= self.transparent_cubes;
        if let Some(wall) = self.mirror_wall {
            options.mirror_wall = wall;
        }
        if let Some(light) = self.second_light {
            options.second_light = light;
        }
        options
    }
}
