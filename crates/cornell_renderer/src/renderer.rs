//! Parallel image synthesis.
//!
//! Rows are independent work units traced on rayon's global pool. Each worker
//! owns its random generator and writes only its own slice of the RGB buffer.

use std::path::Path;
use std::time::Instant;

use cornell_core::RenderOptions;
use cornell_math::{to_rgb8, Color};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use rayon::prelude::*;
use thiserror::Error;

use crate::tracer::{trace_ray, AMBIENT_IOR};
use crate::{CancellationToken, Scene};

/// Errors produced while rendering or writing an image.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("render cancelled")]
    Cancelled,

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type RenderResult<T> = Result<T, RenderError>;

/// Render configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Samples per pixel; 1 samples the pixel center without jitter
    pub samples_per_pixel: u32,
    /// Maximum recursion depth for mirror and refraction rays
    pub max_depth: u32,
}

impl RenderConfig {
    /// Samples per pixel, at least 1.
    pub fn effective_samples(&self) -> u32 {
        self.samples_per_pixel.max(1)
    }

    /// Recursion depth, at least 1.
    pub fn effective_depth(&self) -> u32 {
        self.max_depth.max(1)
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::from(&RenderOptions::default())
    }
}

impl From<&RenderOptions> for RenderConfig {
    fn from(options: &RenderOptions) -> Self {
        Self {
            width: options.width,
            height: options.height,
            samples_per_pixel: options.samples_per_pixel,
            max_depth: options.max_depth,
        }
    }
}

/// A finished, gamma-encoded RGB8 image in row-major order. Row 0 is the top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Image {
    /// Create a black image.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 3],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGB bytes of the pixel at `(x, y)`.
    ///
    /// Panics if the coordinates are outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let i = (y as usize * self.width as usize + x as usize) * 3;
        [self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]]
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.pixels
    }

    /// Copy into an `image::RgbImage` for encoding.
    pub fn to_rgb_image(&self) -> image::RgbImage {
        image::RgbImage::from_fn(self.width, self.height, |x, y| image::Rgb(self.pixel(x, y)))
    }

    /// Write the image; the format is inferred from the file extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> RenderResult<()> {
        self.to_rgb_image().save(path.as_ref())?;
        log::info!("Saved {}x{} image to {}", self.width, self.height, path.as_ref().display());
        Ok(())
    }
}

/// Render the Cornell box described by `options`.
pub fn render(options: &RenderOptions, cancel: &CancellationToken) -> RenderResult<Image> {
    if options.samples_per_pixel == 0 {
        log::warn!("samples_per_pixel is 0, using 1");
    }
    if options.max_depth == 0 {
        log::warn!("max_depth is 0, using 1");
    }

    let scene = Scene::cornell_box(options);
    render_with(&scene, &RenderConfig::from(options), cancel)
}

/// Render an assembled scene.
///
/// Returns `RenderError::Cancelled` if `cancel` is set before or during the
/// render; the partial buffer is discarded.
pub fn render_with(
    scene: &Scene,
    config: &RenderConfig,
    cancel: &CancellationToken,
) -> RenderResult<Image> {
    if cancel.is_cancelled() {
        log::warn!("Render cancelled before start");
        return Err(RenderError::Cancelled);
    }

    let mut image = Image::new(config.width, config.height);
    if config.width == 0 || config.height == 0 {
        return Ok(image);
    }

    log::info!(
        "Rendering {}x{} @ {} spp, depth {}",
        config.width,
        config.height,
        config.effective_samples(),
        config.effective_depth()
    );
    let start = Instant::now();

    let row_len = config.width as usize * 3;
    let result = image
        .pixels
        .par_chunks_mut(row_len)
        .enumerate()
        .try_for_each_init(StdRng::from_entropy, |rng, (y, row)| {
            if cancel.is_cancelled() {
                return Err(RenderError::Cancelled);
            }
            for (x, rgb) in row.chunks_exact_mut(3).enumerate() {
                let color = render_pixel(scene, x as u32, y as u32, config, rng);
                rgb.copy_from_slice(&to_rgb8(color));
            }
            Ok(())
        });

    // A cancel that lands after the last row started still invalidates the image
    if result.is_err() || cancel.is_cancelled() {
        log::warn!("Render cancelled after {:.2?}", start.elapsed());
        return Err(RenderError::Cancelled);
    }

    log::info!("Render finished in {:.2?}", start.elapsed());
    Ok(image)
}

/// Average linear color of pixel `(x, y)`.
///
/// With one sample the ray passes through the pixel center; otherwise each
/// sample is jittered uniformly inside the pixel using `rng`.
pub fn render_pixel(
    scene: &Scene,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let samples = config.effective_samples();
    let depth = config.effective_depth();
    let width = config.width.max(1) as f64;
    let height = config.height.max(1) as f64;

    let mut pixel_color = Color::ZERO;
    for _ in 0..samples {
        let (jx, jy) = if samples == 1 {
            (0.5, 0.5)
        } else {
            (rng.gen::<f64>(), rng.gen::<f64>())
        };
        let s = (x as f64 + jx) / width;
        let t = 1.0 - (y as f64 + jy) / height;

        let ray = scene.camera.get_ray(s, t);
        pixel_color += trace_ray(&ray, &scene.world, &scene.lights, depth, AMBIENT_IOR);
    }

    pixel_color / samples as f64
}
