//! Output sinks for rendered samples.

use std::path::Path;

use image::{Rgba, RgbaImage};
use lumen_math::UVec2;

use crate::{color_to_rgba, Color, RenderError, RenderResult, Sample};

/// Write-only destination for shaded samples.
pub trait Film {
    /// Record `color` for the pixel the sample belongs to.
    fn add_sample(&mut self, sample: &Sample, color: Color);
}

/// In-memory film that averages every sample landing in a pixel.
///
/// Pixels with no samples resolve to black. Samples outside the film are
/// dropped.
#[derive(Debug, Clone)]
pub struct ImageFilm {
    width: u32,
    height: u32,
    sums: Vec<Color>,
    weights: Vec<f32>,
}

impl ImageFilm {
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidConfig(format!(
                "film resolution must be non-zero, got {}x{}",
                width, height
            )));
        }
        let len = (width as usize) * (height as usize);
        Ok(Self {
            width,
            height,
            sums: vec![Color::ZERO; len],
            weights: vec![0.0; len],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn resolution(&self) -> UVec2 {
        UVec2::new(self.width, self.height)
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| (y * self.width + x) as usize)
    }

    /// Averaged color at `(x, y)`, or `None` outside the film.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.index(x, y).map(|i| self.resolve(i))
    }

    fn resolve(&self, index: usize) -> Color {
        let weight = self.weights[index];
        if weight > 0.0 {
            self.sums[index] / weight
        } else {
            Color::ZERO
        }
    }

    /// All pixels in row-major order, linear RGB.
    pub fn pixels(&self) -> Vec<Color> {
        (0..self.sums.len()).map(|i| self.resolve(i)).collect()
    }

    /// Linear RGB as packed `f32` triples.
    pub fn to_rgb32f(&self) -> Vec<f32> {
        bytemuck::cast_slice(&self.pixels()).to_vec()
    }

    /// Gamma-corrected RGBA bytes (for display or saving).
    pub fn to_rgba(&self) -> Vec<u8> {
        self.pixels().into_iter().flat_map(color_to_rgba).collect()
    }

    pub fn to_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            let color = self.pixel(x, y).unwrap_or(Color::ZERO);
            Rgba(color_to_rgba(color))
        })
    }

    /// Write the film to disk; the format follows the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> RenderResult<()> {
        let path = path.as_ref();
        self.to_image().save(path)?;
        log::info!("Saved {}x{} image to {}", self.width, self.height, path.display());
        Ok(())
    }

    /// Discard all accumulated samples.
    pub fn clear(&mut self) {
        self.sums.fill(Color::ZERO);
        self.weights.fill(0.0);
    }
}

impl Film for ImageFilm {
    fn add_sample(&mut self, sample: &Sample, color: Color) {
        let Some(index) = self.index(sample.image_x, sample.image_y) else {
            log::trace!(
                "dropping sample outside film at ({}, {})",
                sample.image_x,
                sample.image_y
            );
            return;
        };
        self.sums[index] += color;
        self.weights[index] += 1.0;
    }
}
