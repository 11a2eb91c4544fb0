//! Pixel samplers.
//!
//! A sampler covers the half-open pixel rectangle `[start, end)` in row-major
//! order, x fastest. [`Sampler::samples`] hands out a fresh iterator each
//! time, so the same sampler replays the same sequence.

use lumen_math::{UVec2, Vec2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{RenderError, RenderResult};

/// One position on the image plane to shade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub image_x: u32,
    pub image_y: u32,
    /// Sub-pixel offset in `[0, 1)²`. Zero for regular samples.
    pub offset: Vec2,
    /// Shutter time in `[0, 1)`.
    pub time: f32,
}

impl Sample {
    pub fn new(image_x: u32, image_y: u32) -> Self {
        Self {
            image_x,
            image_y,
            offset: Vec2::ZERO,
            time: 0.0,
        }
    }

    /// Continuous image-plane position, in pixels.
    #[inline]
    pub fn film_position(&self) -> Vec2 {
        Vec2::new(self.image_x as f32, self.image_y as f32) + self.offset
    }
}

/// One sample per pixel at integer pixel coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct RegularSampler {
    start: UVec2,
    end: UVec2,
}

impl RegularSampler {
    pub fn new(start: UVec2, end: UVec2) -> Self {
        Self { start, end }
    }
}

/// `nx × ny` samples per pixel, one per sub-cell, optionally jittered.
///
/// Jitter comes from a `StdRng` seeded from `seed`, reseeded each time the
/// sequence restarts.
#[derive(Debug, Clone, PartialEq)]
pub struct StratifiedSampler {
    start: UVec2,
    end: UVec2,
    nx: u32,
    ny: u32,
    jitter: bool,
    seed: u64,
}

impl StratifiedSampler {
    pub fn new(start: UVec2, end: UVec2, nx: u32, ny: u32) -> RenderResult<Self> {
        if nx == 0 || ny == 0 {
            return Err(RenderError::InvalidConfig(format!(
                "stratified sampler needs at least one stratum per axis, got {}x{}",
                nx, ny
            )));
        }
        Ok(Self {
            start,
            end,
            nx,
            ny,
            jitter: true,
            seed: 0,
        })
    }

    /// Builder: enable or disable jitter within each stratum
    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    /// Builder: set the jitter seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    fn stratum_sample(&self, pixel: UVec2, stratum: u32, rng: &mut StdRng) -> Sample {
        let (sx, sy) = (stratum % self.nx, stratum / self.nx);
        let (jx, jy, jt) = if self.jitter {
            (rng.gen::<f32>(), rng.gen::<f32>(), rng.gen::<f32>())
        } else {
            (0.5, 0.5, 0.5)
        };
        let per_pixel = (self.nx * self.ny) as f32;

        Sample {
            image_x: pixel.x,
            image_y: pixel.y,
            offset: Vec2::new(
                (sx as f32 + jx) / self.nx as f32,
                (sy as f32 + jy) / self.ny as f32,
            ),
            time: (stratum as f32 + jt) / per_pixel,
        }
    }
}

/// The closed set of samplers.
#[derive(Debug, Clone, PartialEq)]
pub enum Sampler {
    Regular(RegularSampler),
    Stratified(StratifiedSampler),
}

impl Sampler {
    /// Regular sampler over a whole `width × height` image.
    pub fn regular(width: u32, height: u32) -> Self {
        Sampler::Regular(RegularSampler::new(UVec2::ZERO, UVec2::new(width, height)))
    }

    /// Jittered stratified sampler over a whole `width × height` image.
    pub fn stratified(width: u32, height: u32, nx: u32, ny: u32) -> RenderResult<Self> {
        Ok(Sampler::Stratified(StratifiedSampler::new(
            UVec2::ZERO,
            UVec2::new(width, height),
            nx,
            ny,
        )?))
    }

    /// The pixel rectangle `[start, end)`.
    pub fn bounds(&self) -> (UVec2, UVec2) {
        match self {
            Sampler::Regular(s) => (s.start, s.end),
            Sampler::Stratified(s) => (s.start, s.end),
        }
    }

    pub fn samples_per_pixel(&self) -> u32 {
        match self {
            Sampler::Regular(_) => 1,
            Sampler::Stratified(s) => s.nx * s.ny,
        }
    }

    /// Total number of samples the sequence yields.
    pub fn sample_count(&self) -> u64 {
        let (start, end) = self.bounds();
        let size = end.saturating_sub(start);
        size.x as u64 * size.y as u64 * self.samples_per_pixel() as u64
    }

    /// Start the sample sequence from the beginning.
    pub fn samples(&self) -> Samples<'_> {
        let (start, end) = self.bounds();
        let seed = match self {
            Sampler::Regular(_) => 0,
            Sampler::Stratified(s) => s.seed,
        };
        Samples {
            sampler: self,
            pixel: start,
            stratum: 0,
            rng: StdRng::seed_from_u64(seed),
            done: start.x >= end.x || start.y >= end.y,
        }
    }
}

/// Iterator over a sampler's sequence. See [`Sampler::samples`].
#[derive(Debug)]
pub struct Samples<'a> {
    sampler: &'a Sampler,
    pixel: UVec2,
    stratum: u32,
    rng: StdRng,
    done: bool,
}

impl Samples<'_> {
    fn advance(&mut self) {
        let (start, end) = self.sampler.bounds();
        self.stratum += 1;
        if self.stratum < self.sampler.samples_per_pixel() {
            return;
        }
        self.stratum = 0;
        self.pixel.x += 1;
        if self.pixel.x < end.x {
            return;
        }
        self.pixel.x = start.x;
        self.pixel.y += 1;
        self.done = self.pixel.y >= end.y;
    }
}

impl Iterator for Samples<'_> {
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> {
        if self.done {
            return None;
        }
        let sample = match self.sampler {
            Sampler::Regular(_) => Sample::new(self.pixel.x, self.pixel.y),
            Sampler::Stratified(s) => s.stratum_sample(self.pixel, self.stratum, &mut self.rng),
        };
        self.advance();
        Some(sample)
    }
}
