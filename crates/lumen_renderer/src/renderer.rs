//! Render configuration and the one-call render entry point.

use serde::{Deserialize, Serialize};

use crate::{
    Camera, Color, ImageFilm, RenderError, RenderResult, RenderStats, Sampler, Scene,
    StratifiedSampler, WhittedIntegrator,
};
use lumen_math::UVec2;

/// Render configuration.
///
/// Missing fields take their defaults when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Maximum ray depth for the integrator
    pub max_depth: u32,
    /// Color returned for rays that hit nothing
    pub background: Color,
    /// Strata per pixel `(nx, ny)`; `None` renders one regular sample per pixel
    pub pixel_samples: Option<(u32, u32)>,
    /// Jitter stratified samples within their cell
    pub jitter: bool,
    /// Seed for sample jitter
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_depth: 5,
            background: Color::ZERO,
            pixel_samples: None,
            jitter: true,
            seed: 0,
        }
    }
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the maximum ray depth
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Builder: set the background color
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Builder: render `nx × ny` stratified samples per pixel
    pub fn with_pixel_samples(mut self, nx: u32, ny: u32) -> Self {
        self.pixel_samples = Some((nx, ny));
        self
    }

    /// Builder: enable or disable jitter
    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    /// Builder: set the jitter seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Reject settings no sampler can honor.
    pub fn validate(&self) -> RenderResult<()> {
        if let Some((nx, ny)) = self.pixel_samples {
            if nx == 0 || ny == 0 {
                return Err(RenderError::InvalidConfig(format!(
                    "pixel_samples must be at least 1x1, got {}x{}",
                    nx, ny
                )));
            }
        }
        if !self.background.is_finite() {
            return Err(RenderError::InvalidConfig(
                "background color must be finite".to_string(),
            ));
        }
        Ok(())
    }

    /// Sampler covering a `width × height` image.
    pub fn sampler(&self, width: u32, height: u32) -> RenderResult<Sampler> {
        self.validate()?;
        let end = UVec2::new(width, height);
        Ok(match self.pixel_samples {
            None => Sampler::regular(width, height),
            Some((nx, ny)) => Sampler::Stratified(
                StratifiedSampler::new(UVec2::ZERO, end, nx, ny)?
                    .with_jitter(self.jitter)
                    .with_seed(self.seed),
            ),
        })
    }

    pub fn integrator(&self) -> WhittedIntegrator {
        WhittedIntegrator::new(self.max_depth).with_background(self.background)
    }
}

/// Render the whole film with the configured sampler and integrator.
pub fn render(
    scene: &Scene,
    camera: &Camera,
    config: &RenderConfig,
    film: &mut ImageFilm,
) -> RenderResult<RenderStats> {
    let sampler = config.sampler(film.width(), film.height())?;
    let integrator = config.integrator();
    log::debug!("Render config: {:?}", config);
    scene.render(camera, &sampler, &integrator, film)
}
