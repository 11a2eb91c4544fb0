//! Scene: the primitive aggregate plus its lights, and the render loop.

use std::time::{Duration, Instant};

use lumen_math::{Aabb, Ray};

use crate::{Camera, Film, Integrator, Intersection, Light, Primitive, RenderResult, Sampler};

/// Summary of a finished render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStats {
    /// Samples shaded and written to the film
    pub samples: u64,
    pub elapsed: Duration,
}

impl RenderStats {
    pub fn samples_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.samples as f64 / secs
        } else {
            0.0
        }
    }
}

/// Everything a ray can hit or be lit by. Immutable while rendering.
#[derive(Debug, Clone)]
pub struct Scene {
    aggregate: Primitive,
    lights: Vec<Light>,
}

impl Scene {
    pub fn new(aggregate: Primitive, lights: Vec<Light>) -> Self {
        log::debug!(
            "Scene with {} primitives and {} lights",
            aggregate.len(),
            lights.len()
        );
        Self { aggregate, lights }
    }

    pub fn aggregate(&self) -> &Primitive {
        &self.aggregate
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn world_bound(&self) -> Aabb {
        self.aggregate.world_bound()
    }

    /// Nearest hit along `ray`; narrows `ray.max_t` on success.
    pub fn intersect(&self, ray: &mut Ray) -> Option<Intersection<'_>> {
        self.aggregate.intersect(ray)
    }

    /// True if anything lies inside the ray's interval.
    pub fn intersects(&self, ray: &Ray) -> bool {
        self.aggregate.intersects(ray)
    }

    /// Shade every sample of `sampler` and write it to `film`, one at a time.
    ///
    /// Stops at the first error, leaving the film partially written.
    pub fn render<I, F>(
        &self,
        camera: &Camera,
        sampler: &Sampler,
        integrator: &I,
        film: &mut F,
    ) -> RenderResult<RenderStats>
    where
        I: Integrator + ?Sized,
        F: Film + ?Sized,
    {
        let (start, end) = sampler.bounds();
        log::info!(
            "Rendering pixels {:?}..{:?} at {} samples per pixel",
            start,
            end,
            sampler.samples_per_pixel()
        );

        let started = Instant::now();
        integrator.preprocess(self);

        let mut samples = 0u64;
        for sample in sampler.samples() {
            let ray = camera.generate_ray(&sample);
            let color = integrator.li(self, &ray, &sample)?;
            film.add_sample(&sample, color);
            samples += 1;
        }

        let stats = RenderStats {
            samples,
            elapsed: started.elapsed(),
        };
        log::info!(
            "Rendered {} samples in {:.2?} ({:.0} samples/s)",
            stats.samples,
            stats.elapsed,
            stats.samples_per_second()
        );
        Ok(stats)
    }
}
