use crate::{Interval, Point3, Vec3};

/// A ray segment: origin, direction, a valid parameter interval and a time.
///
/// A hit at parameter `t` only counts when `min_t <= t <= max_t`. The
/// default `min_t` of [`Ray::EPSILON`] keeps secondary rays from hitting the
/// surface they start on.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Point3,
    pub direction: Vec3,
    pub min_t: f32,
    pub max_t: f32,
    pub time: f32,
    /// Offset rays for the neighbouring pixels, if the camera produced them.
    pub differential: Option<RayDifferential>,
}

/// Rays through the pixels one step to the right (`x`) and one step down (`y`)
/// of the main ray. Used to estimate the ray footprint on a surface.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RayDifferential {
    pub rx_origin: Point3,
    pub rx_direction: Vec3,
    pub ry_origin: Point3,
    pub ry_direction: Vec3,
}

impl Ray {
    /// Self-intersection offset for ray intervals.
    pub const EPSILON: f32 = 1e-3;

    /// Create a ray valid over `[EPSILON, +inf)` at time 0.
    pub fn new(origin: Point3, direction: Vec3) -> Self {
        Self::segment(origin, direction, Self::EPSILON, f32::INFINITY)
    }

    /// Create a ray valid over `[min_t, max_t]`.
    ///
    /// An inverted interval is collapsed to `[min_t, min_t]`.
    pub fn segment(origin: Point3, direction: Vec3, min_t: f32, max_t: f32) -> Self {
        Self {
            origin,
            direction,
            min_t,
            max_t: max_t.max(min_t),
            time: 0.0,
            differential: None,
        }
    }

    /// Set the time value (used for motion blur).
    pub fn with_time(mut self, time: f32) -> Self {
        self.time = time;
        self
    }

    pub fn with_differential(mut self, differential: RayDifferential) -> Self {
        self.differential = Some(differential);
        self
    }

    /// The valid parameter range as an interval.
    #[inline]
    pub fn interval(&self) -> Interval {
        Interval::new(self.min_t, self.max_t)
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Point3 {
        self.origin + self.direction * t
    }
}
