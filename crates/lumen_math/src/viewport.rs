//! Pixel-space ↔ world-space mapping through a view-projection matrix.

use glam::{Mat4, Vec3};

use crate::Point3;

/// A rectangle of pixels plus the depth range clip-space z maps onto.
///
/// Pixel y grows downwards, so the top row of pixels maps to clip-space +1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub min_depth: f32,
    pub max_depth: f32,
}

impl Viewport {
    /// A viewport covering `width × height` pixels from the origin, depth [0, 1].
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: width as f32,
            height: height as f32,
            min_depth: 0.0,
            max_depth: 1.0,
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width / self.height
    }

    /// Map a world-space point to `(pixel_x, pixel_y, depth)`.
    pub fn project(&self, point: Point3, view_projection: &Mat4) -> Vec3 {
        let ndc = view_projection.project_point3(point.to_vec3());
        Vec3::new(
            self.x + (ndc.x + 1.0) * 0.5 * self.width,
            self.y + (1.0 - ndc.y) * 0.5 * self.height,
            self.min_depth + ndc.z * (self.max_depth - self.min_depth),
        )
    }

    /// Map `(pixel_x, pixel_y, depth)` back to world space.
    ///
    /// `inverse_view_projection` is the inverse of the matrix used for
    /// [`Viewport::project`]; callers cache it.
    pub fn unproject(&self, source: Vec3, inverse_view_projection: &Mat4) -> Point3 {
        let ndc = Vec3::new(
            (source.x - self.x) / self.width * 2.0 - 1.0,
            1.0 - (source.y - self.y) / self.height * 2.0,
            (source.z - self.min_depth) / (self.max_depth - self.min_depth),
        );
        Point3(inverse_view_projection.project_point3(ndc))
    }
}
