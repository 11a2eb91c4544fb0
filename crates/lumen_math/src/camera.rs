use glam::{Mat4, Vec3};

use crate::{MathError, MathResult, Point3};

/// How a camera maps view space onto the image plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Parallel projection; `width` is the view-space width of the image.
    Orthographic { width: f32 },
    /// Pinhole projection with a vertical field of view in radians.
    Perspective { fov_y: f32 },
}

/// Position and orientation of a camera plus its clipping planes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFrame {
    pub position: Point3,
    pub look_direction: Vec3,
    pub up: Vec3,
    pub near: f32,
    pub far: f32,
}

impl CameraFrame {
    pub fn new(position: Point3, look_direction: Vec3, up: Vec3, near: f32, far: f32) -> Self {
        Self {
            position,
            look_direction,
            up,
            near,
            far,
        }
    }

    /// Get the view matrix (world → camera space).
    ///
    /// Fails if the look direction is zero or parallel to `up`.
    pub fn view_matrix(&self) -> MathResult<Mat4> {
        let look = self
            .look_direction
            .try_normalize()
            .ok_or(MathError::DegenerateBasis("look direction has zero length"))?;
        let up = self
            .up
            .try_normalize()
            .ok_or(MathError::DegenerateBasis("up direction has zero length"))?;
        if look.cross(up).length_squared() < 1e-10 {
            return Err(MathError::DegenerateBasis(
                "look direction is parallel to up direction",
            ));
        }

        Ok(Mat4::look_to_rh(self.position.to_vec3(), look, up))
    }

    /// Get the projection matrix (camera → clip space, depth in [0, 1]).
    pub fn projection_matrix(&self, projection: Projection, aspect: f32) -> MathResult<Mat4> {
        if !(self.near > 0.0 && self.far > self.near && self.far.is_finite()) {
            return Err(MathError::DegenerateBasis(
                "clip planes must satisfy 0 < near < far",
            ));
        }
        if !(aspect > 0.0 && aspect.is_finite()) {
            return Err(MathError::DegenerateBasis("aspect ratio must be positive"));
        }

        match projection {
            Projection::Orthographic { width } => {
                if !(width > 0.0 && width.is_finite()) {
                    return Err(MathError::DegenerateBasis("orthographic width must be positive"));
                }
                let half_w = width / 2.0;
                let half_h = half_w / aspect;
                Ok(Mat4::orthographic_rh(
                    -half_w, half_w, -half_h, half_h, self.near, self.far,
                ))
            }
            Projection::Perspective { fov_y } => {
                if !(fov_y > 0.0 && fov_y < std::f32::consts::PI) {
                    return Err(MathError::DegenerateBasis(
                        "field of view must lie in (0, pi)",
                    ));
                }
                Ok(Mat4::perspective_rh(fov_y, aspect, self.near, self.far))
            }
        }
    }
}
