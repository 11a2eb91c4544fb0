//! Cameras: map image-plane samples to world-space rays.
//!
//! Both camera kinds are projection cameras. The view and projection
//! matrices are built once at construction; ray generation unprojects the
//! sample position at the near and far depths of the viewport.

use lumen_math::{
    CameraFrame, Mat4, Point3, Projection, Ray, RayDifferential, UVec2, Vec2, Vec3, Viewport,
};

use crate::{RenderResult, Sample};

/// Camera defined by a view matrix and a projection matrix.
#[derive(Debug, Clone)]
pub struct ProjectionCamera {
    frame: CameraFrame,
    projection: Projection,
    viewport: Viewport,
    view: Mat4,
    projection_matrix: Mat4,
    inverse_view_projection: Mat4,
}

impl ProjectionCamera {
    /// Build the camera for an image of `resolution` pixels.
    ///
    /// Fails on a degenerate frame (zero or parallel look/up, bad clip
    /// planes) or an empty resolution.
    pub fn new(frame: CameraFrame, projection: Projection, resolution: UVec2) -> RenderResult<Self> {
        let viewport = Viewport::new(resolution.x, resolution.y);
        let view = frame.view_matrix()?;
        let projection_matrix = frame.projection_matrix(projection, viewport.aspect_ratio())?;
        let inverse_view_projection = (projection_matrix * view).inverse();

        log::debug!(
            "Camera at {:?} looking {:?}, {:?}, {}x{}",
            frame.position,
            frame.look_direction,
            projection,
            resolution.x,
            resolution.y
        );

        Ok(Self {
            frame,
            projection,
            viewport,
            view,
            projection_matrix,
            inverse_view_projection,
        })
    }

    pub fn frame(&self) -> &CameraFrame {
        &self.frame
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn view_matrix(&self) -> &Mat4 {
        &self.view
    }

    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    /// Near-plane origin and unit direction through an image-plane position.
    fn cast(&self, position: Vec2) -> (Point3, Vec3) {
        let near = self.viewport.unproject(
            position.extend(self.viewport.min_depth),
            &self.inverse_view_projection,
        );
        let far = self.viewport.unproject(
            position.extend(self.viewport.max_depth),
            &self.inverse_view_projection,
        );
        (near, (far - near).normalize_or_zero())
    }

    /// World-space ray through the sample, with differentials for the
    /// neighbouring pixels.
    pub fn generate_ray(&self, sample: &Sample) -> Ray {
        let position = sample.film_position();
        let (origin, direction) = self.cast(position);
        let (rx_origin, rx_direction) = self.cast(position + Vec2::X);
        let (ry_origin, ry_direction) = self.cast(position + Vec2::Y);

        Ray::new(origin, direction)
            .with_time(sample.time)
            .with_differential(RayDifferential {
                rx_origin,
                rx_direction,
                ry_origin,
                ry_direction,
            })
    }
}

/// The closed set of cameras.
#[derive(Debug, Clone)]
pub enum Camera {
    Orthographic(ProjectionCamera),
    Perspective(ProjectionCamera),
}

impl Camera {
    /// Parallel-projection camera; `width` is the world-space width of the image.
    pub fn orthographic(resolution: UVec2, frame: CameraFrame, width: f32) -> RenderResult<Self> {
        let projection = Projection::Orthographic { width };
        Ok(Camera::Orthographic(ProjectionCamera::new(frame, projection, resolution)?))
    }

    /// Pinhole camera with a vertical field of view in degrees.
    pub fn perspective(resolution: UVec2, frame: CameraFrame, fov_y_degrees: f32) -> RenderResult<Self> {
        let projection = Projection::Perspective {
            fov_y: fov_y_degrees.to_radians(),
        };
        Ok(Camera::Perspective(ProjectionCamera::new(frame, projection, resolution)?))
    }

    pub fn projection_camera(&self) -> &ProjectionCamera {
        match self {
            Camera::Orthographic(camera) | Camera::Perspective(camera) => camera,
        }
    }

    /// Map a sample to a world-space ray. The origin lies on the near plane.
    pub fn generate_ray(&self, sample: &Sample) -> Ray {
        self.projection_camera().generate_ray(sample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> CameraFrame {
        CameraFrame::new(Point3::new(0.0, 0.0, 25.0), -Vec3::Z, Vec3::Y, 1.0, 100.0)
    }

    fn distance_along_look(camera: &Camera, ray: &Ray) -> f32 {
        let frame = camera.projection_camera().frame();
        (ray.origin - frame.position).dot(frame.look_direction.normalize())
    }

    #[test]
    fn test_orthographic_centre_ray() {
        let camera = Camera::orthographic(UVec2::new(100, 100), frame(), 10.0).unwrap();
        let ray = camera.generate_ray(&Sample::new(50, 50));

        assert!(ray.origin.abs_diff_eq(Point3::new(0.0, 0.0, 24.0), 1e-3));
        assert!(ray.direction.abs_diff_eq(-Vec3::Z, 1e-5));
    }

    #[test]
    fn test_orthographic_top_left_pixel() {
        let camera = Camera::orthographic(UVec2::new(100, 100), frame(), 10.0).unwrap();
        let ray = camera.generate_ray(&Sample::new(0, 0));

        // Pixel y grows downwards, world y grows upwards
        assert!(ray.origin.abs_diff_eq(Point3::new(-5.0, 5.0, 24.0), 1e-3));
    }

    #[test]
    fn test_orthographic_differentials_step_one_pixel() {
        let camera = Camera::orthographic(UVec2::new(100, 100), frame(), 10.0).unwrap();
        let ray = camera.generate_ray(&Sample::new(50, 50));
        let diff = ray.differential.unwrap();

        assert!((diff.rx_origin - ray.origin).abs_diff_eq(Vec3::new(0.1, 0.0, 0.0), 1e-3));
        assert!((diff.ry_origin - ray.origin).abs_diff_eq(Vec3::new(0.0, -0.1, 0.0), 1e-3));
        assert!(diff.rx_direction.abs_diff_eq(ray.direction, 1e-5));
    }

    #[test]
    fn test_perspective_rays_start_on_near_plane() {
        let camera = Camera::perspective(UVec2::new(64, 48), frame(), 60.0).unwrap();
        let look = frame().look_direction;

        for (x, y) in [(0, 0), (32, 24), (63, 47), (10, 40)] {
            let ray = camera.generate_ray(&Sample::new(x, y));
            assert!((distance_along_look(&camera, &ray) - 1.0).abs() < 1e-3);
            assert!(ray.direction.dot(look) > 0.0);
            assert!((ray.direction.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_perspective_centre_looks_straight_ahead() {
        let camera = Camera::perspective(UVec2::new(64, 64), frame(), 45.0).unwrap();
        let ray = camera.generate_ray(&Sample::new(32, 32));
        assert!(ray.direction.abs_diff_eq(-Vec3::Z, 1e-4));
    }

    #[test]
    fn test_sample_time_carried_to_ray() {
        let camera = Camera::perspective(UVec2::new(8, 8), frame(), 45.0).unwrap();
        let mut sample = Sample::new(1, 1);
        sample.time = 0.75;
        assert_eq!(camera.generate_ray(&sample).time, 0.75);
    }

    #[test]
    fn test_degenerate_frame_rejected() {
        let parallel = CameraFrame::new(Point3::ORIGIN, Vec3::Y, Vec3::Y, 1.0, 10.0);
        let zero_look = CameraFrame::new(Point3::ORIGIN, Vec3::ZERO, Vec3::Y, 1.0, 10.0);

        assert!(Camera::perspective(UVec2::new(8, 8), parallel, 45.0).is_err());
        assert!(Camera::orthographic(UVec2::new(8, 8), zero_look, 2.0).is_err());
        assert!(Camera::orthographic(UVec2::new(0, 8), frame(), 2.0).is_err());
    }
}
