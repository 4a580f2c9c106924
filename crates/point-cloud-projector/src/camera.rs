use log::debug;
use nalgebra::Matrix3;
use thiserror::Error;

use crate::{Point3, Vector3};

/// Smallest length a hint vector, or the cross product of the two hints, may have.
const DEGENERATE_EPSILON: f64 = 1e-9;

/// Reasons a camera cannot be built from its inputs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CameraError {
    #[error("camera direction is the zero vector")]
    ZeroDirection,
    #[error("camera up vector is the zero vector")]
    ZeroUp,
    #[error("camera direction and up vector are parallel")]
    Parallel,
    #[error("perspective must be positive and finite, got {0}")]
    InvalidPerspective(f64),
    #[error("screen resolution must be non-zero, got {width}x{height}")]
    EmptyScreen { width: u32, height: u32 },
}

/// A point projected onto the screen.
///
/// `x` grows to the right and `y` grows downward, both in pixels. `depth` is the distance along
/// the camera's forward axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
    pub depth: f64,
}

/// A pinhole camera with a fixed orthonormal frame.
///
/// The frame is right-handed with `right = direction × up`. Points are moved into camera space
/// by the matrix whose rows are `right`, `direction` and `up`, so the middle component of a
/// camera space vector is its depth.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Point3,
    direction: Vector3,
    up: Vector3,
    right: Vector3,
    perspective: f64,
    width: u32,
    height: u32,
    world_to_camera: Matrix3<f64>,
}

impl Camera {
    /// Creates a camera looking along `direction`.
    ///
    /// `up` is only a hint: it is re-orthogonalized against `direction` while keeping the side
    /// of the plane it points to. Neither vector needs to be normalized.
    pub fn new(
        position: Point3,
        direction: Vector3,
        up: Vector3,
        perspective: f64,
        width: u32,
        height: u32,
    ) -> Result<Self, CameraError> {
        if !(perspective.is_finite() && perspective > 0.0) {
            return Err(CameraError::InvalidPerspective(perspective));
        }
        if width == 0 || height == 0 {
            return Err(CameraError::EmptyScreen { width, height });
        }

        let direction = direction
            .try_normalize(DEGENERATE_EPSILON)
            .ok_or(CameraError::ZeroDirection)?;
        let up_hint = up
            .try_normalize(DEGENERATE_EPSILON)
            .ok_or(CameraError::ZeroUp)?;

        // Both inputs are unit length, so the norm of the cross product is the sine of the angle
        // between them
        let right = direction
            .cross(&up_hint)
            .try_normalize(DEGENERATE_EPSILON)
            .ok_or(CameraError::Parallel)?;

        // right and direction are orthogonal unit vectors, so this is unit length as well
        let up = right.cross(&direction);

        let world_to_camera =
            Matrix3::from_rows(&[right.transpose(), direction.transpose(), up.transpose()]);

        debug!(
            "camera at {:?} looking along {:?} with up {:?}",
            position, direction, up
        );

        Ok(Self {
            position,
            direction,
            up,
            right,
            perspective,
            width,
            height,
            world_to_camera,
        })
    }

    pub fn position(&self) -> Point3 {
        self.position
    }

    /// The unit forward axis.
    pub fn direction(&self) -> Vector3 {
        self.direction
    }

    /// The unit up axis, orthogonal to the direction.
    pub fn up(&self) -> Vector3 {
        self.up
    }

    /// The unit right axis, `direction × up`.
    pub fn right(&self) -> Vector3 {
        self.right
    }

    pub fn perspective(&self) -> f64 {
        self.perspective
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The screen resolution as `(width, height)` in pixels.
    pub fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// The rotation taking world space offsets into camera space.
    pub fn world_to_camera(&self) -> &Matrix3<f64> {
        &self.world_to_camera
    }

    /// Expresses a world space point relative to the camera.
    ///
    /// The components are `(right, depth, up)`.
    pub fn to_camera_space(&self, point: &Point3) -> Vector3 {
        self.world_to_camera * (point - self.position)
    }

    /// Projects a world space point onto the screen.
    ///
    /// Returns `None` when the point is behind the camera. A point at depth zero is still in
    /// front. The result is not clipped to the screen, so it may lie outside of it.
    pub fn project(&self, point: &Point3) -> Option<ScreenPoint> {
        let p = self.to_camera_space(point);

        let depth = p.y;
        if depth < 0.0 {
            return None;
        }

        // Central projection with the perspective constant as focal distance
        let t = self.perspective / (depth + self.perspective);
        let x = p.x * t + self.width as f64 / 2.0;
        let y = self.height as f64 / 2.0 - p.z * t;

        Some(ScreenPoint { x, y, depth })
    }
}

/// The configuration for a camera.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraConfig {
    position: Point3,
    direction: Vector3,
    up: Vector3,
    perspective: f64,
    resolution: (u32, u32),
}

impl CameraConfig {
    /// Creates a new camera configuration.
    pub fn new(
        position: Point3,
        (direction, up): (Vector3, Vector3),
        perspective: f64,
        resolution: (u32, u32),
    ) -> Self {
        Self {
            position,
            direction,
            up,
            perspective,
            resolution,
        }
    }

    /// Sets the position of the camera.
    pub fn with_position(mut self, position: Point3) -> Self {
        self.position = position;
        self
    }

    /// Sets the viewing direction and the up hint of the camera.
    pub fn with_orientation(mut self, direction: Vector3, up: Vector3) -> Self {
        self.direction = direction;
        self.up = up;
        self
    }

    /// Sets the perspective constant of the camera.
    pub fn with_perspective(mut self, perspective: f64) -> Self {
        self.perspective = perspective;
        self
    }

    /// Sets the screen resolution in pixels.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.resolution = (width, height);
        self
    }

    pub fn resolution(&self) -> (u32, u32) {
        self.resolution
    }

    /// Builds the camera described by this configuration.
    pub fn build(&self) -> Result<Camera, CameraError> {
        let (width, height) = self.resolution;
        Camera::new(
            self.position,
            self.direction,
            self.up,
            self.perspective,
            width,
            height,
        )
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self::new(
            Point3::origin(),
            (Vector3::y(), Vector3::z()),
            400.0,
            (800, 600),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn test_camera() -> Camera {
        Camera::new(Point3::origin(), Vector3::y(), Vector3::z(), 1.0, 640, 480).unwrap()
    }

    fn assert_orthonormal(camera: &Camera) {
        let (d, u, r) = (camera.direction(), camera.up(), camera.right());
        assert!((d.norm() - 1.0).abs() < EPSILON, "direction not unit: {d:?}");
        assert!((u.norm() - 1.0).abs() < EPSILON, "up not unit: {u:?}");
        assert!((r.norm() - 1.0).abs() < EPSILON, "right not unit: {r:?}");
        assert!(d.dot(&u).abs() < EPSILON);
        assert!(d.dot(&r).abs() < EPSILON);
        assert!(u.dot(&r).abs() < EPSILON);
        assert!((d.cross(&u) - r).norm() < EPSILON, "frame is not right-handed");
    }

    #[test]
    fn axis_aligned_frame_is_kept() {
        let camera = test_camera();
        assert!((camera.direction() - Vector3::y()).norm() < EPSILON);
        assert!((camera.up() - Vector3::z()).norm() < EPSILON);
        assert!((camera.right() - Vector3::x()).norm() < EPSILON);
        assert_orthonormal(&camera);
    }

    #[test]
    fn non_orthogonal_hints_give_orthonormal_frame() {
        let hints = [
            (Vector3::new(0.0, 3.0, 0.0), Vector3::new(0.0, 1.0, 1.0)),
            (Vector3::new(1.0, 2.0, 3.0), Vector3::new(-2.0, 0.5, 4.0)),
            (Vector3::new(-0.3, 0.1, 0.9), Vector3::new(0.0, 1.0, 0.0)),
            (Vector3::new(5.0, -1.0, 0.0), Vector3::new(0.2, 0.0, -7.0)),
        ];
        for (direction, up) in hints {
            let camera = Camera::new(Point3::origin(), direction, up, 2.0, 100, 100).unwrap();
            assert_orthonormal(&camera);
            // The new up stays on the same side as the hint
            assert!(camera.up().dot(&up) > 0.0);
        }
    }

    #[test]
    fn matrix_rows_are_the_frame() {
        let camera = Camera::new(
            Point3::new(1.0, 2.0, 3.0),
            Vector3::new(1.0, 1.0, 0.0),
            Vector3::z(),
            10.0,
            200,
            100,
        )
        .unwrap();
        let m = camera.world_to_camera();
        assert!((m.row(0).transpose() - camera.right()).norm() < EPSILON);
        assert!((m.row(1).transpose() - camera.direction()).norm() < EPSILON);
        assert!((m.row(2).transpose() - camera.up()).norm() < EPSILON);
    }

    #[test]
    fn degenerate_inputs_are_rejected() {
        let origin = Point3::origin();
        assert_eq!(
            Camera::new(origin, Vector3::zeros(), Vector3::z(), 1.0, 10, 10),
            Err(CameraError::ZeroDirection)
        );
        assert_eq!(
            Camera::new(origin, Vector3::y(), Vector3::zeros(), 1.0, 10, 10),
            Err(CameraError::ZeroUp)
        );
        assert_eq!(
            Camera::new(origin, Vector3::y(), Vector3::new(0.0, -4.0, 0.0), 1.0, 10, 10),
            Err(CameraError::Parallel)
        );
        assert_eq!(
            Camera::new(origin, Vector3::y(), Vector3::z(), 0.0, 10, 10),
            Err(CameraError::InvalidPerspective(0.0))
        );
        assert!(matches!(
            Camera::new(origin, Vector3::y(), Vector3::z(), f64::NAN, 10, 10),
            Err(CameraError::InvalidPerspective(_))
        ));
        assert_eq!(
            Camera::new(origin, Vector3::y(), Vector3::z(), 1.0, 0, 10),
            Err(CameraError::EmptyScreen {
                width: 0,
                height: 10
            })
        );
    }

    #[test]
    fn projects_point_in_front_to_center() {
        let camera = test_camera();
        let projected = camera.project(&Point3::new(0.0, 1.0, 0.0)).unwrap();
        assert_eq!(
            projected,
            ScreenPoint {
                x: 320.0,
                y: 240.0,
                depth: 1.0
            }
        );
    }

    #[test]
    fn point_behind_is_absent() {
        let camera = test_camera();
        assert_eq!(camera.project(&Point3::new(0.0, -1.0, 0.0)), None);
        assert_eq!(camera.project(&Point3::new(5.0, -0.001, 3.0)), None);
    }

    #[test]
    fn depth_zero_is_in_front_without_scaling() {
        let camera = test_camera();
        let projected = camera.project(&Point3::new(10.0, 0.0, 20.0)).unwrap();
        assert_eq!(projected.depth, 0.0);
        assert!((projected.x - 330.0).abs() < EPSILON);
        assert!((projected.y - 220.0).abs() < EPSILON);
    }

    #[test]
    fn forward_axis_projects_to_center_at_any_depth() {
        let position = Point3::new(-3.0, 7.0, 1.5);
        let direction = Vector3::new(2.0, -1.0, 0.5);
        let camera =
            Camera::new(position, direction, Vector3::z(), 50.0, 1024, 768).unwrap();
        for d in [0.0, 0.5, 1.0, 42.0, 1e4] {
            let point = position + camera.direction() * d;
            let projected = camera.project(&point).unwrap();
            assert!((projected.x - 512.0).abs() < 1e-6);
            assert!((projected.y - 384.0).abs() < 1e-6);
            assert!((projected.depth - d).abs() < 1e-6);
        }
    }

    #[test]
    fn offsets_shrink_with_depth() {
        let camera = test_camera();
        let mut previous = f64::INFINITY;
        for depth in [0.0, 0.5, 1.0, 2.0, 10.0, 100.0] {
            let projected = camera.project(&Point3::new(3.0, depth, -2.0)).unwrap();
            let offset = ((projected.x - 320.0).powi(2) + (projected.y - 240.0).powi(2)).sqrt();
            assert!(offset < previous, "offset {offset} did not shrink at depth {depth}");
            previous = offset;
        }
    }

    #[test]
    fn up_points_toward_smaller_screen_y() {
        let camera = test_camera();
        let above = camera.project(&Point3::new(0.0, 1.0, 1.0)).unwrap();
        let right = camera.project(&Point3::new(1.0, 1.0, 0.0)).unwrap();
        assert!(above.y < 240.0);
        assert!(right.x > 320.0);
    }

    #[test]
    fn off_screen_points_are_not_clipped() {
        let camera = test_camera();
        let projected = camera.project(&Point3::new(-1000.0, 0.0, 0.0)).unwrap();
        assert!(projected.x < 0.0);
    }

    #[test]
    fn default_config_builds() {
        let camera = CameraConfig::default().build().unwrap();
        assert_eq!(camera.resolution(), (800, 600));
        assert_eq!(camera.perspective(), 400.0);

        let camera = CameraConfig::default()
            .with_resolution(64, 32)
            .with_perspective(2.0)
            .with_position(Point3::new(0.0, -5.0, 0.0))
            .build()
            .unwrap();
        assert_eq!(camera.resolution(), (64, 32));
        assert_eq!(camera.position(), Point3::new(0.0, -5.0, 0.0));

        let err = CameraConfig::default()
            .with_orientation(Vector3::z(), Vector3::z())
            .build();
        assert_eq!(err, Err(CameraError::Parallel));
    }
}
