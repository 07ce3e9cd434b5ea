/// Camera and projection utilities
use nalgebra::{Matrix4, Point2, Point3, RowVector4, Vector3};

use crate::transform::{Transform, VertexBuffer};

/// Horizontal field of view (60 degrees)
pub const DEFAULT_HORIZONTAL_FOV: f64 = std::f64::consts::FRAC_PI_3;
pub const DEFAULT_NEAR: f64 = 0.0;
pub const DEFAULT_FAR: f64 = 100.0;
/// Distance covered by one directional move, in world units
pub const MOVE_STEP: f64 = 0.1;

/// A directional camera move along a world axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Movement {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

impl Movement {
    pub const ALL: [Movement; 6] = [
        Movement::Forward,
        Movement::Backward,
        Movement::Left,
        Movement::Right,
        Movement::Up,
        Movement::Down,
    ];

    /// World-space offset applied by this move. Moves ignore the camera
    /// basis: forward is always +z.
    pub fn offset(self) -> Vector3<f64> {
        match self {
            Movement::Forward => Vector3::new(0.0, 0.0, MOVE_STEP),
            Movement::Backward => Vector3::new(0.0, 0.0, -MOVE_STEP),
            Movement::Left => Vector3::new(-MOVE_STEP, 0.0, 0.0),
            Movement::Right => Vector3::new(MOVE_STEP, 0.0, 0.0),
            Movement::Up => Vector3::new(0.0, MOVE_STEP, 0.0),
            Movement::Down => Vector3::new(0.0, -MOVE_STEP, 0.0),
        }
    }
}

/// Camera configuration for 3D rendering.
///
/// The basis vectors are expected to be orthonormal and are never
/// renormalized; movement only translates `position`.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Homogeneous position, w = 1
    pub position: RowVector4<f64>,
    pub forward: Vector3<f64>,
    pub up: Vector3<f64>,
    pub right: Vector3<f64>,
    pub horizontal_fov: f64,
    pub vertical_fov: f64,
    pub near: f64,
    pub far: f64,
    width: f64,
    height: f64,
    half_width: f64,
    half_height: f64,
}

impl Camera {
    pub fn new(position: Point3<f64>, width: u32, height: u32) -> Self {
        let (width, height) = (width as f64, height as f64);
        let horizontal_fov = DEFAULT_HORIZONTAL_FOV;

        Self {
            position: RowVector4::new(position.x, position.y, position.z, 1.0),
            forward: Vector3::z(),
            up: Vector3::y(),
            right: Vector3::x(),
            horizontal_fov,
            // Scaled by the aspect ratio rather than derived from it; only
            // square viewports keep x and y proportional.
            vertical_fov: horizontal_fov * (width / height),
            near: DEFAULT_NEAR,
            far: DEFAULT_FAR,
            width,
            height,
            half_width: width / 2.0,
            half_height: height / 2.0,
        }
    }

    pub fn eye(&self) -> Point3<f64> {
        Point3::new(self.position.x, self.position.y, self.position.z)
    }

    /// Viewport size in screen units
    pub fn viewport(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Moves the world so the camera sits at the origin
    pub fn translation_to_origin(&self) -> Matrix4<f64> {
        let eye = self.eye();
        Transform::translation_matrix(&Vector3::new(-eye.x, -eye.y, -eye.z))
    }

    /// Basis vectors as columns: right, up, forward
    #[rustfmt::skip]
    pub fn basis_rotation(&self) -> Matrix4<f64> {
        let (r, u, f) = (&self.right, &self.up, &self.forward);
        Matrix4::new(
            r.x, u.x, f.x, 0.0,
            r.y, u.y, f.y, 0.0,
            r.z, u.z, f.z, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f64> {
        self.translation_to_origin() * self.basis_rotation()
    }

    /// Create the perspective projection matrix.
    ///
    /// View-space z is copied into w by the (2, 3) entry so the divide in
    /// [`Camera::project`] foreshortens by depth.
    #[rustfmt::skip]
    pub fn projection_matrix(&self) -> Matrix4<f64> {
        let (near, far) = (self.near, self.far);
        let right = (self.horizontal_fov / 2.0).tan();
        let left = -right;
        let top = (self.vertical_fov / 2.0).tan();
        let bottom = -top;

        Matrix4::new(
            2.0 / (right - left), 0.0,                  0.0,                               0.0,
            0.0,                  2.0 / (top - bottom), 0.0,                               0.0,
            0.0,                  0.0,                  (far + near) / (far - near),       1.0,
            0.0,                  0.0,                  -2.0 * near * (far / (far - near)), 0.0,
        )
    }

    /// Maps normalized device coordinates onto the viewport, flipping y
    #[rustfmt::skip]
    pub fn viewport_matrix(&self) -> Matrix4<f64> {
        let (hw, hh) = (self.half_width, self.half_height);
        Matrix4::new(
            hw,  0.0, 0.0, 0.0,
            0.0, -hh, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            hw,  hh,  0.0, 1.0,
        )
    }

    /// Project vertices into normalized device coordinates.
    ///
    /// Every row is divided by its own w. A vertex whose projected w is zero
    /// (level with the camera along the view axis) comes out as inf/NaN.
    pub fn project(&self, vertices: &VertexBuffer) -> VertexBuffer {
        let mut projected = vertices * (self.view_matrix() * self.projection_matrix());
        for mut row in projected.row_iter_mut() {
            let w = row[3];
            row /= w;
        }
        projected
    }

    /// Map projected vertices to screen points, dropping z and w
    pub fn to_screen(&self, normalized: &VertexBuffer) -> Vec<Point2<f64>> {
        let mapped = normalized * self.viewport_matrix();
        mapped
            .row_iter()
            .map(|row| Point2::new(row[0], row[1]))
            .collect()
    }

    /// Offset the position along a world-space vector
    pub fn translate(&mut self, offset: &Vector3<f64>) {
        self.position = self.position * Transform::translation_matrix(offset);
    }

    pub fn apply(&mut self, movement: Movement) {
        self.translate(&movement.offset());
    }

    pub fn move_forward(&mut self) {
        self.apply(Movement::Forward);
    }

    pub fn move_backward(&mut self) {
        self.apply(Movement::Backward);
    }

    pub fn move_left(&mut self) {
        self.apply(Movement::Left);
    }

    pub fn move_right(&mut self) {
        self.apply(Movement::Right);
    }

    pub fn move_up(&mut self) {
        self.apply(Movement::Up);
    }

    pub fn move_down(&mut self) {
        self.apply(Movement::Down);
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Point3::new(0.0, 0.5, -30.0), 640, 640)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Shape;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_camera_creation() {
        let camera = Camera::new(Point3::new(1.0, 2.0, 3.0), 800, 600);
        assert_eq!(camera.eye(), Point3::new(1.0, 2.0, 3.0));
        assert_eq!(camera.position.w, 1.0);
        assert_eq!(camera.viewport(), (800.0, 600.0));
        assert_eq!(camera.forward, Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(camera.up, Vector3::new(0.0, 1.0, 0.0));
        assert_eq!(camera.right, Vector3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_vertical_fov_scales_with_aspect() {
        let square = Camera::new(Point3::origin(), 640, 640);
        assert_relative_eq!(square.vertical_fov, square.horizontal_fov);

        let wide = Camera::new(Point3::origin(), 800, 400);
        assert_relative_eq!(wide.vertical_fov, 2.0 * wide.horizontal_fov);
    }

    #[test]
    fn test_view_matrix_at_origin_is_identity() {
        let camera = Camera::new(Point3::origin(), 640, 640);
        assert_relative_eq!(camera.view_matrix(), Matrix4::identity());
    }

    #[test]
    fn test_view_matrix_moves_eye_to_origin() {
        let camera = Camera::new(Point3::new(4.0, -2.0, 7.5), 640, 640);
        let eye = camera.position * camera.view_matrix();
        assert_relative_eq!(eye, RowVector4::new(0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn test_projection_matrix_entries() {
        let camera = Camera::new(Point3::origin(), 640, 640);
        let projection = camera.projection_matrix();
        let focal = 1.0 / (DEFAULT_HORIZONTAL_FOV / 2.0).tan();
        assert_relative_eq!(projection[(0, 0)], focal);
        assert_relative_eq!(projection[(1, 1)], focal);
        assert_eq!(projection[(2, 3)], 1.0);
        assert_eq!(projection[(3, 3)], 0.0);
    }

    #[test]
    fn test_projection_normalizes_w() {
        let camera = Camera::default();
        let mut cube = Shape::cube();
        cube.rotate_y(37.0);
        let projected = camera.project(cube.vertices());
        for row in projected.row_iter() {
            assert_relative_eq!(row[3], 1.0);
        }
    }

    #[test]
    fn test_viewport_corners() {
        let camera = Camera::new(Point3::origin(), 640, 480);
        let corners = Transform::homogeneous(&[
            [-1.0, 1.0, 0.0],
            [1.0, 1.0, 0.0],
            [-1.0, -1.0, 0.0],
            [1.0, -1.0, 0.0],
        ]);
        let screen = camera.to_screen(&corners);
        assert_eq!(screen.len(), 4);
        assert_relative_eq!(screen[0], Point2::new(0.0, 0.0));
        assert_relative_eq!(screen[1], Point2::new(640.0, 0.0));
        assert_relative_eq!(screen[2], Point2::new(0.0, 480.0));
        assert_relative_eq!(screen[3], Point2::new(640.0, 480.0));
    }

    #[test]
    fn test_cube_renders_inside_viewport() {
        let camera = Camera::new(Point3::new(0.0, 0.0, -30.0), 640, 640);
        let cube = Shape::cube();
        let screen = camera.to_screen(&camera.project(cube.vertices()));

        assert_eq!(screen.len(), 8);
        for point in &screen {
            assert!((0.0..=640.0).contains(&point.x), "x out of range: {point}");
            assert!((0.0..=640.0).contains(&point.y), "y out of range: {point}");
        }
        // the origin corner sits on the view axis
        assert_relative_eq!(screen[0], Point2::new(320.0, 320.0));
    }

    #[test]
    fn test_cube_corners_are_distinct() {
        let camera = Camera::default();
        let cube = Shape::cube();
        let screen = camera.to_screen(&camera.project(cube.vertices()));

        for (i, a) in screen.iter().enumerate() {
            for b in &screen[i + 1..] {
                assert!((a - b).norm() > 1e-6, "{a} and {b} coincide");
            }
        }
    }

    #[test]
    fn test_farther_points_shrink_towards_center() {
        let camera = Camera::new(Point3::origin(), 640, 640);
        let points = Transform::homogeneous(&[[1.0, 1.0, 5.0], [1.0, 1.0, 10.0]]);
        let screen = camera.to_screen(&camera.project(&points));
        assert!(screen[0].x > screen[1].x);
        assert!(screen[0].y < screen[1].y);
        assert!(screen[1].x > 320.0);
    }

    #[test]
    fn test_degenerate_divide_is_unguarded() {
        let camera = Camera::new(Point3::origin(), 640, 640);
        let level = Transform::homogeneous(&[[1.0, 0.0, 0.0]]);
        let projected = camera.project(&level);
        assert!(!projected[(0, 0)].is_finite());
    }

    #[test]
    fn test_directional_movement() {
        let mut camera = Camera::new(Point3::origin(), 640, 640);
        camera.move_forward();
        assert_abs_diff_eq!(camera.eye(), Point3::new(0.0, 0.0, 0.1), epsilon = 1e-12);
        camera.move_left();
        assert_abs_diff_eq!(camera.eye(), Point3::new(-0.1, 0.0, 0.1), epsilon = 1e-12);
        assert_eq!(camera.position.w, 1.0);
    }

    #[test]
    fn test_opposite_moves_cancel() {
        let mut camera = Camera::default();
        let start = camera.eye();
        camera.move_right();
        camera.move_up();
        camera.move_backward();
        camera.move_left();
        camera.move_down();
        camera.move_forward();
        assert_abs_diff_eq!(camera.eye(), start, epsilon = 1e-12);
    }

    #[test]
    fn test_moves_ignore_basis() {
        let mut camera = Camera::new(Point3::origin(), 640, 640);
        camera.forward = Vector3::x();
        camera.right = -Vector3::z();
        camera.move_forward();
        assert_abs_diff_eq!(camera.eye(), Point3::new(0.0, 0.0, 0.1), epsilon = 1e-12);
        assert_eq!(camera.forward, Vector3::x());
    }

    #[test]
    fn test_every_movement_is_one_step() {
        for movement in Movement::ALL {
            assert_relative_eq!(movement.offset().norm(), MOVE_STEP);
        }
    }
}
