/// Homogeneous 4x4 transforms in row-vector convention.
///
/// A point is transformed by right-multiplying its row by a matrix
/// (`p' = p · M`), so a whole vertex buffer is transformed by a single
/// `buffer * M` product and transforms compose left to right.
use nalgebra::{Matrix4, MatrixXx4, Vector3};

/// An ordered set of homogeneous vertices, one `(x, y, z, w)` row per vertex
pub type VertexBuffer = MatrixXx4<f64>;

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Create a translation matrix (identity with the offset on the bottom row)
    #[rustfmt::skip]
    pub fn translation_matrix(offset: &Vector3<f64>) -> Matrix4<f64> {
        Matrix4::new(
            1.0,      0.0,      0.0,      0.0,
            0.0,      1.0,      0.0,      0.0,
            0.0,      0.0,      1.0,      0.0,
            offset.x, offset.y, offset.z, 1.0,
        )
    }

    /// Create a rotation matrix about the X axis
    #[rustfmt::skip]
    pub fn rotation_x_matrix(angle: f64) -> Matrix4<f64> {
        let (s, c) = angle.sin_cos();
        Matrix4::new(
            1.0, 0.0, 0.0, 0.0,
            0.0,   c,   s, 0.0,
            0.0,  -s,   c, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Create a rotation matrix about the Y axis
    #[rustfmt::skip]
    pub fn rotation_y_matrix(angle: f64) -> Matrix4<f64> {
        let (s, c) = angle.sin_cos();
        Matrix4::new(
              c, 0.0,  -s, 0.0,
            0.0, 1.0, 0.0, 0.0,
              s, 0.0,   c, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Create a rotation matrix about the Z axis
    #[rustfmt::skip]
    pub fn rotation_z_matrix(angle: f64) -> Matrix4<f64> {
        let (s, c) = angle.sin_cos();
        Matrix4::new(
              c,   s, 0.0, 0.0,
             -s,   c, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Create a uniform scale matrix; the w row and column are left alone
    pub fn scale_matrix(factor: f64) -> Matrix4<f64> {
        Matrix4::new_nonuniform_scaling(&Vector3::new(factor, factor, factor))
    }

    pub fn translate(buffer: &VertexBuffer, offset: &Vector3<f64>) -> VertexBuffer {
        buffer * Self::translation_matrix(offset)
    }

    /// Rotate every vertex about the X axis (radians)
    pub fn rotate_x(buffer: &VertexBuffer, angle: f64) -> VertexBuffer {
        buffer * Self::rotation_x_matrix(angle)
    }

    /// Rotate every vertex about the Y axis (radians)
    pub fn rotate_y(buffer: &VertexBuffer, angle: f64) -> VertexBuffer {
        buffer * Self::rotation_y_matrix(angle)
    }

    /// Rotate every vertex about the Z axis (radians)
    pub fn rotate_z(buffer: &VertexBuffer, angle: f64) -> VertexBuffer {
        buffer * Self::rotation_z_matrix(angle)
    }

    pub fn scale(buffer: &VertexBuffer, factor: f64) -> VertexBuffer {
        buffer * Self::scale_matrix(factor)
    }

    /// Build a buffer from cartesian points, setting every w to 1
    pub fn homogeneous(points: &[[f64; 3]]) -> VertexBuffer {
        VertexBuffer::from_fn(points.len(), |row, col| {
            if col < 3 {
                points[row][col]
            } else {
                1.0
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn sample() -> VertexBuffer {
        Transform::homogeneous(&[[0.0, 0.0, 0.0], [1.0, 2.0, 3.0], [-4.5, 0.25, 7.0]])
    }

    #[test]
    fn test_homogeneous_sets_w() {
        let buffer = sample();
        assert_eq!(buffer.nrows(), 3);
        assert!(buffer.column(3).iter().all(|&w| w == 1.0));
        assert_eq!(buffer[(1, 2)], 3.0);
    }

    #[test]
    fn test_translation_round_trip() {
        let buffer = sample();
        let offset = Vector3::new(1.5, -2.0, 10.0);
        let moved = Transform::translate(&buffer, &offset);
        assert_relative_eq!(moved[(1, 0)], 2.5);
        assert_relative_eq!(moved[(1, 1)], 0.0);
        assert_relative_eq!(moved[(1, 2)], 13.0);

        let back = Transform::translate(&moved, &-offset);
        assert_relative_eq!(back, buffer, epsilon = 1e-12);
    }

    #[test]
    fn test_translate_does_not_mutate_input() {
        let buffer = sample();
        let copy = buffer.clone();
        let _ = Transform::translate(&buffer, &Vector3::new(1.0, 1.0, 1.0));
        assert_eq!(buffer, copy);
    }

    #[test]
    fn test_full_turn_restores_buffer() {
        let buffer = sample();
        let step = 30f64.to_radians();
        let rotations: [fn(&VertexBuffer, f64) -> VertexBuffer; 3] =
            [Transform::rotate_x, Transform::rotate_y, Transform::rotate_z];

        for rotate in rotations {
            let mut turned = buffer.clone();
            for _ in 0..12 {
                turned = rotate(&turned, step);
            }
            assert_relative_eq!(turned, buffer, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_quarter_turns_follow_row_vector_signs() {
        let x = Transform::homogeneous(&[[1.0, 0.0, 0.0]]);
        let y = Transform::homogeneous(&[[0.0, 1.0, 0.0]]);

        let about_x = Transform::rotate_x(&y, FRAC_PI_2);
        assert_relative_eq!(about_x, Transform::homogeneous(&[[0.0, 0.0, 1.0]]), epsilon = 1e-12);

        let about_y = Transform::rotate_y(&x, FRAC_PI_2);
        assert_relative_eq!(about_y, Transform::homogeneous(&[[0.0, 0.0, -1.0]]), epsilon = 1e-12);

        let about_z = Transform::rotate_z(&x, FRAC_PI_2);
        assert_relative_eq!(about_z, Transform::homogeneous(&[[0.0, 1.0, 0.0]]), epsilon = 1e-12);
    }

    #[test]
    fn test_scale_identity() {
        let buffer = sample();
        assert_relative_eq!(Transform::scale(&buffer, 1.0), buffer);
    }

    #[test]
    fn test_scale_keeps_w() {
        let scaled = Transform::scale(&sample(), 2.0);
        assert_relative_eq!(scaled[(1, 0)], 2.0);
        assert_relative_eq!(scaled[(2, 2)], 14.0);
        assert!(scaled.column(3).iter().all(|&w| w == 1.0));
    }

    #[test]
    fn test_identity_rotation() {
        let matrix = Transform::rotation_y_matrix(0.0);
        assert!((matrix - Matrix4::identity()).norm() < 1e-12);
    }
}
