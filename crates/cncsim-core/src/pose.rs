//! Pose contract and transformation helpers for CNC kinematics.
//!
//! A [`Pose`] holds the tool-center-point transform `T_mcs_from_tcp` and
//! follows the convention
//!
//! ```text
//! p_mcs = T_mcs_from_tcp · p_tcp
//! ```
//!
//! for homogeneous column vectors. The matrix is stored column-major
//! (`glam::DMat4`), so the OpenGL export is a direct copy of the columns.

use crate::error::PoseError;
use glam::{DMat4, DVec3, DVec4};

/// Number of components in a homogeneous point.
const HOMOGENEOUS_LEN: usize = 4;

/// Rendering backend that accepts a column-major 4x4 matrix.
///
/// Implemented by the viewport on top of its GL context, typically as a
/// `glMultMatrixf` call.
pub trait GlMatrixTarget {
    /// Multiply the current matrix by `matrix` (column-major).
    fn mult_matrix(&mut self, matrix: &[f32; 16]);
}

/// Pose holding the TCP transformation matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    t_mcs_from_tcp: DMat4,
}

impl Pose {
    /// Wrap a homogeneous transform from TCP to MCS
    pub fn new(t_mcs_from_tcp: DMat4) -> Self {
        Self { t_mcs_from_tcp }
    }

    /// The identity pose: TCP coincides with the MCS origin
    pub fn identity() -> Self {
        Self::new(DMat4::IDENTITY)
    }

    /// Build a pose from a row-major 4x4 array.
    ///
    /// The matrix is taken as is. Use [`Pose::is_rigid`] to check it before
    /// treating it as a rigid transform.
    pub fn from_rows(rows: [[f64; 4]; 4]) -> Self {
        Self::new(DMat4::from_cols_array_2d(&rows).transpose())
    }

    /// The underlying `T_mcs_from_tcp` matrix
    pub fn matrix(&self) -> DMat4 {
        self.t_mcs_from_tcp
    }

    /// The matrix in natural row-major order
    pub fn rows(&self) -> [[f64; 4]; 4] {
        self.t_mcs_from_tcp.transpose().to_cols_array_2d()
    }

    /// Transform a homogeneous point from TCP coordinates to MCS.
    ///
    /// # Errors
    /// Returns [`PoseError::InvalidInput`] unless `p_tcp` has exactly four
    /// components.
    ///
    /// # Example
    /// ```
    /// use cncsim_core::Pose;
    ///
    /// let p = Pose::identity().transform_point(&[0.0, 0.0, 0.0, 1.0]).unwrap();
    /// assert_eq!(p.to_array(), [0.0, 0.0, 0.0, 1.0]);
    /// ```
    pub fn transform_point(&self, p_tcp: &[f64]) -> Result<DVec4, PoseError> {
        let point: [f64; HOMOGENEOUS_LEN] =
            p_tcp.try_into().map_err(|_| PoseError::InvalidInput {
                expected: HOMOGENEOUS_LEN,
                actual: p_tcp.len(),
            })?;
        Ok(self.transform_vec4(DVec4::from_array(point)))
    }

    /// Transform a point given as a 4x1 column vector.
    ///
    /// The column is flattened first; anything that does not flatten to four
    /// components is rejected like in [`Pose::transform_point`].
    pub fn transform_column(&self, p_tcp: &[[f64; 1]]) -> Result<DVec4, PoseError> {
        let flat: Vec<f64> = p_tcp.iter().map(|row| row[0]).collect();
        self.transform_point(&flat)
    }

    /// Transform an already typed homogeneous point
    pub fn transform_vec4(&self, p_tcp: DVec4) -> DVec4 {
        self.t_mcs_from_tcp * p_tcp
    }

    /// Position of the tool center point in MCS
    pub fn tcp_position(&self) -> DVec3 {
        self.transform_vec4(DVec4::W).truncate()
    }

    /// Translation column of the transform
    pub fn translation(&self) -> DVec3 {
        self.t_mcs_from_tcp.w_axis.truncate()
    }

    /// Z column of the transform, i.e. the tool axis expressed in MCS
    pub fn tool_axis(&self) -> DVec3 {
        self.t_mcs_from_tcp.z_axis.truncate()
    }

    /// Column-major flattened matrix for OpenGL.
    ///
    /// Equals the transpose of the row-major storage, flattened.
    pub fn to_gl_array(&self) -> [f64; 16] {
        self.t_mcs_from_tcp.to_cols_array()
    }

    /// Single precision variant of [`Pose::to_gl_array`]
    pub fn to_gl_array_f32(&self) -> [f32; 16] {
        self.t_mcs_from_tcp.as_mat4().to_cols_array()
    }

    /// Load the pose into a rendering backend.
    ///
    /// OpenGL expects column-major matrices, which is the order produced by
    /// [`Pose::to_gl_array_f32`].
    pub fn apply_to_gl<T: GlMatrixTarget + ?Sized>(&self, target: &mut T) {
        target.mult_matrix(&self.to_gl_array_f32());
    }

    /// Whether the matrix is a rigid transform within `eps`.
    ///
    /// Checks the bottom row is `[0, 0, 0, 1]` and the upper-left 3x3 block
    /// is orthonormal with determinant +1.
    pub fn is_rigid(&self, eps: f64) -> bool {
        let m = &self.t_mcs_from_tcp;
        let bottom = m.row(3);
        if !bottom.abs_diff_eq(DVec4::W, eps) {
            return false;
        }

        let x = m.x_axis.truncate();
        let y = m.y_axis.truncate();
        let z = m.z_axis.truncate();
        let unit = |v: DVec3| (v.length_squared() - 1.0).abs() <= eps;
        let orthogonal = |a: DVec3, b: DVec3| a.dot(b).abs() <= eps;

        unit(x)
            && unit(y)
            && unit(z)
            && orthogonal(x, y)
            && orthogonal(y, z)
            && orthogonal(x, z)
            && (x.cross(y).dot(z) - 1.0).abs() <= eps
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<DMat4> for Pose {
    fn from(matrix: DMat4) -> Self {
        Self::new(matrix)
    }
}
