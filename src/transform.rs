//! Model transform for the animated mesh.
//!
//! Provides a [`Transform`] with a fluent API for the three factors of the
//! model matrix: a scale, a fixed axis correction that orients the asset,
//! and a spin about one axis driven by the frame angle.

use serde::{Deserialize, Serialize};

use crate::math::{mat4::Mat4, vec3::Vec3};

/// A rotation of `angle` radians about `axis`.
///
/// The axis is used as given by [`Mat4::rotation`], so it should be unit length.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisAngle {
    pub axis: Vec3,
    pub angle: f32,
}

impl AxisAngle {
    pub const fn new(axis: Vec3, angle: f32) -> Self {
        Self { axis, angle }
    }

    pub fn to_matrix(&self) -> Mat4 {
        Mat4::rotation(self.axis, self.angle)
    }
}

/// The model matrix builder: `scale * correction * spin(angle)`.
///
/// Mutating methods return `&mut Self` for chaining:
///
/// ```ignore
/// transform
///     .set_scale_uniform(0.25)
///     .correct(AxisAngle::new(Vec3::UNIT_Y, FRAC_PI_2))
///     .set_spin_axis(Vec3::UNIT_Y);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    scale: Vec3,
    correction: Mat4,
    spin_axis: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            scale: Vec3::ONE,
            correction: Mat4::identity(),
            spin_axis: Vec3::UNIT_Y,
        }
    }
}

impl Transform {
    /// Unit scale, no correction, spinning about +Y.
    pub fn new() -> Self {
        Self::default()
    }

    // ============ Scale ============

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: Vec3) -> &mut Self {
        self.scale = scale;
        self
    }

    /// Set uniform scale (same value for x, y, z).
    pub fn set_scale_uniform(&mut self, s: f32) -> &mut Self {
        self.scale = Vec3::splat(s);
        self
    }

    // ============ Axis correction ============

    /// The fixed rotation applied between scale and spin.
    pub fn correction(&self) -> Mat4 {
        self.correction
    }

    /// Append a fixed rotation to the correction. Corrections apply in the
    /// order they were added.
    pub fn correct(&mut self, rotation: AxisAngle) -> &mut Self {
        self.correction = self.correction * rotation.to_matrix();
        self
    }

    /// Drop all corrections.
    pub fn reset_correction(&mut self) -> &mut Self {
        self.correction = Mat4::identity();
        self
    }

    // ============ Spin ============

    pub fn spin_axis(&self) -> Vec3 {
        self.spin_axis
    }

    pub fn set_spin_axis(&mut self, axis: Vec3) -> &mut Self {
        self.spin_axis = axis;
        self
    }

    // ============ Matrix Generation ============

    /// Generate the model matrix for a spin angle.
    ///
    /// Scale applies first, then the correction, then the spin.
    pub fn to_matrix(&self, angle: f32) -> Mat4 {
        Mat4::scaling(self.scale.x, self.scale.y, self.scale.z)
            * self.correction
            * Mat4::rotation(self.spin_axis, angle)
    }
}
