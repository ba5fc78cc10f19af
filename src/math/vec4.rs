//! 4D vector for homogeneous clip-space coordinates.

use super::vec3::Vec3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vec4 {
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Create a point (w=1) from x, y, z coordinates.
    pub const fn point(x: f32, y: f32, z: f32) -> Self {
        Self::new(x, y, z, 1.0)
    }

    /// Divides x, y, z by w. Returns `None` when w is zero or the quotient
    /// is not finite.
    pub fn perspective_divide(self) -> Option<Vec3> {
        if self.w == 0.0 {
            return None;
        }
        let v = Vec3::new(self.x / self.w, self.y / self.w, self.z / self.w);
        (v.x.is_finite() && v.y.is_finite() && v.z.is_finite()).then_some(v)
    }
}

impl From<Vec3> for Vec4 {
    /// Convert Vec3 to Vec4 as a point (w=1).
    fn from(v: Vec3) -> Self {
        Self::point(v.x, v.y, v.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn divide_by_zero_w_is_rejected() {
        assert_eq!(Vec4::new(1.0, 2.0, 3.0, 0.0).perspective_divide(), None);
    }

    #[test]
    fn divide_scales_by_reciprocal_w() {
        let v = Vec4::new(2.0, -4.0, 1.0, -2.0).perspective_divide();
        assert_eq!(v, Some(Vec3::new(-1.0, 2.0, -0.5)));
    }

    #[test]
    fn from_vec3_is_a_point() {
        assert_eq!(Vec4::from(Vec3::new(1.0, 2.0, 3.0)).w, 1.0);
    }
}
