//! Linear algebra primitives using glam, plus the in-place style transform
//! helpers the scene composer is written against.

pub use glam::{DVec3, Mat4, Vec3};

/// Degrees to radians, `degrees * π / 180`
#[inline]
pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

/// Extension trait composing a child transform onto a parent.
///
/// Every operation right-multiplies, so the new transform is expressed in the
/// local frame of `self`.
pub trait Mat4Transform {
    /// `self * T(offset)`
    fn translated(&self, offset: Vec3) -> Mat4;

    /// `self * R_y(radians)`
    fn rotated_y(&self, radians: f32) -> Mat4;
}

impl Mat4Transform for Mat4 {
    #[inline]
    fn translated(&self, offset: Vec3) -> Mat4 {
        *self * Mat4::from_translation(offset)
    }

    #[inline]
    fn rotated_y(&self, radians: f32) -> Mat4 {
        *self * Mat4::from_rotation_y(radians)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deg_to_rad() {
        assert_eq!(deg_to_rad(0.0), 0.0);
        assert!((deg_to_rad(180.0) - std::f64::consts::PI).abs() < 1e-12);
        assert!((deg_to_rad(-90.0) + std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_translation_is_local_to_parent() {
        // Rotating a quarter turn then stepping +X lands on -Z in the parent
        let parent = Mat4::IDENTITY.rotated_y(std::f32::consts::FRAC_PI_2);
        let child = parent.translated(Vec3::X);
        let origin = child.transform_point3(Vec3::ZERO);
        assert!(origin.abs_diff_eq(Vec3::new(0.0, 0.0, -1.0), 1e-6), "{:?}", origin);
    }
}
