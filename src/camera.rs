use glam::{DVec3, Mat4};

use crate::constants::{FOV_Y_DEG, START_POSITION, Z_FAR, Z_NEAR};
use crate::math::{deg_to_rad, Mat4Transform};

/// First-person camera pose.
///
/// Angles are in degrees and are never wrapped; they grow for as long as a
/// turn key is held. Position and angles stay in double precision, only the
/// derived matrices drop to `f32`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    /// Degrees
    pub pitch: f64,
    /// Degrees
    pub yaw: f64,
    pub position: DVec3,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            pitch: 0.0,
            yaw: 0.0,
            position: START_POSITION,
        }
    }
}

impl CameraPose {
    pub fn new(pitch: f64, yaw: f64, position: DVec3) -> Self {
        Self {
            pitch,
            yaw,
            position,
        }
    }

    /// Inverse camera transform: undo the orientation, then the position.
    ///
    /// Pitch turns around the vertical axis, same as yaw, so Page Up/Down
    /// currently spin the view instead of tilting it. Kept until the intended
    /// behaviour is confirmed.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::IDENTITY
            .rotated_y(deg_to_rad(-self.pitch) as f32)
            .rotated_y(deg_to_rad(-self.yaw) as f32)
            .translated(-self.position.as_vec3())
    }
}

/// Perspective projection for a viewport of the given aspect ratio
pub fn projection_matrix(aspect: f32) -> Mat4 {
    Mat4::perspective_rh(FOV_Y_DEG.to_radians(), aspect, Z_NEAR, Z_FAR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_default_pose() {
        let pose = CameraPose::default();
        assert_eq!(pose.pitch, 0.0);
        assert_eq!(pose.yaw, 0.0);
        assert_eq!(pose.position, DVec3::new(0.0, 0.4, 20.0));
    }

    #[test]
    fn test_view_matrix_moves_world_opposite_to_camera() {
        let view = CameraPose::default().view_matrix();
        let origin = view.transform_point3(Vec3::ZERO);
        assert!(
            origin.abs_diff_eq(Vec3::new(0.0, -0.4, -20.0), 1e-5),
            "origin in view space: {:?}",
            origin
        );
        let eye = view.inverse().transform_point3(Vec3::ZERO);
        assert!(eye.abs_diff_eq(Vec3::new(0.0, 0.4, 20.0), 1e-4));
    }

    #[test]
    fn test_pitch_turns_around_vertical_axis() {
        // Pitch and yaw compose on the same axis, so they are interchangeable
        let pitched = CameraPose::new(30.0, 0.0, DVec3::ZERO).view_matrix();
        let yawed = CameraPose::new(0.0, 30.0, DVec3::ZERO).view_matrix();
        assert!(pitched.abs_diff_eq(yawed, 1e-6));

        // and the up vector never tilts
        let up = pitched.transform_vector3(Vec3::Y);
        assert!(up.abs_diff_eq(Vec3::Y, 1e-6));
    }

    #[test]
    fn test_projection_matrix_is_finite() {
        let proj = projection_matrix(4.0 / 3.0);
        for val in proj.to_cols_array() {
            assert!(val.is_finite(), "Projection matrix should be finite");
        }
        // A point on the near plane maps to depth 0 in wgpu clip space
        let near = proj.project_point3(Vec3::new(0.0, 0.0, -Z_NEAR));
        assert!(near.z.abs() < 1e-5);
    }
}
