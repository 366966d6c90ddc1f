use crate::camera::CameraPose;
use crate::constants::{BOB_AMPLITUDE_DIVISOR, EYE_HEIGHT, JOG_ANGLE_DEG, JOINT_SPIN_DEG_PER_SEC};
use crate::input::ControlRates;
use crate::math::deg_to_rad;

/// Animated state integrated once per frame.
///
/// Immutable value type - `advance` returns the next frame's state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Motion {
    /// Camera pose read by the composer
    pub camera: CameraPose,
    /// Head and torso spin (degrees)
    pub joint_angle: f64,
    /// Timestamp of the previous frame in ms, `None` before the first one
    pub last_time: Option<f64>,
}

impl Default for Motion {
    fn default() -> Self {
        Self {
            camera: CameraPose::default(),
            joint_angle: 0.0,
            last_time: None,
        }
    }
}

impl Motion {
    /// Integrate forward to `now` (ms) using the rates sampled this frame.
    ///
    /// The first call after start or `reset` only records the timestamp.
    pub fn advance(self, rates: ControlRates, now: f64) -> Motion {
        let Some(last) = self.last_time else {
            return Motion {
                last_time: Some(now),
                ..self
            };
        };
        let elapsed = now - last;

        let mut camera = self.camera;
        if rates.forward_speed != 0.0 {
            let yaw = deg_to_rad(camera.yaw);
            camera.position.x -= yaw.sin() * rates.forward_speed * elapsed;
            camera.position.z -= yaw.cos() * rates.forward_speed * elapsed;
            camera.position.y = bob_height();
        }

        camera.yaw += rates.yaw_rate * elapsed;
        camera.pitch += rates.pitch_rate * elapsed;

        Motion {
            camera,
            joint_angle: self.joint_angle - (JOINT_SPIN_DEG_PER_SEC * elapsed) / 1000.0,
            last_time: Some(now),
        }
    }

    /// Forget the previous timestamp so the next `advance` only re-arms the clock
    pub fn reset(self) -> Motion {
        Motion {
            last_time: None,
            ..self
        }
    }
}

/// Eye height while walking
fn bob_height() -> f64 {
    deg_to_rad(JOG_ANGLE_DEG).sin() / BOB_AMPLITUDE_DIVISOR + EYE_HEIGHT
}
