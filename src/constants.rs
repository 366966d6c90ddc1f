//! Hardcoded camera-control and scene constants.
//!
//! Rates are expressed per millisecond because the integrator works on the
//! raw millisecond delta handed over by the display scheduler.

use glam::{DVec3, Vec3};

/// Pitch change while Page Up / Page Down is held (degrees per ms)
pub const PITCH_RATE: f64 = 0.1;

/// Yaw change while turning left / right (degrees per ms)
pub const YAW_RATE: f64 = 0.1;

/// Forward speed while moving (world units per ms)
pub const FORWARD_SPEED: f64 = 0.003;

/// Joint spin (degrees per second)
pub const JOINT_SPIN_DEG_PER_SEC: f64 = 45.0;

/// Angle fed into the walking bob. Never advanced, so the bob sits at rest.
pub const JOG_ANGLE_DEG: f64 = 0.0;

/// Divisor applied to the bob's sine
pub const BOB_AMPLITUDE_DIVISOR: f64 = 20.0;

/// Camera eye height the bob oscillates around
pub const EYE_HEIGHT: f64 = 0.4;

/// Camera start position
pub const START_POSITION: DVec3 = DVec3::new(0.0, EYE_HEIGHT, 20.0);

/// Vertical field of view (degrees)
pub const FOV_Y_DEG: f32 = 45.0;

/// Near clip plane
pub const Z_NEAR: f32 = 0.1;

/// Far clip plane
pub const Z_FAR: f32 = 100.0;

// --- Figure layout offsets, each relative to the previous one ---

pub const HEAD_OFFSET: Vec3 = Vec3::new(0.0, 3.0, 0.0);
pub const LEFT_ARM_OFFSET: Vec3 = Vec3::new(1.5, -3.0, 0.0);
pub const RIGHT_ARM_OFFSET: Vec3 = Vec3::new(-4.5, 0.0, 0.0);
pub const RIGHT_FOOT_OFFSET: Vec3 = Vec3::new(3.0, -4.0, 0.0);
pub const LEFT_FOOT_OFFSET: Vec3 = Vec3::new(-1.5, 0.0, 0.0);
