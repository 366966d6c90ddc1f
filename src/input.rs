//! Held-key tracking and per-frame control rates.

use crate::constants::{FORWARD_SPEED, PITCH_RATE, YAW_RATE};

/// Keys the viewer reacts to, identified by their DOM `keyCode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ControlKey {
    PageUp = 0,
    PageDown = 1,
    ArrowLeft = 2,
    ArrowUp = 3,
    ArrowRight = 4,
    ArrowDown = 5,
    A = 6,
    D = 7,
    S = 8,
    W = 9,
}

impl ControlKey {
    /// Total number of recognised keys
    pub const COUNT: usize = 10;

    pub const ALL: [ControlKey; Self::COUNT] = [
        ControlKey::PageUp,
        ControlKey::PageDown,
        ControlKey::ArrowLeft,
        ControlKey::ArrowUp,
        ControlKey::ArrowRight,
        ControlKey::ArrowDown,
        ControlKey::A,
        ControlKey::D,
        ControlKey::S,
        ControlKey::W,
    ];

    /// Convert to array index
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Map a DOM key code, `None` for keys the viewer ignores
    pub const fn from_key_code(code: u32) -> Option<Self> {
        match code {
            33 => Some(ControlKey::PageUp),
            34 => Some(ControlKey::PageDown),
            37 => Some(ControlKey::ArrowLeft),
            38 => Some(ControlKey::ArrowUp),
            39 => Some(ControlKey::ArrowRight),
            40 => Some(ControlKey::ArrowDown),
            65 => Some(ControlKey::A),
            68 => Some(ControlKey::D),
            83 => Some(ControlKey::S),
            87 => Some(ControlKey::W),
            _ => None,
        }
    }

    pub const fn key_code(self) -> u32 {
        match self {
            ControlKey::PageUp => 33,
            ControlKey::PageDown => 34,
            ControlKey::ArrowLeft => 37,
            ControlKey::ArrowUp => 38,
            ControlKey::ArrowRight => 39,
            ControlKey::ArrowDown => 40,
            ControlKey::A => 65,
            ControlKey::D => 68,
            ControlKey::S => 83,
            ControlKey::W => 87,
        }
    }
}

/// Rates derived from the held keys, sampled once per frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlRates {
    /// Degrees per ms
    pub pitch_rate: f64,
    /// Degrees per ms
    pub yaw_rate: f64,
    /// World units per ms
    pub forward_speed: f64,
}

/// Which recognised keys are currently down.
///
/// Events between frames overwrite each other; only the state at sampling
/// time matters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    held: [bool; ControlKey::COUNT],
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key-down / key-up event. Unknown key codes are dropped.
    pub fn set_key_state(&mut self, key_code: u32, pressed: bool) {
        if let Some(key) = ControlKey::from_key_code(key_code) {
            self.held[key.index()] = pressed;
        }
    }

    #[inline]
    pub fn is_held(&self, key: ControlKey) -> bool {
        self.held[key.index()]
    }

    /// Forget every held key
    pub fn release_all(&mut self) {
        self.held = [false; ControlKey::COUNT];
    }

    /// Derive control rates from the held keys.
    ///
    /// Opposing keys are checked in a fixed order and the first one wins:
    /// pitch up over down, left over right, forward over backward.
    pub fn sample_control_rates(&self) -> ControlRates {
        use ControlKey::*;

        let pitch_rate = if self.is_held(PageUp) {
            PITCH_RATE
        } else if self.is_held(PageDown) {
            -PITCH_RATE
        } else {
            0.0
        };

        let yaw_rate = if self.is_held(ArrowLeft) || self.is_held(A) {
            YAW_RATE
        } else if self.is_held(ArrowRight) || self.is_held(D) {
            -YAW_RATE
        } else {
            0.0
        };

        let forward_speed = if self.is_held(ArrowUp) || self.is_held(W) {
            FORWARD_SPEED
        } else if self.is_held(ArrowDown) || self.is_held(S) {
            -FORWARD_SPEED
        } else {
            0.0
        };

        ControlRates {
            pitch_rate,
            yaw_rate,
            forward_speed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holding(keys: &[ControlKey]) -> InputState {
        let mut input = InputState::new();
        for key in keys {
            input.set_key_state(key.key_code(), true);
        }
        input
    }

    #[test]
    fn test_key_codes_round_trip() {
        for key in ControlKey::ALL {
            assert_eq!(ControlKey::from_key_code(key.key_code()), Some(key));
            assert_eq!(ControlKey::ALL[key.index()], key);
        }
    }

    #[test]
    fn test_idle_rates_are_zero() {
        assert_eq!(InputState::new().sample_control_rates(), ControlRates::default());
    }

    #[test]
    fn test_pitch_up_wins_over_pitch_down() {
        let rates = holding(&[ControlKey::PageDown, ControlKey::PageUp]).sample_control_rates();
        assert_eq!(rates.pitch_rate, 0.1);
    }

    #[test]
    fn test_left_wins_over_right() {
        let rates = holding(&[ControlKey::D, ControlKey::ArrowLeft]).sample_control_rates();
        assert_eq!(rates.yaw_rate, 0.1);

        let rates = holding(&[ControlKey::ArrowRight]).sample_control_rates();
        assert_eq!(rates.yaw_rate, -0.1);
    }

    #[test]
    fn test_forward_wins_over_backward() {
        let rates = holding(&[ControlKey::S, ControlKey::W]).sample_control_rates();
        assert_eq!(rates.forward_speed, 0.003);

        let rates = holding(&[ControlKey::ArrowDown]).sample_control_rates();
        assert_eq!(rates.forward_speed, -0.003);
    }

    #[test]
    fn test_key_release_clears_rate() {
        let mut input = holding(&[ControlKey::W]);
        input.set_key_state(ControlKey::W.key_code(), false);
        assert_eq!(input.sample_control_rates().forward_speed, 0.0);
    }

    #[test]
    fn test_unrecognised_keys_are_ignored() {
        let mut input = InputState::new();
        for code in [0, 13, 32, 66, 255, u32::MAX] {
            input.set_key_state(code, true);
        }
        assert_eq!(input, InputState::new());
    }

    #[test]
    fn test_release_all() {
        let mut input = holding(&ControlKey::ALL);
        input.release_all();
        assert_eq!(input.sample_control_rates(), ControlRates::default());
    }
}
