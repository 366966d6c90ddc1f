//! Centralized scene state and the per-frame tick.
//!
//! Implements a Context Passing pattern where:
//! 1. `SceneState` is a single struct containing all mutable scene state
//! 2. Core functions take explicit references (`&CameraPose`, `&mut MatrixStack`)
//! 3. The browser glue owns one `FrameDriver` and calls `tick` from the
//!    display scheduler
//!
//! Nothing here touches the DOM or the GPU, so a whole frame can be driven
//! from a unit test with a `DrawList` standing in for the backend.

use std::cell::Cell;
use std::rc::Rc;

use crate::animation::Motion;
use crate::error::ViewerError;
use crate::input::{ControlRates, InputState};
use crate::matrix_stack::MatrixStack;
use crate::scene::{compose_and_draw, DrawSink};

/// All mutable scene state. The driver is its only owner.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SceneState {
    /// Keys currently held
    pub input: InputState,
    /// Camera pose, joint angle and frame clock
    pub motion: Motion,
}

impl SceneState {
    /// Pure per-frame update: integrate the motion with this frame's rates
    pub fn tick(self, rates: ControlRates, now: f64) -> SceneState {
        SceneState {
            motion: self.motion.advance(rates, now),
            ..self
        }
    }
}

/// Shared cancellation flag, checked at the top of every tick
#[derive(Clone, Debug, Default)]
pub struct StopToken(Rc<Cell<bool>>);

impl StopToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.set(true);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.get()
    }
}

/// What a tick did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Frame drawn and state advanced; schedule the next one
    Continue,
    /// Stop requested; nothing was drawn and no further tick should run
    Stopped,
}

/// Owns the scene state and runs the ordered frame sequence
#[derive(Debug)]
pub struct FrameDriver {
    state: SceneState,
    stack: MatrixStack,
    aspect: f32,
    stop: StopToken,
}

impl FrameDriver {
    pub fn new(aspect: f32) -> Self {
        Self::with_state(SceneState::default(), aspect)
    }

    pub fn with_state(state: SceneState, aspect: f32) -> Self {
        Self {
            state,
            stack: MatrixStack::new(),
            aspect,
            stop: StopToken::new(),
        }
    }

    pub fn state(&self) -> &SceneState {
        &self.state
    }

    /// Handle for cancelling the loop from outside
    pub fn stop_token(&self) -> StopToken {
        self.stop.clone()
    }

    pub fn is_stopped(&self) -> bool {
        self.stop.is_stopped()
    }

    /// Viewport width / height
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    /// Forward a key event; it takes effect at the next tick
    pub fn set_key_state(&mut self, key_code: u32, pressed: bool) {
        self.state.input.set_key_state(key_code, pressed);
    }

    pub fn release_all_keys(&mut self) {
        self.state.input.release_all();
    }

    /// Run one frame at timestamp `now` (ms): sample input, compose into
    /// `sink`, then integrate.
    ///
    /// A composition error stops the driver; callers should report it.
    pub fn tick<S: DrawSink>(&mut self, now: f64, sink: &mut S) -> Result<TickOutcome, ViewerError> {
        if self.stop.is_stopped() {
            return Ok(TickOutcome::Stopped);
        }

        let rates = self.state.input.sample_control_rates();

        let motion = &self.state.motion;
        if let Err(err) = compose_and_draw(
            &motion.camera,
            motion.joint_angle,
            self.aspect,
            &mut self.stack,
            sink,
        ) {
            self.stop.stop();
            return Err(err);
        }

        self.state = self.state.tick(rates, now);
        Ok(TickOutcome::Continue)
    }
}
