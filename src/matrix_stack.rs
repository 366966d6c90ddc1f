//! Save/restore stack for hierarchical model-view composition.

use crate::error::ViewerError;
use crate::math::{Mat4, Mat4Transform, Vec3};

/// Deepest nesting the figure needs; sized up front so a frame never grows it
pub const DEFAULT_CAPACITY: usize = 4;

/// The current model-view transform plus the snapshots pushed above it.
///
/// `Mat4` is a plain value type, so `push` stores an independent copy and
/// later edits to `current` cannot reach a saved frame.
#[derive(Debug, Clone)]
pub struct MatrixStack {
    current: Mat4,
    saved: Vec<Mat4>,
}

impl Default for MatrixStack {
    fn default() -> Self {
        Self::new()
    }
}

impl MatrixStack {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            current: Mat4::IDENTITY,
            saved: Vec::with_capacity(capacity),
        }
    }

    /// Load identity and forget every saved frame. Keeps the allocation.
    pub fn reset(&mut self) {
        self.current = Mat4::IDENTITY;
        self.saved.clear();
    }

    /// Active transform
    #[inline]
    pub fn current(&self) -> Mat4 {
        self.current
    }

    /// Replace the active transform outright
    pub fn load(&mut self, matrix: Mat4) {
        self.current = matrix;
    }

    /// Number of saved frames
    #[inline]
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    /// Save a copy of the active transform
    pub fn push(&mut self) {
        self.saved.push(self.current);
    }

    /// Restore the most recently saved transform
    pub fn pop(&mut self) -> Result<(), ViewerError> {
        self.current = self.saved.pop().ok_or(ViewerError::InvalidStackOperation)?;
        Ok(())
    }

    /// Compose a translation onto the active transform
    pub fn translate(&mut self, offset: Vec3) {
        self.current = self.current.translated(offset);
    }

    /// Compose a rotation about the local Y axis onto the active transform
    pub fn rotate_y(&mut self, radians: f32) {
        self.current = self.current.rotated_y(radians);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_matrix(rng: &mut StdRng) -> Mat4 {
        let mut cols = [0.0f32; 16];
        for c in cols.iter_mut() {
            *c = rng.random_range(-10.0..10.0);
        }
        Mat4::from_cols_array(&cols)
    }

    #[test]
    fn test_pop_restores_pushed_matrix() {
        let mut stack = MatrixStack::new();
        stack.translate(Vec3::new(1.0, 2.0, 3.0));
        let before = stack.current();

        stack.push();
        stack.rotate_y(0.7);
        stack.translate(Vec3::splat(5.0));
        assert_ne!(stack.current(), before);

        stack.pop().unwrap();
        assert_eq!(stack.current().to_cols_array(), before.to_cols_array());
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn test_mutation_after_push_does_not_touch_snapshot() {
        let mut stack = MatrixStack::new();
        stack.load(Mat4::from_translation(Vec3::X));
        stack.push();
        stack.load(Mat4::ZERO);
        stack.pop().unwrap();
        assert_eq!(stack.current(), Mat4::from_translation(Vec3::X));
    }

    #[test]
    fn test_pop_on_empty_fails() {
        let mut stack = MatrixStack::new();
        stack.translate(Vec3::Y);
        let before = stack.current();

        assert_eq!(stack.pop(), Err(ViewerError::InvalidStackOperation));
        // A failed pop leaves the active transform alone
        assert_eq!(stack.current(), before);
    }

    #[test]
    fn test_pop_after_balanced_sequence_fails() {
        let mut stack = MatrixStack::new();
        stack.push();
        stack.push();
        stack.pop().unwrap();
        stack.pop().unwrap();
        assert_eq!(stack.pop(), Err(ViewerError::InvalidStackOperation));
    }

    #[test]
    fn test_random_sequences_restore_bit_for_bit() {
        let mut rng = StdRng::seed_from_u64(0x5eed);

        for _ in 0..200 {
            let mut stack = MatrixStack::new();
            // Model of what each pop must hand back
            let mut expected: Vec<Mat4> = Vec::new();

            for _ in 0..64 {
                match rng.random_range(0..3) {
                    0 => {
                        expected.push(stack.current());
                        stack.push();
                    }
                    1 => {
                        let result = stack.pop();
                        match expected.pop() {
                            Some(m) => {
                                assert!(result.is_ok());
                                assert_eq!(stack.current().to_cols_array(), m.to_cols_array());
                            }
                            None => assert_eq!(result, Err(ViewerError::InvalidStackOperation)),
                        }
                    }
                    _ => stack.load(random_matrix(&mut rng)),
                }
                assert_eq!(stack.depth(), expected.len());
            }
        }
    }

    #[test]
    fn test_reset_clears_saved_frames() {
        let mut stack = MatrixStack::new();
        stack.translate(Vec3::Z);
        stack.push();
        stack.push();
        stack.reset();

        assert_eq!(stack.depth(), 0);
        assert_eq!(stack.current(), Mat4::IDENTITY);
        assert!(stack.pop().is_err());
    }
}
