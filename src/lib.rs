//! Blockman Viewer - Wasm Core
//!
//! A block-built figure walked through with the keyboard, rendered with wgpu
//! into a browser canvas.

pub mod animation;
#[cfg(target_arch = "wasm32")]
mod bench;
pub mod camera;
pub mod config;
pub mod constants;
pub mod driver;
pub mod error;
#[cfg(target_arch = "wasm32")]
pub mod gpu;
pub mod input;
mod math;
pub mod matrix_stack;
pub mod mesh_data;
pub mod scene;
#[cfg(target_arch = "wasm32")]
pub mod viewer;

#[cfg(target_arch = "wasm32")]
pub use bench::run_benchmarks;
#[cfg(target_arch = "wasm32")]
pub use viewer::{start, Viewer};

pub use driver::{FrameDriver, SceneState, StopToken, TickOutcome};
pub use error::ViewerError;
pub use math::{Mat4, Mat4Transform};

/// Route `log` output and panics to the browser console.
/// Safe to call more than once.
pub fn init_logging(level: log::Level) {
    cfg_if::cfg_if! {
        if #[cfg(target_arch = "wasm32")] {
            console_error_panic_hook::set_once();
            console_log::init_with_level(level).ok();
        } else {
            let _ = level;
        }
    }
}

#[cfg(test)]
mod tests {
    #[cfg(target_arch = "wasm32")]
    mod browser {
        use wasm_bindgen_test::*;
        wasm_bindgen_test_configure!(run_in_browser);

        #[wasm_bindgen_test]
        fn test_benchmarks_run() {
            crate::init_logging(log::Level::Warn);
            let result = crate::run_benchmarks(10);
            assert!(result.is_ok());
        }
    }

    #[test]
    fn test_init_logging_is_idempotent() {
        super::init_logging(log::Level::Info);
        super::init_logging(log::Level::Debug);
    }
}
