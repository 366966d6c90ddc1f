use crate::animation::Motion;
use crate::camera::CameraPose;
use crate::driver::FrameDriver;
use crate::input::ControlRates;
use crate::matrix_stack::MatrixStack;
use crate::scene::{compose_and_draw, DrawList};
use wasm_bindgen::prelude::*;

#[derive(serde::Serialize)]
pub struct BenchmarkResults {
    pub iterations: i32,
    /// Figure composition only
    pub compose_ms: f64,
    /// Motion integration only
    pub integrate_ms: f64,
    /// Full driver tick: sample, compose, integrate
    pub tick_ms: f64,
    pub per_tick_us: f64,
}

/// Time the per-frame CPU work without touching the GPU
#[wasm_bindgen]
pub fn run_benchmarks(iterations: i32) -> Result<JsValue, JsValue> {
    use std::hint::black_box;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let perf = window
        .performance()
        .ok_or_else(|| JsValue::from_str("no performance timer"))?;

    let camera = black_box(CameraPose::default());
    let mut stack = MatrixStack::new();
    let mut list = DrawList::default();
    let walking = ControlRates {
        pitch_rate: 0.1,
        yaw_rate: 0.1,
        forward_speed: 0.003,
    };

    // Warm-up to trigger JIT
    for i in 0..10_000 {
        list.clear();
        let _ = compose_and_draw(&camera, i as f64, 1.0, &mut stack, &mut list);
        black_box(&list);
    }

    // 1. Composition
    let start = perf.now();
    for i in 0..iterations {
        list.clear();
        compose_and_draw(&camera, i as f64, 1.0, &mut stack, &mut list)?;
        black_box(&list);
    }
    let compose_time = perf.now() - start;

    // 2. Integration
    let mut motion = Motion::default();
    let start = perf.now();
    for i in 0..iterations {
        motion = black_box(motion.advance(walking, i as f64 * 16.0));
    }
    let integrate_time = perf.now() - start;

    // 3. Whole tick
    let mut driver = FrameDriver::new(1.0);
    driver.set_key_state(87, true);
    let start = perf.now();
    for i in 0..iterations {
        list.clear();
        driver.tick(i as f64 * 16.0, &mut list)?;
    }
    let tick_time = perf.now() - start;

    let result = BenchmarkResults {
        iterations,
        compose_ms: compose_time,
        integrate_ms: integrate_time,
        tick_ms: tick_time,
        per_tick_us: if iterations > 0 {
            tick_time * 1000.0 / iterations as f64
        } else {
            0.0
        },
    };

    log::info!("Benchmark: {} ticks in {:.2}ms", iterations, tick_time);
    serde_wasm_bindgen::to_value(&result).map_err(|e| e.into())
}
