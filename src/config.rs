//! Start-up options passed from JavaScript.

use serde::Deserialize;

/// Options accepted by `start`. Every field is optional on the JS side.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewerConfig {
    /// DOM id of the canvas to render into
    pub canvas_id: String,
    /// `error`, `warn`, `info`, `debug` or `trace`
    pub log_level: String,
    /// RGBA clear colour
    pub clear_color: [f64; 4],
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            canvas_id: "canvas".to_string(),
            log_level: "info".to_string(),
            clear_color: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

impl ViewerConfig {
    /// Parsed log level, `Info` when unrecognised
    pub fn level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}
