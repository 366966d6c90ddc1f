//! Browser glue: canvas lookup, key events and the requestAnimationFrame loop.
//!
//! All state lives in one `ViewerShell` shared between the frame callback and
//! the event listeners through `Rc<RefCell<_>>`; everything runs on the page's
//! single thread.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::config::ViewerConfig;
use crate::driver::{FrameDriver, StopToken, TickOutcome};
use crate::error::ViewerError;
use crate::gpu::GpuContext;
use crate::scene::DrawList;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

struct ViewerShell {
    driver: FrameDriver,
    gpu: GpuContext,
    /// Reused every frame
    frame: DrawList,
}

/// DOM listener removed again when dropped
struct Listener {
    target: web_sys::EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(web_sys::Event)>,
}

impl Listener {
    fn attach(
        target: web_sys::EventTarget,
        kind: &'static str,
        callback: Closure<dyn FnMut(web_sys::Event)>,
    ) -> Result<Self, ViewerError> {
        target
            .add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())
            .map_err(|e| {
                ViewerError::ContextUnavailable(format!("cannot listen for {}: {:?}", kind, e))
            })?;
        Ok(Self {
            target,
            kind,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
    }
}

/// Handle returned to JavaScript by `start`
#[wasm_bindgen]
pub struct Viewer {
    shell: Rc<RefCell<ViewerShell>>,
    stop: StopToken,
    _listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl Viewer {
    /// Stop the frame loop. Takes effect at the next tick.
    pub fn stop(&self) {
        self.stop.stop();
        log::info!("Viewer stopped");
    }

    pub fn is_running(&self) -> bool {
        !self.stop.is_stopped()
    }

    /// Resize the drawing surface (in device pixels)
    pub fn resize(&self, width: u32, height: u32) {
        let mut shell = self.shell.borrow_mut();
        shell.gpu.resize(width, height);
        let aspect = shell.gpu.aspect();
        shell.driver.set_aspect(aspect);
    }
}

/// Show a fatal error to the user
pub fn report_fatal(err: &ViewerError) {
    log::error!("{}", err);
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(&err.to_string());
    }
}

/// Start the viewer.
///
/// `options` is an optional object (`{ canvasId, logLevel, clearColor }`).
/// Start-up failures are alerted and reject the returned promise; no frame
/// is ever scheduled in that case.
#[wasm_bindgen]
pub async fn start(options: JsValue) -> Result<Viewer, JsValue> {
    let config: ViewerConfig = if options.is_undefined() || options.is_null() {
        ViewerConfig::default()
    } else {
        serde_wasm_bindgen::from_value(options)
            .map_err(|e| JsValue::from_str(&format!("Invalid viewer options: {}", e)))?
    };

    crate::init_logging(config.level());

    match launch(&config).await {
        Ok(viewer) => Ok(viewer),
        Err(err) => {
            report_fatal(&err);
            Err(err.into())
        }
    }
}

async fn launch(config: &ViewerConfig) -> Result<Viewer, ViewerError> {
    let window = web_sys::window()
        .ok_or_else(|| ViewerError::ContextUnavailable("no window".to_string()))?;
    let document = window
        .document()
        .ok_or_else(|| ViewerError::ContextUnavailable("no document".to_string()))?;
    let canvas = document
        .get_element_by_id(&config.canvas_id)
        .ok_or_else(|| {
            ViewerError::ContextUnavailable(format!("canvas '{}' not found", config.canvas_id))
        })?
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .map_err(|_| {
            ViewerError::ContextUnavailable(format!("'{}' is not a canvas", config.canvas_id))
        })?;

    let gpu = GpuContext::new(canvas, config.clear_color).await?;
    let driver = FrameDriver::new(gpu.aspect());
    let stop = driver.stop_token();

    let shell = Rc::new(RefCell::new(ViewerShell {
        driver,
        gpu,
        frame: DrawList::default(),
    }));

    let listeners = vec![
        key_listener(&document, "keydown", true, &shell)?,
        key_listener(&document, "keyup", false, &shell)?,
        blur_listener(&window, &shell)?,
    ];

    run_frame_loop(&window, shell.clone())?;
    log::info!("Viewer started on canvas '{}'", config.canvas_id);

    Ok(Viewer {
        shell,
        stop,
        _listeners: listeners,
    })
}

fn key_listener(
    document: &web_sys::Document,
    kind: &'static str,
    pressed: bool,
    shell: &Rc<RefCell<ViewerShell>>,
) -> Result<Listener, ViewerError> {
    let shell = shell.clone();
    let callback: Closure<dyn FnMut(web_sys::Event)> = Closure::new(move |event: web_sys::Event| {
        let Some(event) = event.dyn_ref::<web_sys::KeyboardEvent>() else {
            return;
        };
        if let Ok(mut shell) = shell.try_borrow_mut() {
            shell.driver.set_key_state(event.key_code(), pressed);
        }
    });
    Listener::attach(document.clone().into(), kind, callback)
}

/// Keys released while the page is unfocused never send keyup
fn blur_listener(
    window: &web_sys::Window,
    shell: &Rc<RefCell<ViewerShell>>,
) -> Result<Listener, ViewerError> {
    let shell = shell.clone();
    let callback: Closure<dyn FnMut(web_sys::Event)> = Closure::new(move |_event: web_sys::Event| {
        if let Ok(mut shell) = shell.try_borrow_mut() {
            shell.driver.release_all_keys();
        }
    });
    Listener::attach(window.clone().into(), "blur", callback)
}

fn request_frame(window: &web_sys::Window, callback: &FrameCallback) -> Result<(), ViewerError> {
    let callback = callback.borrow();
    let Some(callback) = callback.as_ref() else {
        return Ok(());
    };
    window
        .request_animation_frame(callback.as_ref().unchecked_ref())
        .map(|_| ())
        .map_err(|e| ViewerError::ContextUnavailable(format!("requestAnimationFrame: {:?}", e)))
}

/// Schedule the first tick. Each tick reschedules itself before drawing.
fn run_frame_loop(
    window: &web_sys::Window,
    shell: Rc<RefCell<ViewerShell>>,
) -> Result<(), ViewerError> {
    let callback: FrameCallback = Rc::new(RefCell::new(None));
    let next = callback.clone();
    let scheduler = window.clone();

    *callback.borrow_mut() = Some(Closure::new(move |now: f64| {
        let mut shell = shell.borrow_mut();
        if shell.driver.is_stopped() {
            return;
        }

        if let Err(err) = request_frame(&scheduler, &next) {
            shell.driver.stop_token().stop();
            report_fatal(&err);
            return;
        }

        let ViewerShell { driver, gpu, frame } = &mut *shell;
        frame.clear();
        match driver.tick(now, frame) {
            Ok(TickOutcome::Continue) => gpu.render(frame),
            Ok(TickOutcome::Stopped) => {}
            Err(err) => report_fatal(&err),
        }
    }));

    request_frame(window, &callback)
}
