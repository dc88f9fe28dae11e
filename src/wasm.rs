//! Browser binding: a [`Viewport`] driven from JavaScript.
//!
//! The page forwards pointer events as JSON, supplies
//! `requestAnimationFrame`/`cancelAnimationFrame` wrappers and calls
//! `frame()` from the animation callback. Render frames and signals travel
//! back as JSON strings.

use crate::{
    AspectLock, ConfigError, FrameRequestId, FrameScheduler, GestureOutcome, GestureSignal, LogLevel, Measure,
    MonotonicClock, PointerEvent, SignalSink, Size, Timestamp, Viewport, ViewportConfig,
};
use js_sys::Function;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

fn init_logging(level: LogLevel) {
    if let Some(level) = level.to_level_filter().to_level() {
        // A second viewport on the page finds the logger already installed
        if console_log::init_with_level(level).is_err() {
            log::set_max_level(level.to_level_filter());
        }
    }
}

/// Sizes pushed in from the page's resize observer and image load handler.
#[derive(Clone, Default)]
struct SharedMeasure {
    container: Rc<Cell<Option<Size>>>,
    natural: Rc<Cell<Option<Size>>>,
}

impl Measure for SharedMeasure {
    fn container_size(&self) -> Option<Size> {
        self.container.get()
    }

    fn natural_size(&self) -> Option<Size> {
        self.natural.get()
    }
}

struct JsSignalSink {
    callback: Option<Function>,
}

impl SignalSink for JsSignalSink {
    fn emit(&mut self, signal: GestureSignal) {
        let Some(callback) = &self.callback else {
            return;
        };
        match serde_json::to_string(&signal) {
            Ok(json) => {
                if let Err(e) = callback.call1(&JsValue::NULL, &JsValue::from_str(&json)) {
                    log::warn!("Signal callback threw: {:?}", e);
                }
            }
            Err(e) => log::error!("Failed to encode {:?}: {}", signal, e),
        }
    }
}

struct JsFrameScheduler {
    request: Function,
    cancel: Function,
}

impl FrameScheduler for JsFrameScheduler {
    fn request_frame(&mut self) -> FrameRequestId {
        match self.request.call0(&JsValue::NULL) {
            Ok(id) => FrameRequestId(id.as_f64().unwrap_or_default() as u64),
            Err(e) => {
                log::error!("requestAnimationFrame wrapper threw: {:?}", e);
                FrameRequestId(0)
            }
        }
    }

    fn cancel_frame(&mut self, id: FrameRequestId) {
        if let Err(e) = self.cancel.call1(&JsValue::NULL, &JsValue::from_f64(id.0 as f64)) {
            log::warn!("cancelAnimationFrame wrapper threw: {:?}", e);
        }
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsError> {
    serde_json::to_string(value).map_err(|e| JsError::from(ConfigError::from(e)))
}

#[wasm_bindgen]
pub struct WasmViewport {
    inner: Viewport,
    measure: SharedMeasure,
    clock: MonotonicClock,
}

#[wasm_bindgen]
impl WasmViewport {
    /// `config_json` may be omitted for defaults. `request_frame` must return the frame id.
    #[wasm_bindgen(constructor)]
    pub fn new(
        config_json: Option<String>,
        request_frame: Function,
        cancel_frame: Function,
        on_signal: Option<Function>,
    ) -> Result<WasmViewport, JsError> {
        let config = match config_json {
            Some(json) => ViewportConfig::from_json(&json)?,
            None => ViewportConfig::default(),
        };
        init_logging(config.log_level);

        let measure = SharedMeasure::default();
        let inner = Viewport::new(
            config,
            Box::new(measure.clone()),
            Box::new(JsSignalSink { callback: on_signal }),
            Box::new(JsFrameScheduler {
                request: request_frame,
                cancel: cancel_frame,
            }),
        )?;
        log::info!("Viewport ready");
        Ok(Self {
            inner,
            measure,
            clock: MonotonicClock::new(),
        })
    }

    /// Milliseconds since the viewport was created, for hosts without event timestamps.
    pub fn now(&self) -> f64 {
        self.clock.now().as_millis()
    }

    pub fn set_container_size(&mut self, width: f32, height: f32) {
        self.measure.container.set(Some(Size::new(width, height)));
        self.inner.relayout();
    }

    pub fn set_image_size(&mut self, width: f32, height: f32) {
        self.measure.natural.set(Some(Size::new(width, height)));
        self.inner.relayout();
    }

    /// Route a pointer event given as JSON. Returns `true` when the viewport used it.
    pub fn pointer(&mut self, event_json: &str) -> Result<bool, JsError> {
        let event: PointerEvent = serde_json::from_str(event_json).map_err(ConfigError::from)?;
        let outcome = self.inner.handle_pointer(&event);
        Ok(!matches!(outcome, GestureOutcome::Ignored | GestureOutcome::Rejected))
    }

    /// Advance animations. Returns `true` while another frame has been requested.
    pub fn frame(&mut self, timestamp: f64) -> bool {
        self.inner.on_frame(Timestamp::from_millis(timestamp));
        self.inner.has_pending_frame()
    }

    pub fn render_frame(&self) -> Result<String, JsError> {
        to_json(&self.inner.render_frame())
    }

    pub fn reset(&mut self, timestamp: f64) {
        self.inner.reset(Timestamp::from_millis(timestamp));
    }

    pub fn reset_immediately(&mut self, timestamp: f64) {
        self.inner.reset_immediately(Timestamp::from_millis(timestamp));
    }

    pub fn enter_crop_mode(&mut self, timestamp: f64) {
        self.inner.enter_crop_mode(Timestamp::from_millis(timestamp));
    }

    /// Leave crop mode; returns the selection as JSON (`null` when there is none).
    pub fn exit_crop_mode(&mut self, timestamp: f64) -> Result<String, JsError> {
        to_json(&self.inner.exit_crop_mode(Timestamp::from_millis(timestamp)))
    }

    /// Lock the crop to `ratio` (width / height), or unlock with `undefined`.
    pub fn set_aspect_ratio(&mut self, ratio: Option<f32>) {
        self.inner
            .set_aspect_lock(ratio.map_or(AspectLock::Free, AspectLock::Ratio));
    }

    pub fn reset_crop(&mut self) {
        self.inner.reset_crop();
    }

    pub fn teardown(&mut self, timestamp: f64) {
        self.inner.teardown(Timestamp::from_millis(timestamp));
    }
}
