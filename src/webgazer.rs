use crate::core::{GazeSlot, GazeSource};
use crate::dom;
use glam::Vec2;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};

// WebGazer injects its preview lazily, so hiding is retried after these delays.
const UI_SETTLE_AFTER_BEGIN_MS: i32 = 1000;
const UI_RETRY_AFTER_SUPPRESS_MS: i32 = 500;

const INJECTED_UI_SELECTOR: &str = "video, [id*='webgazer'], [class*='webgazer']";
const DISPLAY_TOGGLES: [&str; 4] = [
    "showVideoPreview",
    "showPredictionPoints",
    "showFaceOverlay",
    "showFaceFeedbackBox",
];

type GazeListener = Closure<dyn FnMut(JsValue, JsValue)>;

/// [`GazeSource`] backed by the page-global `webgazer` object.
pub struct WebGazer {
    handle: JsValue,
    // kept alive for as long as WebGazer may call it
    listener: Option<GazeListener>,
}

/// Finds `window.webgazer`, if the page loaded the script.
pub fn detect() -> Option<WebGazer> {
    let window = web_sys::window()?;
    let handle = js_sys::Reflect::get(&window, &JsValue::from_str("webgazer")).ok()?;
    if handle.is_undefined() || handle.is_null() {
        return None;
    }
    log::info!("[gaze] webgazer found");
    Some(WebGazer {
        handle,
        listener: None,
    })
}

fn call(target: &JsValue, name: &str, args: &[JsValue]) -> anyhow::Result<JsValue> {
    let f = js_sys::Reflect::get(target, &JsValue::from_str(name))
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into::<js_sys::Function>()
        .map_err(|_| anyhow::anyhow!("webgazer.{name} is not a function"))?;
    let args: js_sys::Array = args.iter().collect();
    f.apply(target, &args)
        .map_err(|e| anyhow::anyhow!("webgazer.{name}: {:?}", e))
}

/// `{x, y}` prediction, or `None` when WebGazer reports null.
fn prediction(data: &JsValue) -> Option<Vec2> {
    if data.is_null() || data.is_undefined() {
        return None;
    }
    let coord = |key: &str| {
        js_sys::Reflect::get(data, &JsValue::from_str(key))
            .ok()
            .and_then(|v| v.as_f64())
    };
    Some(Vec2::new(coord("x")? as f32, coord("y")? as f32))
}

fn hide_injected_ui(handle: &JsValue) {
    for toggle in DISPLAY_TOGGLES {
        if let Err(e) = call(handle, toggle, &[JsValue::FALSE]) {
            log::debug!("[gaze] {:?}", e);
        }
    }
    if let Some(document) = dom::window_document() {
        dom::collapse_elements(&document, INJECTED_UI_SELECTOR);
    }
}

fn hide_injected_ui_later(handle: &JsValue, delay_ms: i32) {
    let handle = handle.clone();
    dom::set_timeout(delay_ms, move || hide_injected_ui(&handle));
}

impl GazeSource for WebGazer {
    fn begin(&mut self, slot: GazeSlot) -> anyhow::Result<()> {
        let failed = slot.clone();
        let listener: GazeListener = Closure::wrap(Box::new(move |data: JsValue, _elapsed: JsValue| {
            slot.publish(prediction(&data));
        }) as Box<dyn FnMut(JsValue, JsValue)>);
        call(&self.handle, "setGazeListener", &[listener.as_ref().clone()])?;
        self.listener = Some(listener);

        let started = call(&self.handle, "begin", &[])?;
        if let Ok(promise) = started.dyn_into::<js_sys::Promise>() {
            spawn_local(async move {
                if let Err(e) = JsFuture::from(promise).await {
                    log::warn!("[gaze] webgazer failed to start camera: {:?}", e);
                    failed.fail();
                }
            });
        }
        hide_injected_ui_later(&self.handle, UI_SETTLE_AFTER_BEGIN_MS);
        Ok(())
    }

    fn end(&mut self) {
        if let Err(e) = call(&self.handle, "clearGazeListener", &[]) {
            log::debug!("[gaze] {:?}", e);
        }
        if let Err(e) = call(&self.handle, "end", &[]) {
            log::warn!("[gaze] {:?}", e);
        }
        self.listener = None;
    }

    fn pause(&mut self) {
        if let Err(e) = call(&self.handle, "pause", &[]) {
            log::warn!("[gaze] {:?}", e);
        }
    }

    fn resume(&mut self) {
        match call(&self.handle, "resume", &[]) {
            Ok(resumed) => {
                if let Ok(promise) = resumed.dyn_into::<js_sys::Promise>() {
                    spawn_local(async move {
                        if let Err(e) = JsFuture::from(promise).await {
                            log::warn!("[gaze] webgazer failed to resume: {:?}", e);
                        }
                    });
                }
            }
            Err(e) => log::warn!("[gaze] {:?}", e),
        }
    }

    fn record_click(&self, at: Vec2) {
        let args = [
            JsValue::from_f64(at.x as f64),
            JsValue::from_f64(at.y as f64),
            JsValue::from_str("click"),
        ];
        if let Err(e) = call(&self.handle, "recordScreenPosition", &args) {
            log::warn!("[gaze] {:?}", e);
        }
    }

    fn suppress_ui(&self) {
        hide_injected_ui(&self.handle);
        hide_injected_ui_later(&self.handle, UI_RETRY_AFTER_SUPPRESS_MS);
    }
}
