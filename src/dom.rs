use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Sizes the canvas backing store to its CSS box, one pixel per CSS pixel, so
/// gaze predictions, pointer events and drawing share a coordinate space.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let w_px = (rect.width() as u32).max(1);
    let h_px = (rect.height() as u32).max(1);
    canvas.set_width(w_px);
    canvas.set_height(h_px);
    Vec2::new(w_px as f32, h_px as f32)
}

pub fn create_canvas(document: &web::Document) -> anyhow::Result<web::HtmlCanvasElement> {
    document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))
}

pub fn context_2d(canvas: &web::HtmlCanvasElement) -> anyhow::Result<web::CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .ok_or_else(|| anyhow::anyhow!("no 2d context"))?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))
}

/// 2d context for a buffer that is read back with `getImageData` every frame.
pub fn context_2d_readback(
    canvas: &web::HtmlCanvasElement,
) -> anyhow::Result<web::CanvasRenderingContext2d> {
    let options = js_sys::Object::new();
    js_sys::Reflect::set(
        &options,
        &JsValue::from_str("willReadFrequently"),
        &JsValue::TRUE,
    )
    .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    canvas
        .get_context_with_context_options("2d", &options)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .ok_or_else(|| anyhow::anyhow!("no 2d context"))?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))
}

/// Shrinks every element matching `selector` to an invisible 1px box.
pub fn collapse_elements(document: &web::Document, selector: &str) {
    let nodes = match document.query_selector_all(selector) {
        Ok(n) => n,
        Err(e) => {
            log::debug!("[dom] bad selector {selector}: {:?}", e);
            return;
        }
    };
    for i in 0..nodes.length() {
        if let Some(el) = nodes.item(i).and_then(|n| n.dyn_into::<web::Element>().ok()) {
            _ = el.set_attribute(
                "style",
                "position:fixed;top:0;left:0;width:1px;height:1px;overflow:hidden;opacity:0",
            );
        }
    }
}

/// Runs `f` once after `delay_ms`.
pub fn set_timeout(delay_ms: i32, f: impl FnOnce() + 'static) {
    if let Some(w) = web::window() {
        let cb = wasm_bindgen::closure::Closure::once_into_js(f);
        _ = w.set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), delay_ms);
    }
}
