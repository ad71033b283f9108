use glam::Vec2;
use web_sys as web;

/// Pointer position in canvas backing-store pixels.
#[inline]
pub fn pointer_canvas_px(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let x_css = ev.client_x() as f32 - rect.left() as f32;
    let y_css = ev.client_y() as f32 - rect.top() as f32;
    let w = rect.width() as f32;
    let h = rect.height() as f32;
    if w > 0.0 && h > 0.0 {
        Vec2::new(
            x_css / w * canvas.width() as f32,
            y_css / h * canvas.height() as f32,
        )
    } else {
        Vec2::new(x_css, y_css)
    }
}
