use crate::constants::*;
use crate::core::constants::HEART_MAX_OPACITY;
use crate::core::{CalibrationView, Frame, Guides, HeartShape, TrackingView};
use crate::dom;
use glam::Vec2;
use std::f64::consts::TAU;
use wasm_bindgen::{Clamped, JsValue};
use web_sys as web;

mod blur;

pub use blur::BoxBlur;

#[inline]
fn js_err(e: JsValue) -> anyhow::Error {
    anyhow::anyhow!("{:?}", e)
}

/// Canvas 2D renderer: the visible canvas plus one off-screen heart buffer.
pub struct Renderer {
    ctx: web::CanvasRenderingContext2d,
    buffer: web::HtmlCanvasElement,
    buffer_ctx: web::CanvasRenderingContext2d,
    width: u32,
    height: u32,
    blur: BoxBlur,
}

impl Renderer {
    pub fn new(document: &web::Document, canvas: &web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx = dom::context_2d(canvas)?;
        let buffer = dom::create_canvas(document)?;
        let buffer_ctx = dom::context_2d_readback(&buffer)?;
        let mut renderer = Self {
            ctx,
            buffer,
            buffer_ctx,
            width: 0,
            height: 0,
            blur: BoxBlur::new(BLUR_RADIUS_PX, BLUR_PASSES),
        };
        renderer.resize(canvas.width(), canvas.height());
        Ok(renderer)
    }

    /// Keeps the heart buffer the same size as the visible canvas.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
        self.buffer.set_width(self.width);
        self.buffer.set_height(self.height);
    }

    pub fn draw(&mut self, frame: &Frame<'_>) -> anyhow::Result<()> {
        match frame {
            Frame::Calibrating(view) => self.draw_calibration(view),
            Frame::Tracking(view) => self.draw_tracking(view),
        }
    }

    fn size(&self) -> (f64, f64) {
        (self.width as f64, self.height as f64)
    }

    fn draw_calibration(&self, view: &CalibrationView<'_>) -> anyhow::Result<()> {
        let (w, h) = self.size();
        let ctx = &self.ctx;
        ctx.set_fill_style_str(CALIBRATION_BACKGROUND);
        ctx.fill_rect(0.0, 0.0, w, h);

        ctx.set_font(CALIBRATION_FONT);
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        ctx.set_fill_style_str(CALIBRATION_TEXT_COLOR);
        if view.ready {
            ctx.fill_text(CALIBRATION_DONE, w / 2.0, CALIBRATION_TEXT_INSET_PX)
                .map_err(js_err)?;
            ctx.fill_text(CALIBRATION_CONFIRM_HINT, w / 2.0, h - CALIBRATION_TEXT_INSET_PX)
                .map_err(js_err)?;
        } else {
            ctx.fill_text(CALIBRATION_PROMPT, w / 2.0, CALIBRATION_TEXT_INSET_PX)
                .map_err(js_err)?;
        }

        for (i, p) in view.points.iter().enumerate() {
            let next = view.next == Some(i);
            ctx.set_fill_style_str(if p.acknowledged {
                CALIBRATION_POINT_DONE_FILL
            } else {
                CALIBRATION_POINT_PENDING_FILL
            });
            ctx.set_stroke_style_str(if next {
                CALIBRATION_NEXT_STROKE
            } else {
                CALIBRATION_POINT_STROKE
            });
            ctx.set_line_width(if next { CALIBRATION_NEXT_STROKE_WIDTH } else { 1.0 });
            circle_path(ctx, p.position, CALIBRATION_POINT_DIAMETER / 2.0)?;
            ctx.fill();
            ctx.stroke();
        }
        ctx.set_line_width(1.0);
        Ok(())
    }

    fn draw_tracking(&mut self, view: &TrackingView) -> anyhow::Result<()> {
        let (w, h) = self.size();
        self.ctx.set_fill_style_str(TRACKING_BACKGROUND);
        self.ctx.fill_rect(0.0, 0.0, w, h);

        self.buffer_ctx.clear_rect(0.0, 0.0, w, h);
        for heart in &view.hearts {
            fill_heart(&self.buffer_ctx, heart);
        }
        // One blur over the whole buffer rather than one per heart.
        if !view.hearts.is_empty() {
            self.blur_buffer()?;
        }
        self.ctx
            .draw_image_with_html_canvas_element(&self.buffer, 0.0, 0.0)
            .map_err(js_err)?;

        if let Some(guides) = &view.guides {
            self.draw_guides(guides)?;
        }

        let ctx = &self.ctx;
        ctx.set_font(STATUS_FONT);
        ctx.set_text_align("center");
        ctx.set_text_baseline("alphabetic");
        ctx.set_fill_style_str(STATUS_TEXT_COLOR);
        let label = if view.dwelling { STATUS_DWELLING } else { STATUS_IDLE };
        ctx.fill_text(label, view.focus.x as f64, view.focus.y as f64)
            .map_err(js_err)?;

        if let Some(marker) = view.marker {
            ctx.set_stroke_style_str(GAZE_MARKER_STROKE);
            circle_path(ctx, marker, GAZE_MARKER_DIAMETER / 2.0)?;
            ctx.stroke();
        }
        Ok(())
    }

    fn draw_guides(&self, guides: &Guides) -> anyhow::Result<()> {
        let ctx = &self.ctx;
        ctx.set_stroke_style_str(GUIDE_COLOR);
        ctx.set_line_width(2.0);
        circle_path(ctx, guides.focus, GUIDE_FOCUS_DIAMETER / 2.0)?;
        ctx.stroke();
        ctx.set_stroke_style_str(GUIDE_RING_COLOR);
        ctx.set_line_width(1.0);
        circle_path(ctx, guides.focus, guides.threshold as f64)?;
        ctx.stroke();
        Ok(())
    }

    fn blur_buffer(&mut self) -> anyhow::Result<()> {
        let (w, h) = self.size();
        let image = self
            .buffer_ctx
            .get_image_data(0.0, 0.0, w, h)
            .map_err(js_err)?;
        let mut pixels = image.data().0;
        self.blur
            .apply(&mut pixels, self.width as usize, self.height as usize);
        let blurred = web::ImageData::new_with_u8_clamped_array_and_sh(
            Clamped(&pixels[..]),
            self.width,
            self.height,
        )
        .map_err(js_err)?;
        self.buffer_ctx
            .put_image_data(&blurred, 0.0, 0.0)
            .map_err(js_err)
    }
}

fn fill_heart(ctx: &web::CanvasRenderingContext2d, heart: &HeartShape) {
    let Some((first, rest)) = heart.outline.split_first() else {
        return;
    };
    let (r, g, b) = HEART_RGB;
    let alpha = (heart.opacity / HEART_MAX_OPACITY).clamp(0.0, 1.0);
    ctx.set_fill_style_str(&format!("rgba({r}, {g}, {b}, {alpha:.3})"));
    ctx.begin_path();
    ctx.move_to(first.x as f64, first.y as f64);
    for p in rest {
        ctx.line_to(p.x as f64, p.y as f64);
    }
    ctx.close_path();
    ctx.fill();
}

fn circle_path(ctx: &web::CanvasRenderingContext2d, center: Vec2, radius: f64) -> anyhow::Result<()> {
    ctx.begin_path();
    ctx.arc(center.x as f64, center.y as f64, radius, 0.0, TAU)
        .map_err(js_err)
}
