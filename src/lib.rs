#![cfg(target_arch = "wasm32")]
use crate::core::{GazeSource, Session, TrackingParams};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

mod constants;
mod core;
mod dom;
mod events;
mod frame;
mod input;
mod render;
mod webgazer;

fn wire_canvas_resize(
    canvas: &web::HtmlCanvasElement,
    session: &Rc<RefCell<Session>>,
    renderer: &Rc<RefCell<render::Renderer>>,
) {
    let canvas_resize = canvas.clone();
    let session = session.clone();
    let renderer = renderer.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        let size = dom::sync_canvas_backing_size(&canvas_resize);
        renderer
            .borrow_mut()
            .resize(canvas_resize.width(), canvas_resize.height());
        session.borrow_mut().resize(size);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

// Releases the camera when the page goes away. Pages kept in the
// back/forward cache only pause, and resume on `pageshow`.
fn wire_page_lifecycle(session: &Rc<RefCell<Session>>) {
    let Some(window) = web::window() else {
        return;
    };

    let hide_session = session.clone();
    let on_hide = Closure::wrap(Box::new(move |ev: web::PageTransitionEvent| {
        let mut session = hide_session.borrow_mut();
        if ev.persisted() {
            session.suspend();
        } else {
            session.shutdown();
        }
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback("pagehide", on_hide.as_ref().unchecked_ref());
    on_hide.forget();

    let show_session = session.clone();
    let on_show = Closure::wrap(Box::new(move |ev: web::PageTransitionEvent| {
        if ev.persisted() {
            show_session.borrow_mut().resume();
        }
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback("pageshow", on_show.as_ref().unchecked_ref());
    on_show.forget();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("gaze-hearts starting");

    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id(constants::CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", constants::CANVAS_ID))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let viewport = dom::sync_canvas_backing_size(&canvas);
    let renderer = Rc::new(RefCell::new(render::Renderer::new(&document, &canvas)?));

    let gaze = webgazer::detect().map(|g| Box::new(g) as Box<dyn GazeSource>);
    let session = Rc::new(RefCell::new(Session::start(
        viewport,
        TrackingParams::default(),
        gaze,
    )));

    wire_canvas_resize(&canvas, &session, &renderer);
    wire_page_lifecycle(&session);
    events::wire_pointer_handlers(&canvas, &session);
    events::wire_keydown(session.clone());

    // Redraw loop driven by requestAnimationFrame
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        session,
        renderer,
        started: Instant::now(),
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
