use crate::core::Session;
use crate::input;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn wire_pointer_handlers(canvas: &web::HtmlCanvasElement, session: &Rc<RefCell<Session>>) {
    wire_pointermove(canvas, session);
    wire_pointerdown(canvas, session);
}

// Listens on the window so the fallback cursor keeps tracking off-canvas.
fn wire_pointermove(canvas: &web::HtmlCanvasElement, session: &Rc<RefCell<Session>>) {
    let canvas = canvas.clone();
    let session = session.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let pos = input::pointer_canvas_px(&ev, &canvas);
        session.borrow_mut().pointer_moved(pos);
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_pointerdown(canvas: &web::HtmlCanvasElement, session: &Rc<RefCell<Session>>) {
    let canvas_for_listener = canvas.clone();
    let canvas = canvas.clone();
    let session = session.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let pos = input::pointer_canvas_px(&ev, &canvas);
        session.borrow_mut().pointer_pressed(pos);
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}
