use crate::core::{Command, Session};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn handle_keydown(ev: &web::KeyboardEvent, session: &Rc<RefCell<Session>>) {
    if ev.repeat() {
        return;
    }
    if let Some(command) = Command::from_key(&ev.key()) {
        session.borrow_mut().apply(command);
        ev.prevent_default();
    }
}

pub fn wire_keydown(session: Rc<RefCell<Session>>) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_keydown(&ev, &session);
            }) as Box<dyn FnMut(_)>);
        let _ =
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
