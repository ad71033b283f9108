use crate::core::Session;
use crate::render::Renderer;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub session: Rc<RefCell<Session>>,
    pub renderer: Rc<RefCell<Renderer>>,
    pub started: Instant,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = self.started.elapsed();
        let mut session = self.session.borrow_mut();
        let frame = session.tick(now);
        if let Err(e) = self.renderer.borrow_mut().draw(&frame) {
            log::error!("[render] {:?}", e);
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
