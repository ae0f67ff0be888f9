use super::motion::{self, MotionListener};
use crate::input::{self, PointerState};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub pointer: Rc<RefCell<PointerState>>,
    /// Set by any shake gesture; consumed by the frame loop.
    pub gesture_queued: Rc<Cell<bool>>,
    pub motion: Rc<RefCell<MotionListener>>,
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointermove(&w);
    wire_pointerleave(&w);
    wire_pointerdown(&w);
}

fn wire_pointermove(w: &InputWiring) {
    let w = w.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let rect = w.canvas.get_bounding_client_rect();
        let x = ev.client_x() as f64 - rect.left();
        let y = ev.client_y() as f64 - rect.top();
        let mut ps = w.pointer.borrow_mut();
        ps.ndc = input::pointer_ndc(
            x as f32,
            y as f32,
            rect.width() as f32,
            rect.height() as f32,
        );
        ps.inside = true;
    }) as Box<dyn FnMut(_)>);
    _ = w
        .canvas
        .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerleave(w: &InputWiring) {
    let w = w.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
        let mut ps = w.pointer.borrow_mut();
        ps.inside = false;
        ps.ndc = glam::Vec2::ZERO;
    }) as Box<dyn FnMut(_)>);
    _ = w
        .canvas
        .add_event_listener_with_callback("pointerleave", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerdown(w: &InputWiring) {
    let w = w.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        // Only the primary button shakes; touch and pen report 0 as well
        if ev.button() != 0 {
            return;
        }
        w.gesture_queued.set(true);
        // iOS only grants motion access from inside a user gesture
        if !w.motion.borrow().is_enabled() && motion::needs_permission() {
            let listener = w.motion.clone();
            spawn_local(async move {
                let granted = motion::request_permission(listener).await;
                log::info!("[motion] permission granted={}", granted);
            });
        }
    }) as Box<dyn FnMut(_)>);
    _ = w
        .canvas
        .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}
