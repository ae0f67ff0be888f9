use crate::dom;
use globe_core::{MotionSample, ShakeConfig, ShakeDetector};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

fn motion_event_class() -> Option<JsValue> {
    js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str("DeviceMotionEvent"))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}

fn permission_fn() -> Option<(JsValue, js_sys::Function)> {
    let class = motion_event_class()?;
    let func = js_sys::Reflect::get(&class, &JsValue::from_str("requestPermission")).ok()?;
    let func = func.dyn_into::<js_sys::Function>().ok()?;
    Some((class, func))
}

/// True on platforms (iOS 13+) that gate motion events behind a user gesture.
pub fn needs_permission() -> bool {
    permission_fn().is_some()
}

/// Feeds `devicemotion` samples through a [`ShakeDetector`] and calls back on each shake.
pub struct MotionListener {
    detector: Rc<RefCell<ShakeDetector>>,
    on_shake: Rc<dyn Fn()>,
    handler: Option<Closure<dyn FnMut(web::DeviceMotionEvent)>>,
}

impl MotionListener {
    pub fn new(config: ShakeConfig, on_shake: impl Fn() + 'static) -> Self {
        Self {
            detector: Rc::new(RefCell::new(ShakeDetector::new(config))),
            on_shake: Rc::new(on_shake),
            handler: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.handler.is_some()
    }

    /// Attach the listener. Returns false when the platform has no motion events.
    pub fn start(&mut self) -> bool {
        if self.is_enabled() {
            return true;
        }
        let Some(window) = web::window() else {
            return false;
        };
        if motion_event_class().is_none() {
            log::info!("[motion] DeviceMotionEvent not supported");
            return false;
        }
        let detector = self.detector.clone();
        let on_shake = self.on_shake.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::DeviceMotionEvent| {
            let Some(acc) = ev.acceleration_including_gravity() else {
                return;
            };
            let sample = MotionSample::new(
                acc.x().unwrap_or(0.0),
                acc.y().unwrap_or(0.0),
                acc.z().unwrap_or(0.0),
                dom::now_ms(),
            );
            let fired = detector.borrow_mut().process(sample);
            if fired {
                on_shake();
            }
        }) as Box<dyn FnMut(web::DeviceMotionEvent)>);
        if let Err(e) =
            window.add_event_listener_with_callback("devicemotion", closure.as_ref().unchecked_ref())
        {
            log::warn!("[motion] listener error: {:?}", e);
            return false;
        }
        self.handler = Some(closure);
        log::info!("[motion] listening");
        true
    }

    pub fn stop(&mut self) {
        let Some(closure) = self.handler.take() else {
            return;
        };
        if let Some(window) = web::window() {
            _ = window.remove_event_listener_with_callback(
                "devicemotion",
                closure.as_ref().unchecked_ref(),
            );
        }
        self.detector.borrow_mut().reset();
    }
}

/// Detach while the page is hidden and reattach when it is shown again.
pub fn wire_page_visibility(listener: Rc<RefCell<MotionListener>>) {
    let Some(window) = web::window() else {
        return;
    };
    let was_enabled = Rc::new(std::cell::Cell::new(false));

    let hide_listener = listener.clone();
    let hide_flag = was_enabled.clone();
    let on_hide = Closure::wrap(Box::new(move |_ev: web::Event| {
        let mut l = hide_listener.borrow_mut();
        hide_flag.set(l.is_enabled());
        l.stop();
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback("pagehide", on_hide.as_ref().unchecked_ref());
    on_hide.forget();

    let on_show = Closure::wrap(Box::new(move |_ev: web::Event| {
        if was_enabled.replace(false) {
            listener.borrow_mut().start();
        }
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback("pageshow", on_show.as_ref().unchecked_ref());
    on_show.forget();
}

/// Ask for motion access and start `listener` on "granted".
///
/// Resolves false on denial, on a rejected request, or when there is no
/// permission API to ask.
pub async fn request_permission(listener: Rc<RefCell<MotionListener>>) -> bool {
    let Some((class, func)) = permission_fn() else {
        return false;
    };
    let promise = match func.call0(&class) {
        Ok(v) => match v.dyn_into::<js_sys::Promise>() {
            Ok(p) => p,
            Err(_) => return false,
        },
        Err(e) => {
            log::warn!("[motion] permission request failed: {:?}", e);
            return false;
        }
    };
    match JsFuture::from(promise).await {
        Ok(state) if state.as_string().as_deref() == Some("granted") => {
            listener.borrow_mut().start()
        }
        Ok(state) => {
            log::info!("[motion] permission {:?}", state.as_string());
            false
        }
        Err(e) => {
            log::warn!("[motion] permission request failed: {:?}", e);
            false
        }
    }
}
