use crate::input::{action_for_key, KeyAction};
use crate::overlay;
use globe_core::Lang;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Flip the UI language and update the toggle label.
pub fn toggle_language(lang: &Rc<Cell<Lang>>) {
    let next = lang.get().toggled();
    lang.set(next);
    if let Some(document) = crate::dom::window_document() {
        overlay::set_lang_label(&document, next);
    }
    log::info!("[keys] lang={}", next.code());
}

pub fn handle_global_keydown(
    ev: &web::KeyboardEvent,
    gesture_queued: &Rc<Cell<bool>>,
    lang: &Rc<Cell<Lang>>,
) {
    if ev.repeat() {
        return;
    }
    match action_for_key(&ev.key()) {
        Some(KeyAction::Shake) => {
            gesture_queued.set(true);
            ev.prevent_default();
        }
        Some(KeyAction::ToggleLanguage) => toggle_language(lang),
        None => {}
    }
}

pub fn wire_global_keydown(gesture_queued: Rc<Cell<bool>>, lang: Rc<Cell<Lang>>) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &gesture_queued, &lang);
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
