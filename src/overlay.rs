use crate::constants::{LANG_TOGGLE_ID, LOADER_FADE_MS, LOADER_ID, PREDICTION_ID, REVEAL_PX_PER_UNIT};
use crate::dom;
use globe_core::{Lang, RevealPose};
use wasm_bindgen::JsCast;
use web_sys as web;

fn html_element(document: &web::Document, id: &str) -> Option<web::HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
}

/// Fade the loader out and drop it from the page.
pub async fn dismiss_loader() {
    let Some(document) = dom::window_document() else {
        return;
    };
    if let Some(el) = document.get_element_by_id(LOADER_ID) {
        _ = el.class_list().add_1("fade-out");
        dom::sleep_ms(LOADER_FADE_MS).await;
        el.remove();
    }
}

#[inline]
pub fn set_lang_label(document: &web::Document, lang: Lang) {
    if let Some(el) = document.get_element_by_id(LANG_TOGGLE_ID) {
        el.set_text_content(Some(lang.label()));
    }
}

pub fn show_prediction(document: &web::Document, text: &str) {
    if let Some(el) = html_element(document, PREDICTION_ID) {
        el.set_text_content(Some(text));
        _ = el.class_list().add_1("visible");
        _ = el.style().set_property("opacity", "0");
    }
}

pub fn clear_prediction(document: &web::Document) {
    if let Some(el) = html_element(document, PREDICTION_ID) {
        _ = el.class_list().remove_1("visible");
        _ = el.style().set_property("opacity", "0");
        el.set_text_content(None);
    }
}

/// Map the 3D reveal pose onto the overlay element.
pub fn apply_prediction_pose(document: &web::Document, pose: &RevealPose) {
    if let Some(el) = html_element(document, PREDICTION_ID) {
        let style = el.style();
        let px = pose.position * REVEAL_PX_PER_UNIT;
        let transform = format!(
            "translate(-50%, -50%) translate3d({:.1}px, {:.1}px, {:.1}px) rotateX({:.4}rad) scale({:.4})",
            px.x, -px.y, px.z, -pose.tilt, pose.scale
        );
        _ = style.set_property("transform", &transform);
        _ = style.set_property("opacity", &format!("{:.3}", pose.opacity));
    }
}
