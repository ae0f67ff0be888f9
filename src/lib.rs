#![cfg(target_arch = "wasm32")]
use crate::constants::{CANVAS_ID, LANG_TOGGLE_ID, LOADER_MIN_MS, MAGIC_SOUND_URL};
use globe_core::{
    provisional_config, Camera, CameraRig, GlobeSpin, LaunchOptions, ParticleField,
    PredictionReveal, ShakeSession, TierSlot,
};
use instant::Instant;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod probe;
mod render;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement, max_pixel_ratio: Rc<Cell<f64>>) {
    dom::sync_canvas_backing_size(canvas, max_pixel_ratio.get());
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize, max_pixel_ratio.get());
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

/// Resolve the session tier: from the launch options when forced, otherwise
/// from the background probe. Rendering starts on the provisional tier meanwhile.
fn resolve_tier(options: &LaunchOptions, slot: &Rc<RefCell<TierSlot>>, document: &web::Document) {
    match options.forced_tier {
        Some(tier) => {
            log::info!("[quality] forced tier={}", tier.as_str());
            slot.borrow_mut().resolve(tier);
        }
        None => {
            let slot = slot.clone();
            let document = document.clone();
            spawn_local(async move {
                let tier = probe::detect_tier(document).await;
                slot.borrow_mut().resolve(tier);
            });
        }
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("snowglobe-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let search = window.location().search().unwrap_or_default();
    let options = LaunchOptions::from_query(&search);
    log::info!(
        "[options] lang={} threshold={} seed={:?}",
        options.lang.code(),
        options.shake.threshold,
        options.seed
    );

    let tier_slot = Rc::new(RefCell::new(TierSlot::default()));
    resolve_tier(&options, &tier_slot, &document);
    let initial = tier_slot
        .borrow()
        .get()
        .map(|t| t.config())
        .unwrap_or_else(provisional_config);

    let max_pixel_ratio = Rc::new(Cell::new(initial.max_pixel_ratio));
    wire_canvas_resize(&canvas, max_pixel_ratio.clone());

    // ---------------- Interaction state ----------------
    let lang = Rc::new(Cell::new(options.lang));
    overlay::set_lang_label(&document, options.lang);
    let gesture_queued = Rc::new(Cell::new(false));
    let pointer = Rc::new(RefCell::new(input::PointerState::default()));

    let gesture_from_motion = gesture_queued.clone();
    let motion = Rc::new(RefCell::new(events::MotionListener::new(
        options.shake,
        move || gesture_from_motion.set(true),
    )));
    // Platforms with a permission gate start from the first tap instead
    if !events::motion::needs_permission() {
        motion.borrow_mut().start();
    }
    events::motion::wire_page_visibility(motion.clone());

    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        pointer: pointer.clone(),
        gesture_queued: gesture_queued.clone(),
        motion,
    });
    events::wire_global_keydown(gesture_queued.clone(), lang.clone());
    let lang_button = lang.clone();
    dom::add_click_listener(&document, LANG_TOGGLE_ID, move || {
        events::toggle_language(&lang_button)
    });

    spawn_local(async {
        dom::sleep_ms(LOADER_MIN_MS).await;
        overlay::dismiss_loader().await;
    });

    let gpu = frame::init_gpu(&canvas, initial).await;

    let seed = options.seed.unwrap_or_else(rand::random);
    let now = Instant::now();
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        gpu,
        canvas,
        document,
        field: ParticleField::new(initial.snow, seed),
        session: ShakeSession::default(),
        spin: GlobeSpin::default(),
        reveal: PredictionReveal::default(),
        rig: CameraRig::default(),
        camera: Camera::default(),
        sound: audio::MagicSound::new(MAGIC_SOUND_URL),
        pointer,
        gesture_queued,
        lang: lang.clone(),
        shown_lang: lang.get(),
        tier: tier_slot,
        applied_tier: initial.tier,
        max_pixel_ratio,
        rng: StdRng::seed_from_u64(seed.wrapping_add(1)),
        started: now,
        last_instant: now,
    }));
    frame::start_loop(frame_ctx);

    Ok(())
}
