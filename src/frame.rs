use crate::audio::MagicSound;
use crate::constants::{MAX_FRAME_DT_SEC, SHAKE_GLOW_MAX};
use crate::dom;
use crate::input::PointerState;
use crate::overlay;
use crate::render;
use glam::Vec2;
use globe_core::{
    select, Camera, CameraRig, CapabilityTier, GlobeSpin, Lang, ParticleField, PredictionReveal,
    ShakePhase, ShakeSession, TierConfig, TierSlot,
};
use instant::Instant;
use rand::rngs::StdRng;
use rand::Rng;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub gpu: Option<render::GpuState<'a>>,
    pub canvas: web::HtmlCanvasElement,
    pub document: web::Document,

    pub field: ParticleField,
    pub session: ShakeSession,
    pub spin: GlobeSpin,
    pub reveal: PredictionReveal,
    pub rig: CameraRig,
    pub camera: Camera,
    pub sound: Option<MagicSound>,

    pub pointer: Rc<RefCell<PointerState>>,
    pub gesture_queued: Rc<Cell<bool>>,
    pub lang: Rc<Cell<Lang>>,
    pub shown_lang: Lang,

    pub tier: Rc<RefCell<TierSlot>>,
    pub applied_tier: CapabilityTier,
    pub max_pixel_ratio: Rc<Cell<f64>>,

    pub rng: StdRng,
    pub started: Instant,
    pub last_instant: Instant,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant)
            .as_secs_f32()
            .min(MAX_FRAME_DT_SEC);
        self.last_instant = now;
        let now_sec = (now - self.started).as_secs_f64();

        self.apply_resolved_tier();

        let lang = self.lang.get();
        if lang != self.shown_lang {
            self.reveal.clear();
            overlay::clear_prediction(&self.document);
            self.shown_lang = lang;
        }

        if self.gesture_queued.replace(false) {
            if self.session.trigger(now_sec) {
                log::info!("[session] shake at {:.2}s", now_sec);
            } else {
                log::debug!("[session] gesture ignored while shaking");
            }
        }

        let events = self.session.advance(now_sec);
        if events.impulse {
            let kick = Vec2::new(
                self.rng.gen_range(-1.0..=1.0),
                self.rng.gen_range(-1.0..=1.0),
            );
            self.spin.begin(now_sec, kick);
            self.reveal.clear();
            overlay::clear_prediction(&self.document);
            if let Some(sound) = &mut self.sound {
                sound.play(now_sec);
            }
        }
        if events.reveal {
            let text = select(lang, &mut self.rng);
            self.reveal.show(text);
            overlay::show_prediction(&self.document, text);
        }
        if events.finished {
            log::info!("[session] idle");
        }

        self.field.step(events.impulse, dt_sec);
        self.spin
            .update(self.session.is_shaking(), now_sec, dt_sec);
        if let Some(pose) = self.reveal.advance(dt_sec) {
            overlay::apply_prediction_pose(&self.document, &pose);
        }
        let pointer = *self.pointer.borrow();
        let sway = if pointer.inside { pointer.ndc } else { Vec2::ZERO };
        self.rig.follow(&mut self.camera, sway, dt_sec);
        if let Some(sound) = &mut self.sound {
            sound.update(now_sec);
        }

        let glow = self.shake_glow(now_sec);
        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(self.canvas.width(), self.canvas.height());
            self.camera.aspect = g.aspect();
            let scene = render::SceneFrame {
                view_proj: self.camera.view_projection(),
                projection: self.camera.projection_matrix(),
                eye: self.camera.eye,
                model: self.spin.model_matrix(),
                positions: self.field.positions(),
                glow,
            };
            if let Err(e) = g.render(dt_sec, &scene) {
                log::error!("render error: {:?}", e);
            }
        }
    }

    fn apply_resolved_tier(&mut self) {
        let Some(tier) = self.tier.borrow().get() else {
            return;
        };
        if tier == self.applied_tier {
            return;
        }
        let config: &TierConfig = tier.config();
        self.field.reconfigure(config.snow);
        self.max_pixel_ratio.set(config.max_pixel_ratio);
        dom::sync_canvas_backing_size(&self.canvas, config.max_pixel_ratio);
        if let Some(g) = &mut self.gpu {
            g.apply_tier(config);
        }
        self.applied_tier = tier;
    }

    /// Warm tint that swells and fades over a shake.
    fn shake_glow(&self, now_sec: f64) -> f32 {
        match self.session.phase() {
            ShakePhase::Shaking { started_at, .. } => {
                let duration = self.session.timing().duration_sec.max(1e-3);
                let p = ((now_sec - started_at) / duration).clamp(0.0, 1.0) as f32;
                SHAKE_GLOW_MAX * (std::f32::consts::PI * p).sin()
            }
            ShakePhase::Idle => 0.0,
        }
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    tier: &TierConfig,
) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas, tier).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
            _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
