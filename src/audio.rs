use globe_core::SoundEnvelope;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// One-shot gesture sound played from an audio file and faded by the frame loop.
pub struct MagicSound {
    element: web::HtmlAudioElement,
    envelope: SoundEnvelope,
    started_at: Option<f64>,
}

impl MagicSound {
    /// Returns `None` (after logging) when the audio element cannot be created.
    pub fn new(src: &str) -> Option<Self> {
        match web::HtmlAudioElement::new_with_src(src) {
            Ok(element) => {
                element.set_preload("auto");
                Some(Self {
                    element,
                    envelope: SoundEnvelope::default(),
                    started_at: None,
                })
            }
            Err(e) => {
                log::warn!("audio element error: {:?}", e);
                None
            }
        }
    }

    /// Restart playback from the beginning at the envelope's start volume.
    pub fn play(&mut self, now_sec: f64) {
        self.element.set_current_time(0.0);
        self.element.set_volume(self.envelope.start_volume as f64);
        match self.element.play() {
            Ok(promise) => spawn_local(async move {
                if let Err(e) = JsFuture::from(promise).await {
                    log::warn!("audio playback failed: {:?}", e);
                }
            }),
            Err(e) => log::warn!("audio playback failed: {:?}", e),
        }
        self.started_at = Some(now_sec);
    }

    pub fn update(&mut self, now_sec: f64) {
        let Some(t0) = self.started_at else {
            return;
        };
        match self.envelope.volume_at(now_sec - t0) {
            Some(volume) => self.element.set_volume(volume as f64),
            None => {
                self.element.set_volume(0.0);
                _ = self.element.pause();
                self.element.set_current_time(0.0);
                self.started_at = None;
            }
        }
    }
}
