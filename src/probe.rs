use crate::constants::{PROBE_CANVAS_SIZE, PROBE_DRAW_CALLS, UNMASKED_RENDERER_WEBGL};
use crate::dom;
use globe_core::{detect, fps_from_frames, CapabilityTier, ProbeHost, ProbePlan};
use wasm_bindgen::JsCast;
use web_sys as web;

/// WebGL context used for probing; WebGL2 when available.
enum ProbeGl {
    Gl2(web::WebGl2RenderingContext),
    Gl1(web::WebGlRenderingContext),
}

impl ProbeGl {
    fn acquire(canvas: &web::HtmlCanvasElement) -> Option<Self> {
        if let Ok(Some(ctx)) = canvas.get_context("webgl2") {
            if let Ok(gl) = ctx.dyn_into::<web::WebGl2RenderingContext>() {
                return Some(ProbeGl::Gl2(gl));
            }
        }
        if let Ok(Some(ctx)) = canvas.get_context("webgl") {
            if let Ok(gl) = ctx.dyn_into::<web::WebGlRenderingContext>() {
                return Some(ProbeGl::Gl1(gl));
            }
        }
        None
    }

    fn renderer(&self) -> Option<String> {
        let (ext, param) = match self {
            ProbeGl::Gl2(gl) => (
                gl.get_extension("WEBGL_debug_renderer_info"),
                gl.get_parameter(UNMASKED_RENDERER_WEBGL),
            ),
            ProbeGl::Gl1(gl) => (
                gl.get_extension("WEBGL_debug_renderer_info"),
                gl.get_parameter(UNMASKED_RENDERER_WEBGL),
            ),
        };
        // The parameter is only meaningful once the extension is enabled
        match ext {
            Ok(Some(_)) => param.ok().and_then(|v| v.as_string()),
            _ => None,
        }
    }

    fn prepare(&self) {
        match self {
            ProbeGl::Gl2(gl) => gl.clear_color(0.1, 0.1, 0.1, 1.0),
            ProbeGl::Gl1(gl) => gl.clear_color(0.1, 0.1, 0.1, 1.0),
        }
    }

    /// Fixed synthetic load for one frame.
    fn draw_load(&self) {
        match self {
            ProbeGl::Gl2(gl) => {
                gl.clear(web::WebGl2RenderingContext::COLOR_BUFFER_BIT);
                for _ in 0..PROBE_DRAW_CALLS {
                    gl.draw_arrays(web::WebGl2RenderingContext::TRIANGLES, 0, 3);
                }
            }
            ProbeGl::Gl1(gl) => {
                gl.clear(web::WebGlRenderingContext::COLOR_BUFFER_BIT);
                for _ in 0..PROBE_DRAW_CALLS {
                    gl.draw_arrays(web::WebGlRenderingContext::TRIANGLES, 0, 3);
                }
            }
        }
    }
}

pub struct WebProbeHost {
    document: web::Document,
}

impl WebProbeHost {
    pub fn new(document: web::Document) -> Self {
        Self { document }
    }

    fn create_canvas(&self) -> Option<web::HtmlCanvasElement> {
        let canvas = self
            .document
            .create_element("canvas")
            .ok()?
            .dyn_into::<web::HtmlCanvasElement>()
            .ok()?;
        canvas.set_width(PROBE_CANVAS_SIZE);
        canvas.set_height(PROBE_CANVAS_SIZE);
        Some(canvas)
    }

    async fn run_window(gl: &ProbeGl, window_ms: f64) -> f64 {
        gl.prepare();
        let start = dom::now_ms();
        let mut frames = 0u32;
        loop {
            dom::next_animation_frame().await;
            let elapsed = dom::now_ms() - start;
            if elapsed >= window_ms {
                return fps_from_frames(frames, elapsed);
            }
            gl.draw_load();
            frames += 1;
        }
    }
}

impl ProbeHost for WebProbeHost {
    fn renderer_info(&mut self) -> Option<String> {
        let canvas = self.create_canvas()?;
        ProbeGl::acquire(&canvas)?.renderer()
    }

    async fn measure_fps(&mut self, window_ms: f64) -> Option<f64> {
        let canvas = self.create_canvas()?;
        _ = canvas
            .style()
            .set_css_text("position:fixed;top:-9999px;left:-9999px;pointer-events:none");
        let body = self.document.body()?;
        if body.append_child(&canvas).is_err() {
            return None;
        }
        let fps = match ProbeGl::acquire(&canvas) {
            Some(gl) => Some(Self::run_window(&gl, window_ms).await),
            None => None,
        };
        canvas.remove();
        fps
    }

    async fn pause(&mut self, ms: f64) {
        dom::sleep_ms(ms as i32).await;
    }
}

/// Run the startup capability probe against the page.
pub async fn detect_tier(document: web::Document) -> CapabilityTier {
    let mut host = WebProbeHost::new(document);
    detect(&mut host, &ProbePlan::default()).await
}
