// Host-side tests for the shake session, globe spin, prediction reveal and camera rig.

use glam::{Vec2, Vec3};
use globe_core::{
    ease_in_out_cubic, Camera, CameraRig, EdgeTrigger, GlobeSpin, PredictionReveal, RevealPose,
    SessionEvents, ShakePhase, ShakeSession,
};
use std::f32::consts::{PI, TAU};

const DT: f32 = 1.0 / 60.0;

/// Drive a session frame by frame from `from` to `to` seconds, collecting events.
fn run(session: &mut ShakeSession, from: f64, to: f64) -> Vec<(f64, SessionEvents)> {
    let mut out = Vec::new();
    let mut t = from;
    while t <= to {
        let ev = session.advance(t);
        if ev != SessionEvents::default() {
            out.push((t, ev));
        }
        t += DT as f64;
    }
    out
}

#[test]
fn edge_trigger_fires_on_rising_edges_only() {
    let mut e = EdgeTrigger::default();
    assert!(!e.rising(false));
    assert!(e.rising(true));
    assert!(!e.rising(true));
    assert!(!e.rising(false));
    assert!(e.rising(true));
}

#[test]
fn session_emits_one_impulse_one_reveal_then_finishes() {
    let mut s = ShakeSession::default();
    assert!(s.trigger(0.0));
    let events = run(&mut s, 0.0, 7.0);

    let impulses: Vec<f64> = events.iter().filter(|e| e.1.impulse).map(|e| e.0).collect();
    let reveals: Vec<f64> = events.iter().filter(|e| e.1.reveal).map(|e| e.0).collect();
    let finishes: Vec<f64> = events.iter().filter(|e| e.1.finished).map(|e| e.0).collect();
    assert_eq!(impulses, vec![0.0]);
    assert_eq!(reveals.len(), 1);
    assert!(reveals[0] >= 1.0 && reveals[0] < 1.0 + 2.0 * DT as f64);
    assert_eq!(finishes.len(), 1);
    assert!(finishes[0] >= 6.0 && finishes[0] < 6.0 + 2.0 * DT as f64);
    assert_eq!(s.phase(), ShakePhase::Idle);
}

#[test]
fn gestures_while_shaking_are_ignored() {
    let mut s = ShakeSession::default();
    assert!(s.trigger(0.0));
    assert!(s.advance(0.0).impulse);
    assert!(!s.trigger(2.0));
    let ev = s.advance(2.0);
    assert!(!ev.impulse);
    // Still timed from the first gesture
    assert!(s.advance(6.0).finished);
    assert!(!s.is_shaking());
}

#[test]
fn new_gesture_after_finishing_starts_a_fresh_shake() {
    let mut s = ShakeSession::default();
    s.trigger(0.0);
    run(&mut s, 0.0, 6.5);
    assert!(s.trigger(7.0));
    let ev = s.advance(7.0);
    assert!(ev.impulse);
    assert!(!ev.reveal);
    assert!(s.advance(8.0).reveal);
}

#[test]
fn easing_hits_its_endpoints_and_midpoint() {
    assert_eq!(ease_in_out_cubic(0.0), 0.0);
    assert_eq!(ease_in_out_cubic(1.0), 1.0);
    assert!((ease_in_out_cubic(0.5) - 0.5).abs() < 1e-6);
    assert_eq!(ease_in_out_cubic(2.0), 1.0);
    assert!(ease_in_out_cubic(0.25) < 0.25);
}

#[test]
fn spin_makes_one_revolution_per_shake() {
    let mut spin = GlobeSpin::default();
    let y0 = spin.rotation().y;
    spin.begin(0.0, Vec2::ZERO);
    spin.update(true, 3.0, DT);
    assert!((spin.rotation().y - (y0 + PI)).abs() < 1e-4);
    spin.update(true, 6.0, DT);
    assert!((spin.rotation().y - (y0 + TAU)).abs() < 1e-4);
}

#[test]
fn idle_spin_drifts_slowly() {
    let mut spin = GlobeSpin::default();
    for _ in 0..60 {
        spin.update(false, 0.0, DT);
    }
    assert!((spin.rotation().y - 0.12).abs() < 1e-3);
}

#[test]
fn tilt_kick_decays_back_to_upright() {
    let mut spin = GlobeSpin::default();
    spin.begin(0.0, Vec2::new(1.0, -1.0));
    let kicked = spin.rotation();
    assert!(kicked.x > 0.0 && kicked.z < 0.0);
    for i in 1..=120 {
        spin.update(true, i as f64 * DT as f64, DT);
    }
    assert!(spin.rotation().x.abs() < kicked.x.abs() * 0.01);
    assert!(spin.rotation().z.abs() < kicked.z.abs() * 0.01);
}

#[test]
fn reveal_floats_up_and_fades_in() {
    let mut reveal = PredictionReveal::default();
    assert!(reveal.advance(DT).is_none());
    reveal.show("hello");
    assert_eq!(reveal.text(), Some("hello"));
    assert_eq!(reveal.pose(), Some(RevealPose::start()));

    let mut last_opacity = 0.0;
    let mut last_dist = RevealPose::start().position.length();
    for _ in 0..600 {
        let pose = reveal.advance(DT).expect("pose while shown");
        assert!(pose.opacity >= last_opacity && pose.opacity <= 1.0);
        assert!(pose.position.length() <= last_dist);
        last_opacity = pose.opacity;
        last_dist = pose.position.length();
    }
    let pose = reveal.pose().expect("pose while shown");
    assert!(pose.position.length() < 0.01);
    assert!(pose.tilt.abs() < 0.02);
    assert!((pose.scale - 1.0).abs() < 0.01);
    assert!(pose.opacity > 0.8);

    reveal.clear();
    assert_eq!(reveal.text(), None);
    assert!(reveal.advance(DT).is_none());
}

#[test]
fn camera_rig_eases_toward_pointer_sway() {
    let mut camera = Camera::default();
    let mut rig = CameraRig::default();
    for _ in 0..300 {
        rig.follow(&mut camera, Vec2::new(1.0, -1.0), DT);
    }
    assert!((camera.eye - Vec3::new(0.5, -0.5, 3.5)).length() < 1e-3);
    assert_eq!(camera.target, Vec3::ZERO);

    // Out-of-range pointer input is clamped
    for _ in 0..300 {
        rig.follow(&mut camera, Vec2::new(5.0, 0.0), DT);
    }
    assert!((rig.offset() - Vec2::new(0.5, 0.0)).length() < 1e-3);
}

#[test]
fn default_camera_looks_at_the_globe() {
    let camera = Camera::default();
    let clip = camera.view_projection() * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
    let ndc = clip.truncate() / clip.w;
    assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
    assert!(ndc.z > 0.0 && ndc.z < 1.0);
}
