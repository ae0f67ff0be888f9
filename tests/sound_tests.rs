// Host-side tests for the magic sound volume envelope.

use globe_core::SoundEnvelope;

#[test]
fn holds_start_volume_until_fade_begins() {
    let env = SoundEnvelope::default();
    assert_eq!(env.volume_at(0.0), Some(0.5));
    assert_eq!(env.volume_at(3.0), Some(0.5));
    assert_eq!(env.volume_at(5.99), Some(0.5));
}

#[test]
fn steps_down_every_interval_then_stops() {
    let env = SoundEnvelope::default();
    assert_eq!(env.fade_steps(), 9);
    assert!((env.duration_sec() - 7.0).abs() < 1e-9);

    let v = env.volume_at(6.15).expect("still playing");
    assert!((v - 0.45).abs() < 1e-6);
    let v = env.volume_at(6.95).expect("still playing");
    assert!((v - 0.05).abs() < 1e-6);
    assert_eq!(env.volume_at(7.05), None);
    assert_eq!(env.volume_at(60.0), None);
}

#[test]
fn volume_never_rises_and_never_drops_below_floor() {
    let env = SoundEnvelope::default();
    let mut last = f32::MAX;
    let mut t = 0.0;
    while let Some(v) = env.volume_at(t) {
        assert!(v <= last);
        assert!(v >= env.fade_floor);
        last = v;
        t += 0.01;
    }
    assert!(t >= 7.0 - 0.011);
}

#[test]
fn zero_step_never_fades() {
    let env = SoundEnvelope {
        fade_step: 0.0,
        ..SoundEnvelope::default()
    };
    assert_eq!(env.fade_steps(), 0);
    assert_eq!(env.volume_at(6.05), Some(0.5));
    assert_eq!(env.volume_at(6.2), None);
}
