// Host-side tests for the snow particle field.

use glam::Vec3;
use globe_core::constants::CONTAINER_RADIUS;
use globe_core::{snow_sprite_rgba, surface_height, ParticleField, SnowConfig};

const FRAME: f32 = 1.0 / 60.0;

fn config(count: usize) -> SnowConfig {
    SnowConfig {
        particle_count: count,
        ..SnowConfig::default()
    }
}

fn assert_contained(field: &ParticleField) {
    let r = field.config().container_radius;
    for (i, p) in field.positions().iter().enumerate() {
        assert!(
            p.length() <= r + 1e-4,
            "particle {} escaped: |{:?}| = {}",
            i,
            p,
            p.length()
        );
    }
}

#[test]
fn new_field_starts_inside_container_at_rest() {
    let field = ParticleField::new(config(1500), 1);
    assert_eq!(field.len(), 1500);
    assert_contained(&field);
    assert!(field.velocities().iter().all(|v| *v == Vec3::ZERO));
    assert!(field
        .gravity_factors()
        .iter()
        .all(|g| (0.5..1.5).contains(g)));
    let max_settle = CONTAINER_RADIUS * 0.8;
    assert!(field
        .settle_radii()
        .iter()
        .all(|s| *s >= 0.0 && *s <= max_settle));
}

#[test]
fn same_seed_gives_same_field() {
    let a = ParticleField::new(config(64), 99);
    let b = ParticleField::new(config(64), 99);
    assert_eq!(a.positions(), b.positions());
    assert_eq!(a.settle_radii(), b.settle_radii());
}

#[test]
fn particles_stay_contained_through_repeated_shakes() {
    let mut field = ParticleField::new(config(800), 7);
    for frame in 0..900 {
        let triggered = frame % 120 == 0;
        // Mix of frame lengths, including a long stall
        let dt = match frame % 3 {
            0 => FRAME,
            1 => 1.0 / 30.0,
            _ => 0.1,
        };
        field.step(triggered, dt);
        assert_contained(&field);
    }
}

#[test]
fn impulse_launches_every_particle_upward_once() {
    let mut field = ParticleField::new(config(200), 3);
    for i in 0..field.len() {
        field.place(i, Vec3::ZERO, Vec3::ZERO);
    }
    field.step(true, FRAME);
    let after_impulse: Vec<f32> = field.velocities().iter().map(|v| v.y).collect();
    assert!(after_impulse.iter().all(|vy| *vy > 0.0));

    // Without a new trigger drag and gravity only slow them down
    field.step(false, FRAME);
    for (before, v) in after_impulse.iter().zip(field.velocities()) {
        assert!(v.y < *before);
    }
}

#[test]
fn untriggered_step_adds_no_upward_motion() {
    let mut field = ParticleField::new(config(100), 11);
    for i in 0..field.len() {
        field.place(i, Vec3::new(0.0, 0.2, 0.0), Vec3::ZERO);
    }
    field.step(false, FRAME);
    assert!(field.velocities().iter().all(|v| v.y <= 0.0));
}

#[test]
fn fall_is_independent_of_frame_rate() {
    let start = Vec3::new(0.1, 0.5, -0.1);
    let mut at_60 = ParticleField::new(config(1), 5);
    let mut at_30 = ParticleField::new(config(1), 5);
    at_60.place(0, start, Vec3::ZERO);
    at_30.place(0, start, Vec3::ZERO);

    for _ in 0..60 {
        at_60.step(false, 1.0 / 60.0);
    }
    for _ in 0..30 {
        at_30.step(false, 1.0 / 30.0);
    }
    let fell_60 = start.y - at_60.positions()[0].y;
    let fell_30 = start.y - at_30.positions()[0].y;
    assert!(fell_60 > 0.0 && fell_30 > 0.0);
    assert!(
        (fell_60 - fell_30).abs() < fell_60 * 0.1,
        "60 Hz fell {} but 30 Hz fell {}",
        fell_60,
        fell_30
    );
}

#[test]
fn split_frame_matches_single_frame() {
    let start = Vec3::new(0.0, 0.3, 0.0);
    let mut whole = ParticleField::new(config(1), 8);
    let mut halves = ParticleField::new(config(1), 8);
    whole.place(0, start, Vec3::new(0.0, -0.002, 0.0));
    halves.place(0, start, Vec3::new(0.0, -0.002, 0.0));
    whole.step(false, 0.032);
    halves.step(false, 0.016);
    halves.step(false, 0.016);
    let d = (whole.positions()[0] - halves.positions()[0]).length();
    assert!(d < 5e-4, "diverged by {}", d);
}

#[test]
fn particle_resting_at_its_settle_radius_stays_put() {
    let mut field = ParticleField::new(config(1), 21);
    let r = field.config().container_radius;
    let settle = field.settle_radii()[0];
    let rest = Vec3::new(settle, -surface_height(r * r, settle * settle), 0.0);
    field.place(0, rest, Vec3::ZERO);
    for _ in 0..120 {
        field.step(false, FRAME);
    }
    let p = field.positions()[0];
    assert!((p - rest).length() < 1e-5, "moved from {:?} to {:?}", rest, p);
    assert_eq!(field.velocities()[0], Vec3::ZERO);
}

#[test]
fn floor_particle_slides_toward_settle_radius() {
    let mut field = ParticleField::new(config(1), 4);
    let r = field.config().container_radius;
    let settle = field.settle_radii()[0];
    let x0 = r * 0.98;
    field.place(0, Vec3::new(x0, -surface_height(r * r, x0 * x0), 0.0), Vec3::ZERO);

    let mut last = x0;
    for _ in 0..600 {
        field.step(false, FRAME);
        let p = field.positions()[0];
        let xz = (p.x * p.x + p.z * p.z).sqrt();
        assert!(xz <= last + 1e-6);
        assert!(xz >= settle - 1e-5);
        assert!((p.y + surface_height(r * r, xz * xz)).abs() < 1e-4);
        last = xz;
    }
    assert!(last < x0);
}

#[test]
fn top_of_container_stops_upward_motion() {
    let mut field = ParticleField::new(config(1), 2);
    let r = field.config().container_radius;
    field.place(0, Vec3::new(0.0, r - 0.001, 0.0), Vec3::new(0.0, 0.5, 0.0));
    field.step(false, FRAME);
    let p = field.positions()[0];
    assert!((p.y - r).abs() < 1e-5);
    assert_eq!(field.velocities()[0].y, 0.0);
}

#[test]
fn reconfigure_reallocates_for_new_count() {
    let mut field = ParticleField::new(config(1500), 1);
    field.reconfigure(config(500));
    assert_eq!(field.len(), 500);
    assert_eq!(field.velocities().len(), 500);
    assert_eq!(field.config().particle_count, 500);
    assert_contained(&field);
}

#[test]
fn empty_field_steps_without_work() {
    let mut field = ParticleField::new(config(0), 1);
    assert!(field.is_empty());
    field.step(true, FRAME);
    assert_eq!(field.len(), 0);
}

#[test]
fn sprite_is_bright_in_the_middle_and_clear_at_the_corners() {
    let res = 32;
    let px = snow_sprite_rgba(res);
    assert_eq!(px.len(), (res * res * 4) as usize);
    let alpha = |x: u32, y: u32| px[((y * res + x) * 4 + 3) as usize];
    assert!(alpha(res / 2, res / 2) > 230);
    assert_eq!(alpha(0, 0), 0);
    assert!(alpha(res / 2, res / 2) > alpha(res / 2 + 8, res / 2));
    assert!(px.chunks(4).all(|p| p[0] == 255 && p[1] == 255 && p[2] == 255));
}
