// Host-side tests for galaxy generation and the per-frame wave.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use trashworld_core::{GalaxyField, GalaxyGeometry, GalaxyParameters};

fn params(count: usize) -> GalaxyParameters {
    GalaxyParameters {
        count,
        radius: 10.0,
        ..GalaxyParameters::default()
    }
}

fn field(p: &GalaxyParameters, seed: u64) -> GalaxyField {
    let mut field = GalaxyField::new(Vec3::ZERO);
    field
        .generate(p, 0.0, &mut StdRng::seed_from_u64(seed))
        .unwrap();
    field
}

fn live(field: &GalaxyField) -> Vec<Vec3> {
    field.geometry().unwrap().buffer().positions().to_vec()
}

#[test]
fn same_seed_and_time_give_identical_buffers() {
    let p = params(2_000);
    let mut a = field(&p, 7);
    let mut b = field(&p, 7);
    a.apply_wave(1.75);
    b.apply_wave(0.3);
    b.apply_wave(1.75);
    assert_eq!(live(&a), live(&b));
}

#[test]
fn wave_never_drifts_the_baseline() {
    let p = params(1_000);
    let mut f = field(&p, 3);
    let baseline = f.geometry().unwrap().original_positions().to_vec();
    for i in 0..500 {
        f.apply_wave(i as f64 * 0.016);
    }
    assert_eq!(f.geometry().unwrap().original_positions(), &baseline[..]);

    // Back at t = 0 only y differs from the baseline, by the formula amount.
    f.apply_wave(0.0);
    for (p, b) in live(&f).iter().zip(&baseline) {
        assert_eq!(p.x, b.x);
        assert_eq!(p.z, b.z);
    }
}

#[test]
fn wave_runs_for_long_sessions_without_blowing_up() {
    let mut f = field(&params(200), 5);
    f.apply_wave(3.0 * 24.0 * 3600.0);
    let h = GalaxyParameters::default().wave_height;
    let baseline = f.geometry().unwrap().original_positions().to_vec();
    for (p, b) in live(&f).iter().zip(&baseline) {
        assert!(p.y.is_finite());
        assert!((p.y - b.y).abs() <= h + 1e-5);
    }
}

#[test]
fn regeneration_replaces_the_whole_field() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut f = GalaxyField::new(Vec3::ZERO);
    f.generate(&params(1_000), 0.0, &mut rng).unwrap();
    f.regenerate(&params(250), &mut rng).unwrap();
    assert_eq!(f.len(), 250);
    let geo = f.geometry().unwrap();
    assert_eq!(geo.buffer().attribute().len(), 250);
    assert_eq!(geo.original_positions().len(), 250);
    assert_eq!(f.generation(), 2);
}

#[test]
fn colors_lie_between_inside_and_outside() {
    let p = GalaxyParameters {
        inside_color: Vec3::new(1.0, 0.2, 0.0),
        outside_color: Vec3::new(0.0, 0.6, 0.5),
        ..params(3_000)
    };
    let f = field(&p, 21);
    for c in f.geometry().unwrap().buffer().attribute() {
        for ch in 0..3 {
            let (a, b) = (p.inside_color[ch], p.outside_color[ch]);
            assert!(c[ch] >= a.min(b) - 1e-6 && c[ch] <= a.max(b) + 1e-6);
        }
    }
}

#[test]
fn first_particle_sits_on_the_x_axis_and_waves_by_the_formula() {
    let p = GalaxyParameters {
        count: 100,
        radius: 10.0,
        branches: 3,
        spin: 0.0,
        randomness: 0.0,
        randomness_power: 1.0,
        ..GalaxyParameters::default()
    };
    let seed = 42;
    // First draw of the generator is particle 0's radius.
    let r0: f32 = StdRng::seed_from_u64(seed).gen_range(0.0..p.radius);

    let geo = GalaxyGeometry::build(&p, 0.0, &mut StdRng::seed_from_u64(seed)).unwrap();
    let p0 = geo.buffer().positions()[0];
    assert!((p0.x - r0).abs() < 1e-5);
    assert_eq!(p0.y, 0.0);
    assert!(p0.z.abs() < 1e-5);

    let mut f = GalaxyField::new(Vec3::ZERO);
    f.generate(&p, 0.0, &mut StdRng::seed_from_u64(seed)).unwrap();
    f.apply_wave(0.0);
    let expected = (r0 * 2.0).sin() * p.wave_height * (1.0 - r0 / p.radius);
    assert!((live(&f)[0].y - expected).abs() < 1e-5);
}

#[test]
fn oversized_count_is_refused_before_allocating() {
    let mut f = field(&params(100), 1);
    let huge = GalaxyParameters {
        count: trashworld_core::MAX_PARTICLES + 1,
        ..params(100)
    };
    assert!(f
        .generate(&huge, 0.0, &mut StdRng::seed_from_u64(1))
        .is_err());
    assert_eq!(f.len(), 100);
}
