// Host-side tests for the dust field.

use rand::rngs::StdRng;
use rand::SeedableRng;
use trashworld_core::{DustField, SceneError};

#[test]
fn dust_stays_within_one_step_of_the_cube() {
    let (area, speed) = (50.0, 0.9);
    let mut dust = DustField::initialize(400, area, speed, &mut StdRng::seed_from_u64(4)).unwrap();
    let limit = area / 2.0 + speed + 1e-4;
    for _ in 0..2_000 {
        dust.tick();
        for p in dust.positions() {
            assert!(p.abs().max_element() <= limit, "{p:?}");
        }
    }
}

#[test]
fn velocity_magnitudes_never_change() {
    let mut dust = DustField::initialize(100, 10.0, 0.5, &mut StdRng::seed_from_u64(8)).unwrap();
    let before: Vec<_> = dust.velocities().iter().map(|v| v.abs()).collect();
    for _ in 0..300 {
        dust.tick();
    }
    for (v, b) in dust.velocities().iter().zip(&before) {
        assert_eq!(v.abs(), *b);
    }
}

#[test]
fn degenerate_dust_is_rejected() {
    let mut rng = StdRng::seed_from_u64(0);
    assert!(matches!(
        DustField::initialize(0, 10.0, 0.1, &mut rng),
        Err(SceneError::Config(_))
    ));
    assert!(DustField::initialize(10, 0.0, 0.1, &mut rng).is_err());
    assert!(DustField::initialize(10, 10.0, -1.0, &mut rng).is_err());
}
