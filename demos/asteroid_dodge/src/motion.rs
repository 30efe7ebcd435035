use fastrand::Rng;

use crate::config::{Playfield, RespawnPolicy};
use crate::entities::Asteroid;

/// Advance one asteroid by one tick.
///
/// Returns `true` if the asteroid reached the bottom edge and was
/// respawned according to `policy`. Under [`RespawnPolicy::ResetToTop`] the
/// asteroid's `y` stays in `[-height, field.height)` after every call.
pub fn advance(
    asteroid: &mut Asteroid,
    field: &Playfield,
    policy: RespawnPolicy,
    rng: &mut Rng,
) -> bool {
    asteroid.y += asteroid.speed;
    if asteroid.y < field.height {
        return false;
    }

    match policy {
        RespawnPolicy::ResetToTop => {
            asteroid.y = -asteroid.height;
            asteroid.x = respawn_offset(field.width, asteroid.width, rng);
        }
        RespawnPolicy::Legacy => {
            // The reset never sticks: the asteroid keeps its overflowed y and x.
        }
    }
    true
}

/// Advance every asteroid in order. Returns how many wrapped this tick.
pub fn advance_all(
    asteroids: &mut [Asteroid],
    field: &Playfield,
    policy: RespawnPolicy,
    rng: &mut Rng,
) -> usize {
    asteroids
        .iter_mut()
        .map(|asteroid| advance(asteroid, field, policy, rng))
        .filter(|&wrapped| wrapped)
        .count()
}

/// Whole-pixel offset sampled uniformly from `[0, field_width - width)`.
///
/// Falls back to `0` when the asteroid is at least as wide as the field, or
/// when the width is NaN.
fn respawn_offset(field_width: f32, width: f32, rng: &mut Rng) -> f32 {
    let span = (field_width - width).ceil();
    if !(span >= 1.0) {
        return 0.0;
    }
    rng.u32(0..span as u32) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> Playfield {
        Playfield::default()
    }

    #[test]
    fn test_falls_by_speed() {
        let mut rng = Rng::with_seed(1);
        let mut asteroid = Asteroid::new(100.0, 10.0, 3.0, 30.0, 30.0);
        let wrapped = advance(&mut asteroid, &field(), RespawnPolicy::ResetToTop, &mut rng);
        assert!(!wrapped);
        assert_eq!(asteroid.y, 13.0);
        assert_eq!(asteroid.x, 100.0);
    }

    #[test]
    fn test_just_above_bottom_does_not_wrap() {
        let mut rng = Rng::with_seed(1);
        let mut asteroid = Asteroid::new(100.0, 589.0, 10.0, 30.0, 20.0);
        assert!(!advance(&mut asteroid, &field(), RespawnPolicy::ResetToTop, &mut rng));
        assert_eq!(asteroid.y, 599.0);
    }

    #[test]
    fn test_reaching_bottom_edge_wraps() {
        let mut rng = Rng::with_seed(1);
        let mut asteroid = Asteroid::new(100.0, 590.0, 10.0, 30.0, 20.0);
        assert!(advance(&mut asteroid, &field(), RespawnPolicy::ResetToTop, &mut rng));
        assert_eq!(asteroid.y, -20.0);
    }

    #[test]
    fn test_wrap_resets_to_top() {
        let mut rng = Rng::with_seed(7);
        let mut asteroid = Asteroid::new(100.0, 595.0, 10.0, 30.0, 20.0);
        assert!(advance(&mut asteroid, &field(), RespawnPolicy::ResetToTop, &mut rng));
        assert_eq!(asteroid.y, -20.0);
        assert!(asteroid.x >= 0.0 && asteroid.x < 800.0 - 30.0);
    }

    #[test]
    fn test_legacy_wrap_keeps_overflowed_position() {
        for seed in [0, 7, 99] {
            let mut rng = Rng::with_seed(seed);
            let mut asteroid = Asteroid::new(100.0, 595.0, 10.0, 30.0, 20.0);
            assert!(advance(&mut asteroid, &field(), RespawnPolicy::Legacy, &mut rng));
            assert_eq!(asteroid.y, 605.0);
            assert_eq!(asteroid.x, 100.0);
        }
    }

    #[test]
    fn test_legacy_wrap_keeps_falling() {
        let mut rng = Rng::with_seed(7);
        let mut asteroid = Asteroid::new(100.0, 605.0, 10.0, 30.0, 20.0);
        assert!(advance(&mut asteroid, &field(), RespawnPolicy::Legacy, &mut rng));
        assert_eq!(asteroid.y, 615.0);
    }

    #[test]
    fn test_same_seed_same_respawn() {
        let run = |seed| {
            let mut rng = Rng::with_seed(seed);
            let mut asteroid = Asteroid::new(0.0, 599.0, 5.0, 30.0, 30.0);
            advance(&mut asteroid, &field(), RespawnPolicy::ResetToTop, &mut rng);
            asteroid
        };
        assert_eq!(run(42), run(42));
    }

    #[test]
    fn test_respawn_stays_in_range_over_many_seeds() {
        for seed in 0..500 {
            let mut rng = Rng::with_seed(seed);
            let mut asteroid = Asteroid::new(0.0, 600.0, 1.0, 45.5, 30.0);
            advance(&mut asteroid, &field(), RespawnPolicy::ResetToTop, &mut rng);
            assert!(asteroid.x >= 0.0 && asteroid.x < 800.0 - 45.5, "x = {}", asteroid.x);
        }
    }

    #[test]
    fn test_oversized_asteroid_respawns_at_zero() {
        let mut rng = Rng::with_seed(3);
        let mut asteroid = Asteroid::new(50.0, 600.0, 1.0, 900.0, 30.0);
        advance(&mut asteroid, &field(), RespawnPolicy::ResetToTop, &mut rng);
        assert_eq!(asteroid.x, 0.0);
        assert_eq!(asteroid.y, -30.0);
    }

    #[test]
    fn test_nan_width_respawns_at_zero() {
        let mut rng = Rng::with_seed(3);
        let mut asteroid = Asteroid::new(50.0, 600.0, 1.0, f32::NAN, 30.0);
        assert!(advance(&mut asteroid, &field(), RespawnPolicy::ResetToTop, &mut rng));
        assert_eq!(asteroid.x, 0.0);
        assert_eq!(asteroid.y, -30.0);
    }

    #[test]
    fn test_advance_all_counts_wraps() {
        let mut rng = Rng::with_seed(11);
        let mut asteroids = vec![
            Asteroid::new(0.0, 0.0, 2.0, 30.0, 30.0),
            Asteroid::new(0.0, 599.0, 2.0, 30.0, 30.0),
            Asteroid::new(0.0, 598.0, 5.0, 30.0, 30.0),
        ];
        let wrapped = advance_all(&mut asteroids, &field(), RespawnPolicy::ResetToTop, &mut rng);
        assert_eq!(wrapped, 2);
        assert_eq!(asteroids[0].y, 2.0);
        assert_eq!(asteroids[1].y, -30.0);
        assert_eq!(asteroids[2].y, -30.0);
    }
}
