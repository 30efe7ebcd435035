use dodge2d::{KeyCode, KeyInput};

use crate::entities::Ship;

/// Apply one key event to the ship.
///
/// Left and right arrow presses move the ship by `step`; everything else,
/// including releases and auto-repeat, is ignored. There is no clamping, so
/// the ship can leave the screen. Returns whether the ship moved.
pub fn apply_key(ship: &mut Ship, input: &KeyInput, step: f32) -> bool {
    if !input.is_press() {
        return false;
    }
    match input.key {
        KeyCode::ArrowLeft => ship.x -= step,
        KeyCode::ArrowRight => ship.x += step,
        _ => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MOVE_STEP;

    fn ship() -> Ship {
        Ship::new(100.0, 550.0, 50.0, 20.0)
    }

    #[test]
    fn test_arrows_move_by_step() {
        let mut ship = ship();
        assert!(apply_key(&mut ship, &KeyInput::pressed(KeyCode::ArrowLeft), MOVE_STEP));
        assert_eq!(ship.x, 90.0);
        assert!(apply_key(&mut ship, &KeyInput::pressed(KeyCode::ArrowRight), MOVE_STEP));
        assert!(apply_key(&mut ship, &KeyInput::pressed(KeyCode::ArrowRight), MOVE_STEP));
        assert_eq!(ship.x, 110.0);
        assert_eq!(ship.y, 550.0);
    }

    #[test]
    fn test_other_keys_leave_ship_unchanged() {
        let mut ship = ship();
        let before = ship;
        for key in [KeyCode::ArrowUp, KeyCode::ArrowDown, KeyCode::Space, KeyCode::KeyA] {
            assert!(!apply_key(&mut ship, &KeyInput::pressed(key), MOVE_STEP));
        }
        assert_eq!(ship, before);
    }

    #[test]
    fn test_releases_and_repeats_are_ignored() {
        let mut ship = ship();
        let before = ship;
        let repeat = KeyInput {
            repeat: true,
            ..KeyInput::pressed(KeyCode::ArrowLeft)
        };
        assert!(!apply_key(&mut ship, &KeyInput::released(KeyCode::ArrowLeft), MOVE_STEP));
        assert!(!apply_key(&mut ship, &repeat, MOVE_STEP));
        assert_eq!(ship, before);
    }

    #[test]
    fn test_left_presses_are_not_clamped() {
        let mut ship = Ship::new(0.0, 550.0, 50.0, 20.0);
        let left = KeyInput::pressed(KeyCode::ArrowLeft);
        for n in 1..=25 {
            apply_key(&mut ship, &left, MOVE_STEP);
            assert_eq!(ship.x, -10.0 * n as f32);
        }
    }
}
