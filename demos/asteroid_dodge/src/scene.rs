use dodge2d::{Color, Rect, RectCanvas};

use crate::config::Palette;
use crate::entities::{Asteroid, Ship};

/// Draw the ship, then every asteroid in order, as filled rectangles.
pub fn draw_scene<C>(canvas: &mut C, ship: &Ship, asteroids: &[Asteroid], palette: &Palette)
where
    C: RectCanvas + ?Sized,
{
    fill(canvas, ship.bounds(), palette.ship);
    for asteroid in asteroids {
        fill(canvas, asteroid.bounds(), palette.asteroid);
    }
}

fn fill<C: RectCanvas + ?Sized>(canvas: &mut C, rect: Rect, color: Color) {
    canvas.fill_rect(rect.min, rect.max(), color);
}
