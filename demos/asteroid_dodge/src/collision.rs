use crate::entities::{Asteroid, Ship};

/// Strict AABB overlap between the ship and one asteroid.
///
/// Shared edges are not a hit.
pub fn ship_hits_asteroid(ship: &Ship, asteroid: &Asteroid) -> bool {
    ship.bounds().overlaps(&asteroid.bounds())
}

/// True if any asteroid currently overlaps the ship.
pub fn any_collision(ship: &Ship, asteroids: &[Asteroid]) -> bool {
    asteroids
        .iter()
        .any(|asteroid| ship_hits_asteroid(ship, asteroid))
}
