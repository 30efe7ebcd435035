use dodge2d::Rect;

/// The player-controlled rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ship {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Ship {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// A falling rectangle. `speed` is in pixels per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Asteroid {
    pub x: f32,
    pub y: f32,
    pub speed: f32,
    pub width: f32,
    pub height: f32,
}

impl Asteroid {
    pub fn new(x: f32, y: f32, speed: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            speed,
            width,
            height,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_keeps_fields() {
        let asteroid = Asteroid::new(10.0, -30.0, 4.0, 30.0, 25.0);
        assert_eq!(asteroid.x, 10.0);
        assert_eq!(asteroid.y, -30.0);
        assert_eq!(asteroid.speed, 4.0);
        assert_eq!(asteroid.width, 30.0);
        assert_eq!(asteroid.height, 25.0);
    }

    #[test]
    fn test_no_validation_on_odd_values() {
        let ship = Ship::new(-5000.0, 9000.0, -10.0, 0.0);
        assert_eq!(ship.bounds(), Rect::new(-5000.0, 9000.0, -10.0, 0.0));
    }
}
