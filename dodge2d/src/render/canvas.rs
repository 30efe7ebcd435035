use bytemuck::{Pod, Zeroable};

use crate::math::{Rect, Vec2};

/// RGBA color with components in `0.0..=1.0`.
pub type Color = [f32; 4];

/// Anything that can receive flat-colored rectangle draws.
///
/// [`Frame`](crate::render::Frame) implements this for on-screen drawing.
/// Game code draws through the trait so scenes can be rendered into a
/// recorder in tests without opening a window.
pub trait RectCanvas {
    /// Fill the rectangle spanned by two opposite corners.
    fn fill_rect(&mut self, p1: Vec2, p2: Vec2, color: Color);
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub(crate) struct ShapeVertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

/// CPU-side list of triangles queued for the shape pipeline this frame.
#[derive(Default)]
pub(crate) struct ShapeBatch {
    vertices: Vec<ShapeVertex>,
}

impl ShapeBatch {
    pub fn push_rect(&mut self, rect: Rect, color: Color) {
        let (min, max) = (rect.min, rect.max());
        let corner = |x: f32, y: f32| ShapeVertex {
            position: [x, y],
            color,
        };
        // Two triangles, counter-clockwise in screen space.
        self.vertices.extend_from_slice(&[
            corner(min.x, min.y),
            corner(min.x, max.y),
            corner(max.x, max.y),
            corner(min.x, min.y),
            corner(max.x, max.y),
            corner(max.x, min.y),
        ]);
    }

    pub fn vertices(&self) -> &[ShapeVertex] {
        &self.vertices
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

impl RectCanvas for ShapeBatch {
    fn fill_rect(&mut self, p1: Vec2, p2: Vec2, color: Color) {
        self.push_rect(Rect::from_corners(p1, p2), color);
    }
}
