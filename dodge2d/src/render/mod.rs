mod canvas;
mod wgpu_backend;

pub use canvas::{Color, RectCanvas};
pub use wgpu_backend::{Frame, Renderer};
