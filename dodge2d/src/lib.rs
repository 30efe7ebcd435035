//! Dodge2D - a tiny winit + wgpu framework for single-screen 2D games.
//!
//! The framework owns the window, the event loop and the GPU surface. Games
//! implement [`Game`], read queued key events from [`InputState`] and draw
//! flat-colored rectangles through [`RectCanvas`].

pub mod engine;
pub mod error;
pub mod input;
pub mod math;
pub mod render;

pub use crate::engine::{Engine, EngineConfig, EngineContext, FixedTimestep, Game};
pub use crate::error::InitError;
pub use crate::input::{InputState, KeyInput};
pub use crate::math::{Rect, Vec2};
pub use crate::render::{Color, Frame, RectCanvas, Renderer};
pub use winit::event::ElementState;
pub use winit::keyboard::KeyCode;
