#![deny(unsafe_code)]
//! Core types for the hello-opengl demo.
//!
//! Provides the window configuration (`WindowConfig`, `Scene`), the fixed
//! triangle geometry, keyboard state, the `FrameLoop` with its `Surface` and
//! `Renderer` seams, and, behind the `render` feature, the `glow`-backed
//! GL renderer.

pub mod color;
pub mod config;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod input;
pub mod viewport;

#[cfg(feature = "render")]
pub mod render;

pub use color::Rgba;
pub use config::{GlProfile, GlVersion, Scene, WindowConfig};
pub use error::BootstrapError;
pub use frame::{FrameLoop, FrameStats, Renderer, Surface, WindowEvent};
pub use input::{InputState, Key, KeyEvent, KeyState};
pub use viewport::Viewport;
