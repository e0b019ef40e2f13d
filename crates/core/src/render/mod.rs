//! OpenGL rendering through `glow`.
//!
//! This module is only available when the `render` feature is enabled.
//!
//! # Module overview
//!
//! - [`context`] -- `glow::Context` wrapper with version detection.
//! - [`shader`] -- Shader compilation, linking, and diagnostics.
//! - [`sources`] -- GLSL for the triangle pipeline.
//! - [`mesh`] -- Static vertex buffer + vertex array.
//! - [`renderer`] -- The frame loop's GL renderer.

pub mod context;
pub mod mesh;
pub mod renderer;
pub mod shader;
pub mod sources;

// Re-export key types at the render module level for convenience.
pub use context::{ContextInfo, GpuContext};
pub use mesh::Mesh;
pub use renderer::{GlRenderer, TrianglePipeline};
pub use shader::{
    build_program, compile_shader, format_shader_error, link_program, Built, Program,
    ShaderBackend, ShaderError, ShaderStage,
};
pub use sources::{TRIANGLE_FRAGMENT_SHADER, TRIANGLE_VERTEX_SHADER};
