//! Error types for the hello-opengl core.

use thiserror::Error;

/// Errors produced while bringing up the window, the GL context, or the
/// frame loop.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// The platform layer could not create the window or its GL context.
    #[error("cannot create window: {0}")]
    WindowCreation(String),

    /// GL entry points could not be resolved for the current context.
    #[error("cannot load OpenGL functions: {0}")]
    FunctionLoad(String),

    /// The context reports a lower GL version than the one requested.
    #[error("OpenGL {required} required, context provides {found}")]
    UnsupportedVersion { required: String, found: String },

    /// Presenting the back buffer failed.
    #[error("cannot present frame: {0}")]
    Present(String),

    /// A window configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A GPU object for the pipeline could not be allocated.
    #[cfg(feature = "render")]
    #[error(transparent)]
    Shader(#[from] crate::render::ShaderError),

    /// A GPU buffer or vertex array could not be allocated.
    #[error("cannot allocate GPU resource: {0}")]
    Resource(String),
}
