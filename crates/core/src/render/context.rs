//! GL context wrapper with version detection.
//!
//! `GpuContext` wraps a `glow::Context` and checks at initialization that
//! the driver handed out at least the requested version. Every GL call in
//! the crate goes through a `&GpuContext` rather than an implicit current
//! context.

use crate::color::Rgba;
use crate::config::GlVersion;
use crate::error::BootstrapError;
use crate::viewport::Viewport;

/// Driver strings reported by the current context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextInfo {
    pub version: String,
    pub renderer: String,
    pub vendor: String,
}

/// Wraps a `glow::Context` with the version the driver reported.
///
/// Created once after the function pointers are loaded.
pub struct GpuContext {
    gl: glow::Context,
    version: GlVersion,
}

impl GpuContext {
    /// Wraps the given GL context and checks its version.
    ///
    /// # Errors
    ///
    /// Returns `BootstrapError::UnsupportedVersion` if the context is older
    /// than `required` or is an OpenGL ES context.
    pub fn new(gl: glow::Context, required: GlVersion) -> Result<Self, BootstrapError> {
        use glow::HasContext;

        let reported = gl.version();
        let found = GlVersion {
            major: u8::try_from(reported.major).unwrap_or(u8::MAX),
            minor: u8::try_from(reported.minor).unwrap_or(u8::MAX),
        };

        if reported.is_embedded || found < required {
            let es = if reported.is_embedded { " ES" } else { "" };
            return Err(BootstrapError::UnsupportedVersion {
                required: required.to_string(),
                found: format!("{found}{es}"),
            });
        }

        Ok(Self { gl, version: found })
    }

    /// Returns a reference to the underlying `glow::Context`.
    pub fn gl(&self) -> &glow::Context {
        &self.gl
    }

    /// Version the driver reported for this context.
    pub fn version(&self) -> GlVersion {
        self.version
    }

    /// Queries `GL_VERSION`, `GL_RENDERER` and `GL_VENDOR`.
    #[allow(unsafe_code)]
    pub fn info(&self) -> ContextInfo {
        use glow::HasContext;

        // SAFETY: string queries with valid enum names on a current context.
        unsafe {
            ContextInfo {
                version: self.gl.get_parameter_string(glow::VERSION),
                renderer: self.gl.get_parameter_string(glow::RENDERER),
                vendor: self.gl.get_parameter_string(glow::VENDOR),
            }
        }
    }

    #[allow(unsafe_code)]
    pub fn set_viewport(&self, viewport: Viewport) {
        use glow::HasContext;

        // SAFETY: viewport sizes are non-negative by construction.
        unsafe {
            self.gl
                .viewport(viewport.x, viewport.y, viewport.width, viewport.height);
        }
    }

    /// Clears the color buffer of the bound framebuffer to `color`.
    #[allow(unsafe_code)]
    pub fn clear(&self, color: Rgba) {
        use glow::HasContext;

        // SAFETY: plain state calls on a current context.
        unsafe {
            self.gl.clear_color(color.r, color.g, color.b, color.a);
            self.gl.clear(glow::COLOR_BUFFER_BIT);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // GpuContext requires a live GL context, so integration tests are ignored.

    #[test]
    fn gpu_context_struct_compiles_with_expected_api() {
        fn _assert_api(ctx: &GpuContext) {
            let _gl: &glow::Context = ctx.gl();
            let _version: GlVersion = ctx.version();
            let _info: ContextInfo = ctx.info();
            ctx.set_viewport(Viewport {
                x: 0,
                y: 0,
                width: 1,
                height: 1,
            });
            ctx.clear(Rgba::CLEAR);
        }
    }

    #[test]
    #[ignore = "requires GL context"]
    fn new_rejects_context_below_required_version() {
        // Would test: a 2.1 context fails with UnsupportedVersion.
    }

    #[test]
    #[ignore = "requires GL context"]
    fn clear_sets_every_pixel_to_color() {
        // Would test: read_pixels after clear(Rgba::CLEAR) returns (51, 77, 77, 255).
    }
}
