//! Static vertex buffer plus the vertex array describing it.

use super::context::GpuContext;
use crate::error::BootstrapError;
use crate::geometry::{VertexAttribute, FLOATS_PER_VERTEX};

/// A VAO/VBO pair holding immutable triangle-list geometry.
pub struct Mesh {
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    vertex_count: i32,
}

impl Mesh {
    /// Uploads `vertices` once with a `STATIC_DRAW` hint and records the
    /// single float attribute `attribute` in a new VAO.
    ///
    /// Leaves the VAO and the buffer bound.
    ///
    /// # Errors
    ///
    /// Returns `BootstrapError::Resource` if the driver cannot allocate the
    /// vertex array or the buffer, or if `vertices` is not a whole number of
    /// vertices.
    #[allow(unsafe_code)]
    pub fn upload(
        ctx: &GpuContext,
        vertices: &[f32],
        attribute: VertexAttribute,
    ) -> Result<Self, BootstrapError> {
        use glow::HasContext;
        let gl = ctx.gl();

        let vertex_count = count_vertices(vertices)?;

        // SAFETY: glow wraps raw GL calls as unsafe. The VAO is created and
        // bound before the buffer so it captures the attribute pointer.
        let vao = unsafe {
            gl.create_vertex_array()
                .map_err(|e| BootstrapError::Resource(format!("vertex array: {e}")))?
        };
        let vbo = match unsafe { gl.create_buffer() } {
            Ok(b) => b,
            Err(e) => {
                unsafe { gl.delete_vertex_array(vao) };
                return Err(BootstrapError::Resource(format!("vertex buffer: {e}")));
            }
        };

        unsafe {
            gl.bind_vertex_array(Some(vao));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(vertices),
                glow::STATIC_DRAW,
            );
            gl.vertex_attrib_pointer_f32(
                attribute.location,
                attribute.components,
                glow::FLOAT,
                false,
                attribute.stride,
                attribute.offset,
            );
            gl.enable_vertex_attrib_array(attribute.location);
        }

        Ok(Self {
            vao,
            vbo,
            vertex_count,
        })
    }

    pub fn vertex_count(&self) -> i32 {
        self.vertex_count
    }

    /// Draws the whole buffer as a triangle list with the current program.
    #[allow(unsafe_code)]
    pub fn draw(&self, ctx: &GpuContext) {
        use glow::HasContext;

        // SAFETY: vao was created in upload() on this context.
        unsafe {
            ctx.gl().bind_vertex_array(Some(self.vao));
            ctx.gl().draw_arrays(glow::TRIANGLES, 0, self.vertex_count);
        }
    }

    /// Releases the vertex array and buffer.
    #[allow(unsafe_code)]
    pub fn delete(self, ctx: &GpuContext) {
        use glow::HasContext;

        // SAFETY: both handles were created in upload() on this context.
        unsafe {
            ctx.gl().delete_vertex_array(self.vao);
            ctx.gl().delete_buffer(self.vbo);
        }
    }
}

/// Number of whole vertices in a packed `[x, y, z, ...]` slice.
fn count_vertices(vertices: &[f32]) -> Result<i32, BootstrapError> {
    if vertices.is_empty() || vertices.len() % FLOATS_PER_VERTEX != 0 {
        return Err(BootstrapError::Resource(format!(
            "{} floats is not a whole number of {FLOATS_PER_VERTEX}-float vertices",
            vertices.len()
        )));
    }
    i32::try_from(vertices.len() / FLOATS_PER_VERTEX)
        .map_err(|_| BootstrapError::Resource("too many vertices".into()))
}
