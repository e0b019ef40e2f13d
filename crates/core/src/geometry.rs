//! The fixed triangle uploaded to the GPU and its attribute layout.
//!
//! Everything here is plain data so the vertex contents can be checked
//! without a GL context; `render::mesh` uploads exactly these bytes.

/// Number of `f32` components per vertex (x, y, z).
pub const FLOATS_PER_VERTEX: usize = 3;

/// Number of vertices in the triangle.
pub const VERTEX_COUNT: usize = 3;

/// Triangle in normalized device coordinates, three vertices of
/// `[x, y, z]`, tightly packed.
#[rustfmt::skip]
pub const TRIANGLE_VERTICES: [f32; FLOATS_PER_VERTEX * VERTEX_COUNT] = [
    -0.5, -0.5, 0.0,
     0.5, -0.5, 0.0,
     0.5,  0.5, 0.0,
];

/// Description of a single float vertex attribute, mirroring the arguments
/// of `glVertexAttribPointer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Shader `layout (location = N)` index.
    pub location: u32,
    /// Number of `f32` components.
    pub components: i32,
    /// Byte distance between consecutive vertices.
    pub stride: i32,
    /// Byte offset of the first component.
    pub offset: i32,
}

/// The position attribute the vertex shader reads at location 0.
pub const POSITION_ATTRIBUTE: VertexAttribute = VertexAttribute {
    location: 0,
    components: FLOATS_PER_VERTEX as i32,
    stride: (FLOATS_PER_VERTEX * std::mem::size_of::<f32>()) as i32,
    offset: 0,
};

/// Returns the triangle as the byte slice handed to `glBufferData`.
pub fn triangle_bytes() -> &'static [u8] {
    bytemuck::cast_slice(&TRIANGLE_VERTICES)
}

/// Splits a packed vertex slice into `[x, y, z]` positions.
pub fn positions(vertices: &[f32]) -> impl Iterator<Item = [f32; 3]> + '_ {
    vertices
        .chunks_exact(FLOATS_PER_VERTEX)
        .map(|c| [c[0], c[1], c[2]])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_has_exactly_nine_floats() {
        assert_eq!(TRIANGLE_VERTICES.len(), 9);
    }

    #[test]
    fn triangle_vertices_match_fixed_positions() {
        let got: Vec<[f32; 3]> = positions(&TRIANGLE_VERTICES).collect();
        assert_eq!(
            got,
            vec![[-0.5, -0.5, 0.0], [0.5, -0.5, 0.0], [0.5, 0.5, 0.0]]
        );
    }

    #[test]
    fn triangle_lies_in_ndc_range() {
        for [x, y, z] in positions(&TRIANGLE_VERTICES) {
            assert!((-1.0..=1.0).contains(&x), "x out of NDC: {x}");
            assert!((-1.0..=1.0).contains(&y), "y out of NDC: {y}");
            assert_eq!(z, 0.0);
        }
    }

    #[test]
    fn triangle_bytes_cover_all_vertices() {
        let bytes = triangle_bytes();
        assert_eq!(bytes.len(), 9 * std::mem::size_of::<f32>());
        let first = f32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        assert_eq!(first, -0.5);
    }

    #[test]
    fn position_attribute_is_tightly_packed_at_location_zero() {
        assert_eq!(POSITION_ATTRIBUTE.location, 0);
        assert_eq!(POSITION_ATTRIBUTE.components, 3);
        assert_eq!(POSITION_ATTRIBUTE.stride, 12);
        assert_eq!(POSITION_ATTRIBUTE.offset, 0);
    }

    #[test]
    fn positions_ignores_trailing_partial_vertex() {
        let data = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(positions(&data).count(), 1);
    }
}
