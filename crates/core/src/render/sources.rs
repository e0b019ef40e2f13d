//! GLSL sources for the triangle pipeline.
//!
//! Both stages target GLSL 330 core, matching the 3.3 core context the
//! window requests.

/// Passes the vec3 position at attribute location 0 straight through to
/// clip space.
pub const TRIANGLE_VERTEX_SHADER: &str = r#"#version 330 core
layout (location = 0) in vec3 aPos;
void main()
{
    gl_Position = vec4(aPos.x, aPos.y, aPos.z, 1.0);
}
"#;

/// Emits opaque orange for every fragment.
pub const TRIANGLE_FRAGMENT_SHADER: &str = r#"#version 330 core
out vec4 fragColor;
void main()
{
    fragColor = vec4(1.0, 0.5, 0.2, 1.0);
}
"#;
