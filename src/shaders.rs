//! Embedded GLSL shader sources.
//!
//! All shaders target GLSL ES 3.00, which runs unchanged on OpenGL ES 3.0
//! desktop contexts and WebGL 2.

/// Vertex shader for the two-texture quad scene.
///
/// Passes the quad through untransformed and forwards the texture
/// coordinates to the fragment stage.
///
/// # Attributes
///
/// | Name                  | Type   | Description                    |
/// |-----------------------|--------|--------------------------------|
/// | `position`            | `vec2` | Clip-space vertex position     |
/// | `texture_coordinates` | `vec2` | UV coordinates for the quad    |
pub const QUAD_VERTEX_SRC: &str = r"#version 300 es

in vec2 position;
in vec2 texture_coordinates;

out vec2 v_texture_coordinates;

void main() {
    v_texture_coordinates = texture_coordinates;
    gl_Position = vec4(position, 0.0, 1.0);
}
";

/// Fragment shader for the two-texture quad scene.
///
/// Mixes the two bound textures by the scroll-driven blend factor. The
/// factor is applied as-is; the host may drive it outside `[0, 1]`.
///
/// # Uniforms
///
/// | Name         | Type        | Description                       |
/// |--------------|-------------|-----------------------------------|
/// | `texture0`   | `sampler2D` | First texture unit                |
/// | `texture1`   | `sampler2D` | Second texture unit               |
/// | `visibility` | `float`     | Mix factor between the textures   |
pub const QUAD_FRAGMENT_SRC: &str = r"#version 300 es
precision mediump float;

in vec2 v_texture_coordinates;

uniform sampler2D texture0;
uniform sampler2D texture1;
uniform float visibility;

out vec4 frag_color;

void main() {
    vec4 color0 = texture(texture0, v_texture_coordinates);
    vec4 color1 = texture(texture1, v_texture_coordinates);
    frag_color = mix(color0, color1, visibility);
}
";

/// Vertex shader for the rotating perspective scene.
///
/// # Attributes
///
/// | Name                   | Type   | Description                |
/// |------------------------|--------|----------------------------|
/// | `position`             | `vec2` | Model-space rectangle      |
/// | `texture0_coordinates` | `vec2` | UV coordinates             |
///
/// # Uniforms
///
/// | Name         | Type   | Description                     |
/// |--------------|--------|---------------------------------|
/// | `model`      | `mat4` | Time-varying rotation           |
/// | `view`       | `mat4` | Camera translation              |
/// | `projection` | `mat4` | Perspective projection          |
pub const SPIN_VERTEX_SRC: &str = r"#version 300 es

in vec2 position;
in vec2 texture0_coordinates;

uniform mat4 model;
uniform mat4 view;
uniform mat4 projection;

out vec2 v_texture0_coordinates;

void main() {
    v_texture0_coordinates = texture0_coordinates;
    gl_Position = projection * view * model * vec4(position, 0.0, 1.0);
}
";

/// Fragment shader for the rotating perspective scene.
///
/// # Uniforms
///
/// | Name       | Type        | Description        |
/// |------------|-------------|--------------------|
/// | `texture0` | `sampler2D` | Bound texture unit |
pub const SPIN_FRAGMENT_SRC: &str = r"#version 300 es
precision mediump float;

in vec2 v_texture0_coordinates;

uniform sampler2D texture0;

out vec4 frag_color;

void main() {
    frag_color = texture(texture0, v_texture0_coordinates);
}
";
