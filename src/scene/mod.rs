//! Scenes: GPU-owned state plus the host callback surface.
//!
//! A scene owns its program, buffers, vertex array and textures for its
//! whole lifetime; the host event loop constructs it once, then calls
//! [`Scene::render`] every frame and forwards window and input events.
//! All GPU objects are created at construction and released by RAII at
//! teardown.

pub mod quad;
pub mod spin;

use bytemuck::{Pod, Zeroable};
use glow::{HasContext, PixelUnpackData};

use crate::decode::DecodedImage;
use crate::error::Error;
use crate::gl::check_error;
use crate::input::Key;

pub use quad::QuadScene;
pub use spin::SpinScene;

/// The callback surface a host event loop drives.
///
/// The two implementations are selected by the host at configuration time;
/// nothing in this crate branches on the variant at runtime. Input handlers
/// return whether the event was consumed and default to `false`.
pub trait Scene {
    /// Draw one frame into the current framebuffer.
    ///
    /// # Safety
    ///
    /// Requires the GL context used at construction to be current.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Context`] if the context reports a failure.
    unsafe fn render(&mut self) -> Result<(), Error>;

    /// React to a window/canvas resize.
    ///
    /// # Safety
    ///
    /// Requires the GL context used at construction to be current.
    unsafe fn resize(&mut self, width: i32, height: i32);

    /// A textual key input (a decoded codepoint).
    fn on_key_text(&mut self, _text: &str) -> bool {
        false
    }

    /// A coded key transition.
    fn on_key(&mut self, _key: Key, _down: bool, _repeat: bool) -> bool {
        false
    }

    /// A pointer button transition at the given position.
    fn on_button(&mut self, _button: i32, _x: f64, _y: f64, _down: bool) -> bool {
        false
    }

    /// A scroll delta.
    ///
    /// # Safety
    ///
    /// Requires the GL context used at construction to be current;
    /// implementations may update uniforms.
    unsafe fn on_scroll(&mut self, _dx: f64, _dy: f64) -> bool {
        false
    }

    /// A pointer move.
    fn on_mouse_move(&mut self, _x: f64, _y: f64) -> bool {
        false
    }

    /// The pointer entered (`true`) or left (`false`) the surface.
    fn on_mouse_over(&mut self, _entered: bool) -> bool {
        false
    }
}

/// One interleaved vertex: clip-space position and texture coordinates.
#[derive(Copy, Clone, Pod, Zeroable)]
#[repr(C)]
pub struct Vertex {
    /// Clip-space x/y.
    pub position: [f32; 2],
    /// Texture u/v.
    pub texture_coordinates: [f32; 2],
}

/// The unit quad, top-left first, with V pointing down the image.
pub(crate) const QUAD_VERTICES: [Vertex; 4] = [
    Vertex {
        position: [-1.0, 1.0],
        texture_coordinates: [0.0, 0.0],
    },
    Vertex {
        position: [1.0, 1.0],
        texture_coordinates: [1.0, 0.0],
    },
    Vertex {
        position: [1.0, -1.0],
        texture_coordinates: [1.0, 1.0],
    },
    Vertex {
        position: [-1.0, -1.0],
        texture_coordinates: [0.0, 1.0],
    },
];

/// Two triangles covering the quad.
pub(crate) const QUAD_INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

/// Index count passed to the one draw call per frame.
pub(crate) const QUAD_INDEX_COUNT: i32 = 6;

/// Scene background color shared by both variants.
pub(crate) const CLEAR_COLOR: [f32; 4] = [0.2, 0.4, 0.6, 1.0];

/// Convert a `u32` to `i32` for GL API calls.
///
/// # Panics
///
/// Panics if `value > i32::MAX`. In practice, this is unreachable for
/// normal viewport dimensions and image sizes.
pub(crate) fn gl_size(value: u32) -> i32 {
    i32::try_from(value).expect("dimension exceeds i32::MAX")
}

/// The largest centered square that fits the client area.
///
/// Returns `(x, y, side)` for `glViewport`. Idempotent for a fixed input.
pub(crate) fn centered_viewport(width: i32, height: i32) -> (i32, i32, i32) {
    let side = width.min(height);
    ((width - side) / 2, (height - side) / 2, side)
}

/// Upload the fixed quad's vertex and index data and record the attribute
/// layout in the vertex array object.
///
/// Attributes whose location is `None` were optimized out of the program
/// and are skipped silently. Leaves the VAO and both buffer bindings
/// cleared.
///
/// # Safety
///
/// Requires a valid, current GL context.
pub(crate) unsafe fn upload_quad_geometry(
    gl: &glow::Context,
    vertex_array: glow::VertexArray,
    vertex_buffer: glow::Buffer,
    index_buffer: glow::Buffer,
    position: Option<u32>,
    texture_coordinates: Option<u32>,
) -> Result<(), Error> {
    // Vertex is 16 bytes, well within i32 range.
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    let stride = std::mem::size_of::<Vertex>() as i32;

    unsafe {
        gl.bind_buffer(glow::ARRAY_BUFFER, Some(vertex_buffer));
        gl.buffer_data_u8_slice(
            glow::ARRAY_BUFFER,
            bytemuck::cast_slice(&QUAD_VERTICES),
            glow::STATIC_DRAW,
        );
        gl.bind_buffer(glow::ARRAY_BUFFER, None);

        gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(index_buffer));
        gl.buffer_data_u8_slice(
            glow::ELEMENT_ARRAY_BUFFER,
            bytemuck::cast_slice(&QUAD_INDICES),
            glow::STATIC_DRAW,
        );
        gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, None);

        // The VAO records the buffer bindings and attribute layout.
        gl.bind_vertex_array(Some(vertex_array));
        gl.bind_buffer(glow::ARRAY_BUFFER, Some(vertex_buffer));
        gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(index_buffer));
        if let Some(location) = position {
            gl.enable_vertex_attrib_array(location);
            gl.vertex_attrib_pointer_f32(location, 2, glow::FLOAT, false, stride, 0);
        }
        if let Some(location) = texture_coordinates {
            gl.enable_vertex_attrib_array(location);
            gl.vertex_attrib_pointer_f32(location, 2, glow::FLOAT, false, stride, 2 * 4);
        }
        // Unbind the VAO before the buffers so it keeps its bindings.
        gl.bind_vertex_array(None);
        gl.bind_buffer(glow::ARRAY_BUFFER, None);
        gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, None);

        check_error(gl, "glVertexAttribPointer")
    }
}

/// Upload a decoded image into `texture` with linear filtering and
/// edge-clamping, optionally generating mipmaps.
///
/// Leaves the 2-D texture binding cleared.
///
/// # Safety
///
/// Requires a valid, current GL context.
pub(crate) unsafe fn upload_texture(
    gl: &glow::Context,
    texture: glow::Texture,
    image: &DecodedImage,
    mipmaps: bool,
) -> Result<(), Error> {
    let min_filter = if mipmaps {
        glow::LINEAR_MIPMAP_LINEAR
    } else {
        glow::LINEAR
    };
    let format = image.format().gl_format();

    // GL constant values are small enough that the casts are always safe.
    #[expect(clippy::cast_possible_wrap)]
    unsafe {
        gl.bind_texture(glow::TEXTURE_2D, Some(texture));
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, min_filter as i32);
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::LINEAR as i32);
        gl.tex_parameter_i32(
            glow::TEXTURE_2D,
            glow::TEXTURE_WRAP_S,
            glow::CLAMP_TO_EDGE as i32,
        );
        gl.tex_parameter_i32(
            glow::TEXTURE_2D,
            glow::TEXTURE_WRAP_T,
            glow::CLAMP_TO_EDGE as i32,
        );

        // Rows are tightly packed, including 3-byte RGB rows.
        gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
        gl.tex_image_2d(
            glow::TEXTURE_2D,
            0,
            format as i32,
            gl_size(image.width()),
            gl_size(image.height()),
            0,
            format,
            glow::UNSIGNED_BYTE,
            PixelUnpackData::Slice(Some(image.pixels())),
        );
        if mipmaps {
            gl.generate_mipmap(glow::TEXTURE_2D);
        }
        gl.bind_texture(glow::TEXTURE_2D, None);
    }

    unsafe { check_error(gl, "glTexImage2D") }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_is_a_centered_square() {
        assert_eq!(centered_viewport(1024, 768), (128, 0, 768));
        assert_eq!(centered_viewport(768, 1024), (0, 128, 768));
        assert_eq!(centered_viewport(800, 800), (0, 0, 800));
    }

    #[test]
    fn viewport_is_idempotent_for_equal_dimensions() {
        let first = centered_viewport(1920, 1080);
        let second = centered_viewport(1920, 1080);
        assert_eq!(first, second);
    }

    #[test]
    fn quad_uses_six_indices_over_four_vertices() {
        assert_eq!(QUAD_VERTICES.len(), 4);
        assert_eq!(QUAD_INDICES.len(), 6);
        assert!(QUAD_INDICES.iter().all(|&i| i < 4));
    }

    #[test]
    fn vertex_layout_is_four_floats() {
        assert_eq!(std::mem::size_of::<Vertex>(), 4 * std::mem::size_of::<f32>());
    }
}
