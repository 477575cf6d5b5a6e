//! The two-texture quad scene.

use std::sync::Arc;

use glow::HasContext;

use crate::decode::DecodedImage;
use crate::error::Error;
use crate::gl::check_error;
use crate::gl::handle::{
    create_buffers, create_textures, create_vertex_arrays, BufferArray, TextureArray,
    VertexArrayArray,
};
use crate::gl::shader::ProgramUnit;
use crate::scene::{
    centered_viewport, upload_quad_geometry, upload_texture, Scene, CLEAR_COLOR, QUAD_INDEX_COUNT,
};
use crate::shaders;

/// Scroll step applied to the visibility blend factor per event.
const VISIBILITY_STEP: f32 = 0.05;

/// A scene that blends two textures over a full quad.
///
/// Scrolling shifts the blend factor by a fixed step. The factor is
/// deliberately not clamped; repeated scrolling can push it outside the
/// `[0, 1]` range the shader nominally expects.
pub struct QuadScene {
    gl: Arc<glow::Context>,
    program: ProgramUnit,
    vertex_arrays: VertexArrayArray,
    /// Owned for the VAO's attachment bindings; not touched after setup.
    #[allow(dead_code)]
    buffers: BufferArray,
    textures: TextureArray,
    visibility: Option<glow::UniformLocation>,
    visibility_value: f32,
}

impl QuadScene {
    /// Build the scene: compile the program, upload the quad geometry and
    /// both images, and cache the uniform locations.
    ///
    /// # Safety
    ///
    /// The `gl` context must be current and valid, and must remain so for
    /// every later call on the scene.
    ///
    /// # Errors
    ///
    /// Propagates shader build failures and context errors; on any failure
    /// all GPU objects created so far are released before returning.
    pub unsafe fn new(
        gl: Arc<glow::Context>,
        first: &DecodedImage,
        second: &DecodedImage,
    ) -> Result<Self, Error> {
        unsafe {
            gl.enable(glow::BLEND);
            gl.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);
            gl.clear_color(CLEAR_COLOR[0], CLEAR_COLOR[1], CLEAR_COLOR[2], CLEAR_COLOR[3]);
        }

        let vertex_arrays = unsafe { create_vertex_arrays(&gl, 1) }?;
        let buffers = unsafe { create_buffers(&gl, 2) }?;
        let textures = unsafe { create_textures(&gl, 2) }?;
        let program = unsafe {
            ProgramUnit::from_sources(&gl, shaders::QUAD_VERTEX_SRC, shaders::QUAD_FRAGMENT_SRC)
        }?;

        // Locations are resolved once here; `None` means the compiler
        // optimized the name out, which is tolerated silently.
        let position = unsafe { program.attribute("position") };
        let texture_coordinates = unsafe { program.attribute("texture_coordinates") };
        let texture0 = unsafe { program.uniform("texture0") };
        let texture1 = unsafe { program.uniform("texture1") };
        let visibility = unsafe { program.uniform("visibility") };

        unsafe {
            upload_quad_geometry(
                &gl,
                vertex_arrays.at(0)?,
                buffers.at(0)?,
                buffers.at(1)?,
                position,
                texture_coordinates,
            )?;
        }

        // Tell the sampler uniforms which texture units they refer to.
        unsafe {
            gl.use_program(Some(program.raw()));
            gl.uniform_1_i32(texture0.as_ref(), 0);
            gl.uniform_1_i32(texture1.as_ref(), 1);
            gl.uniform_1_f32(visibility.as_ref(), 0.0);
            gl.use_program(None);
            check_error(&gl, "glUniform1i")?;
        }

        unsafe {
            upload_texture(&gl, textures.at(0)?, first, false)?;
            upload_texture(&gl, textures.at(1)?, second, false)?;
        }

        log::debug!(
            "quad scene ready: {}x{} over {}x{}",
            first.width(),
            first.height(),
            second.width(),
            second.height(),
        );

        Ok(Self {
            gl,
            program,
            vertex_arrays,
            buffers,
            textures,
            visibility,
            visibility_value: 0.0,
        })
    }

    /// The current, unclamped visibility blend factor.
    #[must_use]
    pub fn visibility_value(&self) -> f32 {
        self.visibility_value
    }
}

impl Scene for QuadScene {
    unsafe fn render(&mut self) -> Result<(), Error> {
        let gl = &self.gl;
        unsafe {
            gl.clear(glow::COLOR_BUFFER_BIT);

            gl.use_program(Some(self.program.raw()));
            gl.bind_vertex_array(Some(self.vertex_arrays[0]));

            gl.active_texture(glow::TEXTURE0);
            gl.bind_texture(glow::TEXTURE_2D, Some(self.textures[0]));
            gl.active_texture(glow::TEXTURE1);
            gl.bind_texture(glow::TEXTURE_2D, Some(self.textures[1]));

            gl.draw_elements(glow::TRIANGLES, QUAD_INDEX_COUNT, glow::UNSIGNED_INT, 0);
            check_error(gl, "glDrawElements")
        }
    }

    unsafe fn resize(&mut self, width: i32, height: i32) {
        let (x, y, side) = centered_viewport(width, height);
        unsafe { self.gl.viewport(x, y, side, side) };
    }

    unsafe fn on_scroll(&mut self, _dx: f64, dy: f64) -> bool {
        self.visibility_value = step_visibility(self.visibility_value, dy);
        let gl = &self.gl;
        unsafe {
            gl.use_program(Some(self.program.raw()));
            gl.uniform_1_f32(self.visibility.as_ref(), self.visibility_value);
            gl.use_program(None);
        }
        true
    }
}

/// Apply one scroll event to the blend factor.
///
/// Vertical deltas step by [`VISIBILITY_STEP`]; the value is deliberately
/// not clamped.
fn step_visibility(value: f32, dy: f64) -> f32 {
    if dy > 0.0 {
        value + VISIBILITY_STEP
    } else if dy < 0.0 {
        value - VISIBILITY_STEP
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {expected}, got {actual}",
        );
    }

    #[test]
    fn scroll_up_and_down_step_by_fixed_amount() {
        assert_close(step_visibility(0.0, 1.0), 0.05);
        assert_close(step_visibility(0.5, -120.0), 0.45);
    }

    #[test]
    fn zero_delta_leaves_value_unchanged() {
        assert_close(step_visibility(0.3, 0.0), 0.3);
    }

    #[test]
    fn value_is_not_clamped() {
        let mut value = 1.0;
        for _ in 0..10 {
            value = step_visibility(value, 1.0);
        }
        assert_close(value, 1.5);

        let mut value = 0.0;
        for _ in 0..3 {
            value = step_visibility(value, -1.0);
        }
        assert_close(value, -0.15);
    }
}
