//! The rotating perspective scene.

use std::sync::Arc;

use cgmath::{perspective, Deg, Matrix4, Vector3};
use glow::HasContext;
use instant::Instant;

use crate::decode::DecodedImage;
use crate::error::Error;
use crate::gl::check_error;
use crate::gl::handle::{
    create_buffers, create_textures, create_vertex_arrays, BufferArray, TextureArray,
    VertexArrayArray,
};
use crate::gl::shader::ProgramUnit;
use crate::scene::{upload_quad_geometry, upload_texture, Scene, CLEAR_COLOR, QUAD_INDEX_COUNT};
use crate::shaders;

// EXT_texture_filter_anisotropic; promoted to core in GL 4.6 but the enum
// values are the same everywhere.
const TEXTURE_MAX_ANISOTROPY: u32 = 0x84FE;
const MAX_TEXTURE_MAX_ANISOTROPY: u32 = 0x84FF;

/// Upper bound on the requested anisotropic filtering level.
const ANISOTROPY_CAP: f32 = 16.0;

/// Rotation speed of the rectangle.
const DEGREES_PER_SECOND: f32 = 45.0;

/// Vertical field of view of the projection.
const FIELD_OF_VIEW: Deg<f32> = Deg(45.0);

/// A scene that spins a textured rectangle under a perspective projection.
///
/// The rotation angle is derived from elapsed wall-clock time since
/// construction, so the animation speed is independent of the frame rate.
pub struct SpinScene {
    gl: Arc<glow::Context>,
    program: ProgramUnit,
    vertex_arrays: VertexArrayArray,
    /// Owned for the VAO's attachment bindings; not touched after setup.
    #[allow(dead_code)]
    buffers: BufferArray,
    textures: TextureArray,
    model: Option<glow::UniformLocation>,
    projection: Option<glow::UniformLocation>,
    start: Instant,
}

impl SpinScene {
    /// Build the scene: compile the program, upload the quad geometry and
    /// the image (with mipmaps and anisotropic filtering), and cache the
    /// uniform locations.
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
    pub unsafe fn new(gl: Arc<glow::Context>, image: &DecodedImage) -> Result<Self, Error> {
        unsafe {
            gl.enable(glow::DEPTH_TEST);
            gl.enable(glow::BLEND);
            gl.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);
            gl.clear_color(CLEAR_COLOR[0], CLEAR_COLOR[1], CLEAR_COLOR[2], CLEAR_COLOR[3]);
        }

        let vertex_arrays = unsafe { create_vertex_arrays(&gl, 1) }?;
        let buffers = unsafe { create_buffers(&gl, 2) }?;
        let textures = unsafe { create_textures(&gl, 1) }?;
        let program = unsafe {
            ProgramUnit::from_sources(&gl, shaders::SPIN_VERTEX_SRC, shaders::SPIN_FRAGMENT_SRC)
        }?;

        let position = unsafe { program.attribute("position") };
        let texture0_coordinates = unsafe { program.attribute("texture0_coordinates") };
        let texture0 = unsafe { program.uniform("texture0") };
        let model = unsafe { program.uniform("model") };
        let view = unsafe { program.uniform("view") };
        let projection = unsafe { program.uniform("projection") };

        unsafe {
            upload_quad_geometry(
                &gl,
                vertex_arrays.at(0)?,
                buffers.at(0)?,
                buffers.at(1)?,
                position,
                texture0_coordinates,
            )?;
        }

        // The view matrix never changes, so it is set once here.
        let view_matrix: [[f32; 4]; 4] =
            Matrix4::from_translation(Vector3::new(0.0, 0.0, -3.0)).into();
        unsafe {
            gl.use_program(Some(program.raw()));
            gl.uniform_1_i32(texture0.as_ref(), 0);
            gl.uniform_matrix_4_f32_slice(view.as_ref(), false, bytemuck::cast_slice(&view_matrix));
            gl.use_program(None);
            check_error(&gl, "glUniformMatrix4fv")?;
        }

        unsafe {
            upload_texture(&gl, textures.at(0)?, image, true)?;

            // Request the strongest anisotropic filtering available, capped.
            let supported = gl.get_parameter_f32(MAX_TEXTURE_MAX_ANISOTROPY);
            gl.bind_texture(glow::TEXTURE_2D, Some(textures.at(0)?));
            gl.tex_parameter_f32(
                glow::TEXTURE_2D,
                TEXTURE_MAX_ANISOTROPY,
                supported.min(ANISOTROPY_CAP),
            );
            gl.bind_texture(glow::TEXTURE_2D, None);
            check_error(&gl, "glTexParameterf")?;
            log::debug!("anisotropic filtering level {}", supported.min(ANISOTROPY_CAP));
        }

        Ok(Self {
            gl,
            program,
            vertex_arrays,
            buffers,
            textures,
            model,
            projection,
            start: Instant::now(),
        })
    }
}

impl Scene for SpinScene {
    unsafe fn render(&mut self) -> Result<(), Error> {
        let elapsed = self.start.elapsed().as_secs_f32();
        let model: [[f32; 4]; 4] = rotation_matrix(elapsed).into();

        let gl = &self.gl;
        unsafe {
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);

            gl.use_program(Some(self.program.raw()));
            gl.bind_vertex_array(Some(self.vertex_arrays[0]));

            gl.active_texture(glow::TEXTURE0);
            gl.bind_texture(glow::TEXTURE_2D, Some(self.textures[0]));

            gl.uniform_matrix_4_f32_slice(self.model.as_ref(), false, bytemuck::cast_slice(&model));

            gl.draw_elements(glow::TRIANGLES, QUAD_INDEX_COUNT, glow::UNSIGNED_INT, 0);
            check_error(gl, "glDrawElements")
        }
    }

    unsafe fn resize(&mut self, width: i32, height: i32) {
        let matrix: [[f32; 4]; 4] = projection_matrix(width, height).into();
        let gl = &self.gl;
        unsafe {
            gl.viewport(0, 0, width, height);
            gl.use_program(Some(self.program.raw()));
            gl.uniform_matrix_4_f32_slice(
                self.projection.as_ref(),
                false,
                bytemuck::cast_slice(&matrix),
            );
            gl.use_program(None);
        }
    }
}

/// The model rotation after `elapsed` seconds.
fn rotation_matrix(elapsed: f32) -> Matrix4<f32> {
    Matrix4::from_angle_y(Deg(elapsed * DEGREES_PER_SECOND))
}

/// Perspective projection for the full client area.
///
/// Degenerate dimensions fall back to a square aspect ratio.
fn projection_matrix(width: i32, height: i32) -> Matrix4<f32> {
    #[expect(clippy::cast_precision_loss)]
    let aspect = if width > 0 && height > 0 {
        width as f32 / height as f32
    } else {
        1.0
    };
    perspective(FIELD_OF_VIEW, aspect, 0.1, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::SquareMatrix;

    #[test]
    fn rotation_starts_at_identity() {
        assert_eq!(rotation_matrix(0.0), Matrix4::identity());
    }

    #[test]
    fn rotation_angle_tracks_elapsed_time() {
        // 2 seconds at 45 deg/s is a quarter turn: +x maps to -z.
        let m = rotation_matrix(2.0);
        let rotated = m * cgmath::Vector4::new(1.0, 0.0, 0.0, 1.0);
        assert!(rotated.x.abs() < 1e-6);
        assert!((rotated.z + 1.0).abs() < 1e-6);
    }

    #[test]
    fn projection_is_idempotent_for_equal_dimensions() {
        let first = projection_matrix(1024, 768);
        let second = projection_matrix(1024, 768);
        assert_eq!(first, second);
    }

    #[test]
    fn projection_guards_degenerate_dimensions() {
        let square = projection_matrix(0, 0);
        assert_eq!(square, projection_matrix(600, 600));
    }
}
