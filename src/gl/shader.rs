//! Shader compilation and program linking.
//!
//! Construction either yields a fully usable object or fails with the
//! context's diagnostic log embedded in the error, with the offending source
//! text attached. The shader/program handles themselves are released by RAII
//! on every path, including the failing ones.

use std::sync::Arc;

use glow::HasContext;

use crate::error::Error;
use crate::gl::check_error;
use crate::gl::handle::{ProgramDisposer, Resource, ShaderDisposer};

/// Which pipeline stage a shader object belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    /// A vertex shader.
    Vertex,
    /// A fragment shader.
    Fragment,
}

impl ShaderStage {
    fn gl_enum(self) -> u32 {
        match self {
            Self::Vertex => glow::VERTEX_SHADER,
            Self::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Vertex => f.write_str("Vertex"),
            Self::Fragment => f.write_str("Fragment"),
        }
    }
}

/// A compiled shader object plus its source text.
///
/// The source is retained so that link failures can embed it in their
/// diagnostics. Once construction returns, the object is guaranteed
/// compiled.
pub struct ShaderUnit {
    handle: Resource<glow::Shader, ShaderDisposer>,
    stage: ShaderStage,
    source: String,
}

impl ShaderUnit {
    /// Compile a shader of the given stage from source text.
    ///
    /// # Safety
    ///
    /// Requires a valid, current GL context.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Compile`] with the info log and the submitted source
    /// when compilation fails, or [`Error::Context`] if the context rejects
    /// one of the calls outright.
    pub unsafe fn compile(
        gl: &Arc<glow::Context>,
        stage: ShaderStage,
        source: &str,
    ) -> Result<Self, Error> {
        let raw = unsafe { gl.create_shader(stage.gl_enum()) }.map_err(|_| Error::Context {
            call: "glCreateShader",
            code: crate::error::GlErrorCode::from_raw(unsafe { gl.get_error() })
                .unwrap_or(crate::error::GlErrorCode::Unknown(0)),
        })?;
        let handle = Resource::new(raw, ShaderDisposer { gl: Arc::clone(gl) });

        unsafe {
            gl.shader_source(raw, source);
            gl.compile_shader(raw);
            check_error(gl, "glCompileShader")?;

            if !gl.get_shader_compile_status(raw) {
                let log = gl.get_shader_info_log(raw);
                // `handle` is dropped here, deleting the shader object.
                return Err(Error::Compile {
                    stage,
                    log,
                    shader_source: source.to_owned(),
                });
            }
        }

        Ok(Self {
            handle,
            stage,
            source: source.to_owned(),
        })
    }

    /// The raw shader object.
    #[must_use]
    pub fn raw(&self) -> glow::Shader {
        self.handle.raw()
    }

    /// The stage this shader was compiled for.
    #[must_use]
    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    /// The source text this shader was compiled from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }
}

/// A linked program composed of one vertex and one fragment shader.
///
/// The shaders are detached after the link attempt regardless of its
/// outcome; their compiled state is no longer needed once the program
/// exists. There is no partially-linked state observable from outside.
pub struct ProgramUnit {
    handle: Resource<glow::Program, ProgramDisposer>,
    gl: Arc<glow::Context>,
}

impl ProgramUnit {
    /// Link an already-compiled vertex/fragment shader pair.
    ///
    /// # Safety
    ///
    /// Requires a valid, current GL context.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Link`] with the link log and both shaders' source
    /// when linking fails, or [`Error::Context`] if the context rejects one
    /// of the calls.
    pub unsafe fn link(
        gl: &Arc<glow::Context>,
        vertex: &ShaderUnit,
        fragment: &ShaderUnit,
    ) -> Result<Self, Error> {
        let raw = unsafe { gl.create_program() }.map_err(|_| Error::Context {
            call: "glCreateProgram",
            code: crate::error::GlErrorCode::from_raw(unsafe { gl.get_error() })
                .unwrap_or(crate::error::GlErrorCode::Unknown(0)),
        })?;
        let handle = Resource::new(raw, ProgramDisposer { gl: Arc::clone(gl) });

        unsafe {
            gl.attach_shader(raw, vertex.raw());
            gl.attach_shader(raw, fragment.raw());
            gl.link_program(raw);

            let linked = gl.get_program_link_status(raw);

            // Detach on both the success and the failure path.
            gl.detach_shader(raw, fragment.raw());
            gl.detach_shader(raw, vertex.raw());
            check_error(gl, "glLinkProgram")?;

            if !linked {
                let log = gl.get_program_info_log(raw);
                // `handle` is dropped here, deleting the program object.
                return Err(Error::Link {
                    log,
                    vertex_source: vertex.source().to_owned(),
                    fragment_source: fragment.source().to_owned(),
                });
            }
        }

        Ok(Self {
            handle,
            gl: Arc::clone(gl),
        })
    }

    /// Compile both stages from source and link them.
    ///
    /// The intermediate shader objects are deleted once the program is
    /// linked.
    ///
    /// # Safety
    ///
    /// Requires a valid, current GL context.
    ///
    /// # Errors
    ///
    /// Propagates [`Error::Compile`], [`Error::Link`] and [`Error::Context`]
    /// from the individual build steps.
    pub unsafe fn from_sources(
        gl: &Arc<glow::Context>,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<Self, Error> {
        let vertex = unsafe { ShaderUnit::compile(gl, ShaderStage::Vertex, vertex_source) }?;
        let fragment = unsafe { ShaderUnit::compile(gl, ShaderStage::Fragment, fragment_source) }?;
        unsafe { Self::link(gl, &vertex, &fragment) }
    }

    /// The raw program object.
    #[must_use]
    pub fn raw(&self) -> glow::Program {
        self.handle.raw()
    }

    /// Look up a vertex attribute location by name.
    ///
    /// Returns `None` when the name is unbound, which callers must tolerate
    /// silently: the context drops attributes that the compiler optimized
    /// out, and that is not a failure.
    ///
    /// # Safety
    ///
    /// Requires a valid, current GL context.
    #[must_use]
    pub unsafe fn attribute(&self, name: &str) -> Option<u32> {
        unsafe { self.gl.get_attrib_location(self.handle.raw(), name) }
    }

    /// Look up a uniform location by name.
    ///
    /// Returns `None` when the name is unbound; same convention as
    /// [`attribute`](Self::attribute).
    ///
    /// # Safety
    ///
    /// Requires a valid, current GL context.
    #[must_use]
    pub unsafe fn uniform(&self, name: &str) -> Option<glow::UniformLocation> {
        unsafe { self.gl.get_uniform_location(self.handle.raw(), name) }
    }
}
