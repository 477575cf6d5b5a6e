//! A minimal cross-platform textured-quad renderer using OpenGL via [glow].
//!
//! This crate holds the GPU-facing half of a small rendering demo: the host
//! (a GLFW/winit window on desktop, a canvas frame callback on the web)
//! owns the context and the event loop, and drives a [`Scene`] that owns
//! every GPU object it draws with.
//!
//! # Pieces
//!
//! - **Ownership wrappers** ([`gl::handle`]): move-only RAII owners for
//!   single handles and for batches of buffers, vertex arrays and textures.
//!   Each handle has exactly one owner and is released exactly once.
//! - **Shader builder** ([`gl::shader`]): compiles and links programs,
//!   embedding the context's diagnostic log and the offending source in
//!   build failures.
//! - **Image decoder** ([`decode`]): sniffs PNG/JPEG from the leading bytes
//!   and produces a flat pixel buffer with width/height/format metadata.
//! - **Resource loader** ([`resource`]): compiled-in byte tables and
//!   (off-web) whole-file reads behind one read-only interface.
//! - **Scenes** ([`scene`]): a two-texture blending quad ([`QuadScene`])
//!   and a rotating perspective rectangle ([`SpinScene`]), both driving a
//!   single six-index draw call per frame.
//! - **Key mapper** ([`input`]): normalizes textual key codes for the web
//!   host; unknown codes map to a sentinel, never an error.
//!
//! # Safety
//!
//! Everything that touches the GPU requires a valid, current GL context, so
//! those entry points are `unsafe fn`; the decoder, loader and key mapper
//! are plain safe code.
//!
//! [glow]: https://docs.rs/glow

pub mod decode;
pub mod error;
pub mod gl;
pub mod input;
pub mod logging;
pub mod resource;
pub mod scene;
pub mod shaders;

pub use decode::{decode, DecodedImage, PixelFormat};
pub use error::{Error, GlErrorCode};
pub use gl::handle::{Resource, ResourceArray};
pub use gl::shader::{ProgramUnit, ShaderStage, ShaderUnit};
pub use input::{parse_key, Key};
pub use resource::{ByteSource, EmbeddedResources, ResourceBytes};
pub use scene::{QuadScene, Scene, SpinScene};

#[cfg(not(target_arch = "wasm32"))]
pub use resource::FileResource;
