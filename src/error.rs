//! Crate-wide error taxonomy.
//!
//! Every failure is constructed at the point of detection and propagates up
//! immediately; RAII wrappers release any partially-created GPU objects along
//! the way. Two benign conditions are deliberately *not* errors: an unresolved
//! shader attribute/uniform name (returns `None`) and an unrecognized input
//! key code (returns [`Key::None`]).
//!
//! [`Key::None`]: crate::input::Key::None

use crate::gl::shader::ShaderStage;

/// Category for a nonzero `glGetError` code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlErrorCode {
    /// `GL_INVALID_ENUM`.
    InvalidEnum,
    /// `GL_INVALID_VALUE`.
    InvalidValue,
    /// `GL_INVALID_OPERATION`.
    InvalidOperation,
    /// `GL_INVALID_FRAMEBUFFER_OPERATION`.
    InvalidFramebufferOperation,
    /// `GL_OUT_OF_MEMORY`.
    OutOfMemory,
    /// A code outside the core error enum (e.g. from a vendor extension).
    Unknown(u32),
}

impl GlErrorCode {
    /// Map a raw `glGetError` result to a category.
    ///
    /// Returns `None` for `GL_NO_ERROR`.
    #[must_use]
    pub fn from_raw(code: u32) -> Option<Self> {
        match code {
            glow::NO_ERROR => None,
            glow::INVALID_ENUM => Some(Self::InvalidEnum),
            glow::INVALID_VALUE => Some(Self::InvalidValue),
            glow::INVALID_OPERATION => Some(Self::InvalidOperation),
            glow::INVALID_FRAMEBUFFER_OPERATION => Some(Self::InvalidFramebufferOperation),
            glow::OUT_OF_MEMORY => Some(Self::OutOfMemory),
            other => Some(Self::Unknown(other)),
        }
    }
}

impl std::fmt::Display for GlErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidEnum => {
                f.write_str("An unacceptable value was specified for an enumerated argument.")
            }
            Self::InvalidValue => f.write_str("A numeric argument is out of range."),
            Self::InvalidOperation => {
                f.write_str("The specified operation is not allowed in the current state.")
            }
            Self::InvalidFramebufferOperation => {
                f.write_str("The framebuffer object is not complete.")
            }
            Self::OutOfMemory => {
                f.write_str("There is not enough memory left to execute the command.")
            }
            Self::Unknown(code) => write!(f, "Unknown error code: {code}"),
        }
    }
}

/// All failures this crate can report.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The graphics context reported a nonzero error code after a call.
    #[error("{call} failed.\n{code}")]
    Context {
        /// The call (or batch of calls) that was checked.
        call: &'static str,
        /// The reported error category.
        code: GlErrorCode,
    },

    /// Shader compilation failed. Carries the compiler log and the offending
    /// source text.
    #[error("{stage} shader compilation failed.\n{log}\n{shader_source}")]
    Compile {
        /// Which stage failed to compile.
        stage: ShaderStage,
        /// The info log retrieved from the context.
        log: String,
        /// The shader source that was submitted.
        shader_source: String,
    },

    /// Program linking failed. Carries the link log and both shader sources.
    #[error("Program linking failed.\n{log}\n\n{vertex_source}\n\n{fragment_source}")]
    Link {
        /// The info log retrieved from the context.
        log: String,
        /// Source of the vertex shader that was attached.
        vertex_source: String,
        /// Source of the fragment shader that was attached.
        fragment_source: String,
    },

    /// The input bytes match neither the PNG signature nor a JPEG header.
    #[error("Unsupported image format: {name}")]
    UnsupportedFormat {
        /// Logical name of the offending resource.
        name: String,
    },

    /// A sniffed image failed to decode.
    #[error("Could not read image data: {name}\n{detail}")]
    CorruptData {
        /// Logical name of the offending resource.
        name: String,
        /// Decoder diagnostic.
        detail: String,
    },

    /// A named resource does not exist.
    #[error("Could not find resource: {name}")]
    NotFound {
        /// Logical name of the missing resource.
        name: String,
    },

    /// Reading a resource failed.
    #[error("Could not read resource: {name}")]
    Io {
        /// Logical name of the resource being read.
        name: String,
        /// The underlying I/O failure.
        source: std::io::Error,
    },

    /// A checked indexed access was out of range.
    #[error("{kind} index out of range: {index} >= {len}")]
    OutOfRange {
        /// What was being indexed (e.g. `"buffer"`).
        kind: &'static str,
        /// The requested index.
        index: usize,
        /// The number of owned handles.
        len: usize,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn no_error_maps_to_none() {
        assert_eq!(GlErrorCode::from_raw(glow::NO_ERROR), None);
    }

    #[test]
    fn core_codes_map_to_categories() {
        assert_eq!(
            GlErrorCode::from_raw(glow::INVALID_OPERATION),
            Some(GlErrorCode::InvalidOperation)
        );
        assert_eq!(
            GlErrorCode::from_raw(glow::OUT_OF_MEMORY),
            Some(GlErrorCode::OutOfMemory)
        );
    }

    #[test]
    fn unexpected_code_is_preserved() {
        let code = GlErrorCode::from_raw(0xBEEF).unwrap();
        assert_eq!(code, GlErrorCode::Unknown(0xBEEF));
        assert!(code.to_string().contains("48879"));
    }

    #[test]
    fn compile_error_embeds_log_and_source() {
        let err = Error::Compile {
            stage: ShaderStage::Fragment,
            log: "0:1: syntax error".to_owned(),
            shader_source: "void main() {}".to_owned(),
        };
        let message = err.to_string();
        assert!(message.contains("Fragment"));
        assert!(message.contains("syntax error"));
        assert!(message.contains("void main() {}"));
        // The embedded source is diagnostic text, not an error cause.
        assert!(std::error::Error::source(&err).is_none());
    }

    #[test]
    fn context_error_names_the_call() {
        let err = Error::Context {
            call: "glGenBuffers",
            code: GlErrorCode::OutOfMemory,
        };
        let message = err.to_string();
        assert!(message.contains("glGenBuffers"));
        assert!(message.contains("not enough memory"));
    }
}
