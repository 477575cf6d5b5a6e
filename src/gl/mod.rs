//! Ownership wrappers and builders for raw GL objects.
//!
//! Everything in this module issues calls through [`glow`] and therefore
//! requires a valid, current context; the entry points are `unsafe fn` for
//! that reason, matching the convention used throughout the crate.

pub mod handle;
pub mod shader;

use crate::error::{Error, GlErrorCode};
use glow::HasContext;

/// Promote a pending context error to a failure.
///
/// Reads `glGetError` once and, if it reports a nonzero code, wraps it in
/// [`Error::Context`] attributed to `call`.
///
/// # Safety
///
/// Requires a valid, current GL context.
///
/// # Errors
///
/// Returns [`Error::Context`] when the context has an error recorded.
pub unsafe fn check_error(gl: &glow::Context, call: &'static str) -> Result<(), Error> {
    match GlErrorCode::from_raw(unsafe { gl.get_error() }) {
        None => Ok(()),
        Some(code) => Err(Error::Context { call, code }),
    }
}
