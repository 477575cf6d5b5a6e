//! Move-only ownership wrappers for native GL handles.
//!
//! [`Resource`] owns a single handle, [`ResourceArray`] owns a batch that is
//! acquired together and released together. Neither type is cloneable, so
//! each handle has exactly one owner at any time and is released exactly
//! once. Release goes through the [`Dispose`] seam, which keeps the
//! ownership semantics testable without a live context.

use std::ops::Index;
use std::sync::Arc;

use glow::HasContext;

use crate::error::Error;
use crate::gl::check_error;

/// Release seam for an owned raw handle.
///
/// The GL-backed implementations hold an `Arc<glow::Context>` and issue the
/// matching `glDelete*` call.
pub trait Dispose<T> {
    /// Release `raw`. Called at most once per owned handle.
    fn dispose(&self, raw: T);
}

/// Move-only owner of a single raw handle.
///
/// Dropping the owner releases the handle through its disposer. There is no
/// implicit conversion to the raw value; use [`raw`](Self::raw).
pub struct Resource<T: Copy, D: Dispose<T>> {
    raw: Option<T>,
    disposer: D,
}

impl<T: Copy, D: Dispose<T>> Resource<T, D> {
    /// Adopt ownership of `raw`.
    pub fn new(raw: T, disposer: D) -> Self {
        Self {
            raw: Some(raw),
            disposer,
        }
    }

    /// The owned raw handle.
    ///
    /// # Panics
    ///
    /// Panics if ownership was previously released with [`take`](Self::take).
    #[must_use]
    pub fn raw(&self) -> T {
        self.raw.expect("resource already released")
    }

    /// Give up ownership without releasing the handle.
    ///
    /// Returns `None` if ownership was already given up. After this call the
    /// destructor is a no-op.
    pub fn take(&mut self) -> Option<T> {
        self.raw.take()
    }

    /// Whether this owner still holds a handle.
    #[must_use]
    pub fn is_owned(&self) -> bool {
        self.raw.is_some()
    }
}

impl<T: Copy, D: Dispose<T>> Drop for Resource<T, D> {
    fn drop(&mut self) {
        if let Some(raw) = self.raw.take() {
            self.disposer.dispose(raw);
        }
    }
}

/// Move-only owner of an ordered batch of raw handles.
///
/// All slots are acquired in one pass by [`acquire`](Self::acquire) and all
/// are released together on drop; there is no partially-live state
/// observable from outside.
pub struct ResourceArray<T: Copy, D: Dispose<T>> {
    raws: Vec<T>,
    disposer: D,
}

impl<T: Copy, D: Dispose<T>> ResourceArray<T, D> {
    /// Acquire `count` handles by calling `acquire_one` for each slot.
    ///
    /// If any acquisition fails, the handles acquired so far are released
    /// before the error is returned.
    ///
    /// # Errors
    ///
    /// Propagates the first failure reported by `acquire_one`.
    pub fn acquire(
        count: usize,
        disposer: D,
        mut acquire_one: impl FnMut(usize) -> Result<T, Error>,
    ) -> Result<Self, Error> {
        let mut array = Self {
            raws: Vec::with_capacity(count),
            disposer,
        };
        for index in 0..count {
            array.raws.push(acquire_one(index)?);
        }
        Ok(array)
    }

    /// Number of owned handles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.raws.len()
    }

    /// Whether the batch is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raws.is_empty()
    }

    /// Checked access by position.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `index` is not a valid slot.
    pub fn at(&self, index: usize) -> Result<T, Error> {
        self.raws.get(index).copied().ok_or(Error::OutOfRange {
            kind: "handle",
            index,
            len: self.raws.len(),
        })
    }

    /// Iterate over the owned raw handles in order.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.raws.iter().copied()
    }
}

/// Unchecked access by position. Callers must pre-validate the index;
/// out-of-range access panics.
impl<T: Copy, D: Dispose<T>> Index<usize> for ResourceArray<T, D> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.raws[index]
    }
}

impl<T: Copy, D: Dispose<T>> Drop for ResourceArray<T, D> {
    fn drop(&mut self) {
        for raw in self.raws.drain(..) {
            self.disposer.dispose(raw);
        }
    }
}

/// Releases buffer objects with `glDeleteBuffers` semantics.
pub struct BufferDisposer {
    gl: Arc<glow::Context>,
}

impl Dispose<glow::Buffer> for BufferDisposer {
    fn dispose(&self, raw: glow::Buffer) {
        unsafe { self.gl.delete_buffer(raw) };
    }
}

/// Releases vertex array objects.
pub struct VertexArrayDisposer {
    gl: Arc<glow::Context>,
}

impl Dispose<glow::VertexArray> for VertexArrayDisposer {
    fn dispose(&self, raw: glow::VertexArray) {
        unsafe { self.gl.delete_vertex_array(raw) };
    }
}

/// Releases texture objects.
pub struct TextureDisposer {
    gl: Arc<glow::Context>,
}

impl Dispose<glow::Texture> for TextureDisposer {
    fn dispose(&self, raw: glow::Texture) {
        unsafe { self.gl.delete_texture(raw) };
    }
}

/// Releases shader objects.
pub struct ShaderDisposer {
    pub(crate) gl: Arc<glow::Context>,
}

impl Dispose<glow::Shader> for ShaderDisposer {
    fn dispose(&self, raw: glow::Shader) {
        unsafe { self.gl.delete_shader(raw) };
    }
}

/// Releases program objects.
pub struct ProgramDisposer {
    pub(crate) gl: Arc<glow::Context>,
}

impl Dispose<glow::Program> for ProgramDisposer {
    fn dispose(&self, raw: glow::Program) {
        unsafe { self.gl.delete_program(raw) };
    }
}

/// A batch of GL buffer objects.
pub type BufferArray = ResourceArray<glow::Buffer, BufferDisposer>;
/// A batch of GL vertex array objects.
pub type VertexArrayArray = ResourceArray<glow::VertexArray, VertexArrayDisposer>;
/// A batch of GL texture objects.
pub type TextureArray = ResourceArray<glow::Texture, TextureDisposer>;

/// Create `count` buffer objects as one owned batch.
///
/// # Safety
///
/// Requires a valid, current GL context.
///
/// # Errors
///
/// Returns [`Error::Context`] if the context fails to generate a name.
pub unsafe fn create_buffers(gl: &Arc<glow::Context>, count: usize) -> Result<BufferArray, Error> {
    let array = ResourceArray::acquire(count, BufferDisposer { gl: Arc::clone(gl) }, |_| {
        unsafe { gl.create_buffer() }.map_err(|_| name_error(gl, "glGenBuffers"))
    })?;
    unsafe { check_error(gl, "glGenBuffers") }?;
    Ok(array)
}

/// Create `count` vertex array objects as one owned batch.
///
/// # Safety
///
/// Requires a valid, current GL context.
///
/// # Errors
///
/// Returns [`Error::Context`] if the context fails to generate a name.
pub unsafe fn create_vertex_arrays(
    gl: &Arc<glow::Context>,
    count: usize,
) -> Result<VertexArrayArray, Error> {
    let array = ResourceArray::acquire(count, VertexArrayDisposer { gl: Arc::clone(gl) }, |_| {
        unsafe { gl.create_vertex_array() }.map_err(|_| name_error(gl, "glGenVertexArrays"))
    })?;
    unsafe { check_error(gl, "glGenVertexArrays") }?;
    Ok(array)
}

/// Create `count` texture objects as one owned batch.
///
/// # Safety
///
/// Requires a valid, current GL context.
///
/// # Errors
///
/// Returns [`Error::Context`] if the context fails to generate a name.
pub unsafe fn create_textures(
    gl: &Arc<glow::Context>,
    count: usize,
) -> Result<TextureArray, Error> {
    let array = ResourceArray::acquire(count, TextureDisposer { gl: Arc::clone(gl) }, |_| {
        unsafe { gl.create_texture() }.map_err(|_| name_error(gl, "glGenTextures"))
    })?;
    unsafe { check_error(gl, "glGenTextures") }?;
    Ok(array)
}

/// Build the context error for a failed object creation, attaching whatever
/// code the context has recorded.
fn name_error(gl: &glow::Context, call: &'static str) -> Error {
    let code = crate::error::GlErrorCode::from_raw(unsafe { gl.get_error() })
        .unwrap_or(crate::error::GlErrorCode::Unknown(0));
    Error::Context { call, code }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Disposer that records every released handle value.
    #[derive(Clone)]
    struct Recorder {
        released: Rc<RefCell<Vec<u32>>>,
    }

    impl Recorder {
        fn new() -> Self {
            Self {
                released: Rc::new(RefCell::new(Vec::new())),
            }
        }

        fn released(&self) -> Vec<u32> {
            self.released.borrow().clone()
        }
    }

    impl Dispose<u32> for Recorder {
        fn dispose(&self, raw: u32) {
            self.released.borrow_mut().push(raw);
        }
    }

    #[test]
    fn batch_acquires_and_releases_every_slot_once() {
        let recorder = Recorder::new();
        let acquired = Rc::new(RefCell::new(Vec::new()));
        {
            let acquired = Rc::clone(&acquired);
            let array = ResourceArray::acquire(5, recorder.clone(), move |index| {
                let raw = u32::try_from(index).unwrap() + 100;
                acquired.borrow_mut().push(raw);
                Ok(raw)
            })
            .unwrap();
            assert_eq!(array.len(), 5);
            assert!(recorder.released().is_empty());
        }
        let mut acquired = acquired.borrow().clone();
        let mut released = recorder.released();
        assert_eq!(acquired.len(), 5);
        assert_eq!(released.len(), 5);
        acquired.sort_unstable();
        acquired.dedup();
        assert_eq!(acquired.len(), 5, "acquired handles must be distinct");
        released.sort_unstable();
        assert_eq!(acquired, released);
    }

    #[test]
    fn failed_acquisition_releases_earlier_slots() {
        let recorder = Recorder::new();
        let result = ResourceArray::acquire(4, recorder.clone(), |index| {
            if index < 2 {
                Ok(u32::try_from(index).unwrap())
            } else {
                Err(Error::OutOfRange {
                    kind: "handle",
                    index,
                    len: 4,
                })
            }
        });
        assert!(result.is_err());
        assert_eq!(recorder.released(), vec![0, 1]);
    }

    #[test]
    fn checked_access_rejects_out_of_range() {
        let recorder = Recorder::new();
        let array = ResourceArray::acquire(2, recorder, |i| Ok(u32::try_from(i).unwrap())).unwrap();
        assert_eq!(array.at(1).unwrap(), 1);
        match array.at(2) {
            Err(Error::OutOfRange { index: 2, len: 2, .. }) => {}
            other => panic!("expected OutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn unchecked_index_returns_raw_handle() {
        let recorder = Recorder::new();
        let array =
            ResourceArray::acquire(3, recorder, |i| Ok(u32::try_from(i).unwrap() * 7)).unwrap();
        assert_eq!(array[2], 14);
    }

    #[test]
    fn move_assign_releases_prior_resource_exactly_once() {
        let recorder = Recorder::new();
        let mut owner = Resource::new(1, recorder.clone());
        owner = Resource::new(2, recorder.clone());
        assert_eq!(recorder.released(), vec![1]);
        assert_eq!(owner.raw(), 2);
        drop(owner);
        assert_eq!(recorder.released(), vec![1, 2]);
    }

    #[test]
    fn take_transfers_ownership_out() {
        let recorder = Recorder::new();
        let mut owner = Resource::new(9, recorder.clone());
        assert_eq!(owner.take(), Some(9));
        assert!(!owner.is_owned());
        assert_eq!(owner.take(), None);
        drop(owner);
        assert!(recorder.released().is_empty(), "released handle must not be disposed");
    }

    #[test]
    fn single_resource_releases_on_drop() {
        let recorder = Recorder::new();
        {
            let owner = Resource::new(42, recorder.clone());
            assert!(owner.is_owned());
            assert_eq!(owner.raw(), 42);
        }
        assert_eq!(recorder.released(), vec![42]);
    }
}
