//! Read-only access to named resources.
//!
//! Two byte sources share the [`ByteSource`] interface: a compiled-in table
//! of named byte blobs (the `include_bytes!` idiom, resolved from process
//! memory with no explicit release) and, off the web target, a whole-file
//! read of a filesystem path. Both are consumed once at startup to feed the
//! shader builder and the image decoder.

use crate::error::Error;

/// A named read-only run of bytes.
pub trait ByteSource {
    /// The logical resource name (e.g. `"shader/text.vert"`).
    fn name(&self) -> &str;

    /// The resource's bytes.
    fn data(&self) -> &[u8];

    /// Length of [`data`](Self::data) in bytes.
    fn len(&self) -> usize {
        self.data().len()
    }

    /// Whether the resource is empty.
    fn is_empty(&self) -> bool {
        self.data().is_empty()
    }
}

/// A view into a resource owned by a loader.
///
/// The lifetime ties the view to the loader that produced it, so it can
/// never outlive the backing storage.
#[derive(Debug, Clone, Copy)]
pub struct ResourceBytes<'a> {
    name: &'a str,
    data: &'a [u8],
}

impl ByteSource for ResourceBytes<'_> {
    fn name(&self) -> &str {
        self.name
    }

    fn data(&self) -> &[u8] {
        self.data
    }
}

/// Resolver for resources compiled into the executable.
///
/// The table entries typically come from `include_bytes!`, which places the
/// data in the binary's read-only section; the returned views point straight
/// into process memory and need no release.
pub struct EmbeddedResources {
    entries: &'static [(&'static str, &'static [u8])],
}

impl EmbeddedResources {
    /// Wrap a static name/bytes table.
    #[must_use]
    pub const fn new(entries: &'static [(&'static str, &'static [u8])]) -> Self {
        Self { entries }
    }

    /// Resolve a resource by name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when no table entry matches.
    pub fn get(&self, name: &str) -> Result<ResourceBytes<'static>, Error> {
        self.entries
            .iter()
            .find(|(entry, _)| *entry == name)
            .map(|(entry, data)| ResourceBytes { name: entry, data })
            .ok_or_else(|| Error::NotFound {
                name: name.to_owned(),
            })
    }
}

/// A resource read from the filesystem.
///
/// The whole file is read once at open time; the bytes stay valid for the
/// lifetime of this value. Not available on the web target, which has no
/// filesystem.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub struct FileResource {
    name: String,
    data: Vec<u8>,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileResource {
    /// Read the file at `path`, using `name` as the logical resource name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when the path does not exist and
    /// [`Error::Io`] for any other read failure.
    pub fn open(name: &str, path: impl AsRef<std::path::Path>) -> Result<Self, Error> {
        let data = std::fs::read(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                Error::NotFound {
                    name: name.to_owned(),
                }
            } else {
                Error::Io {
                    name: name.to_owned(),
                    source,
                }
            }
        })?;
        Ok(Self {
            name: name.to_owned(),
            data,
        })
    }

    /// Borrow the loaded bytes as a view.
    #[must_use]
    pub fn bytes(&self) -> ResourceBytes<'_> {
        ResourceBytes {
            name: &self.name,
            data: &self.data,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ByteSource for FileResource {
    fn name(&self) -> &str {
        &self.name
    }

    fn data(&self) -> &[u8] {
        &self.data
    }
}
