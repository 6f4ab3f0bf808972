//! Retrieval of raw performance files.
//!
//! Downloading and caching live outside this crate. A model only needs
//! something that can turn a file name into bytes, so that boundary is the
//! [`DataSource`] trait.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;

/// Base URL of APC's published performance files.
pub const APC_FILES_URL: &str = "https://www.apcprop.com/files/";

/// Supplies the raw bytes of a named performance file.
pub trait DataSource {
    /// Returns the contents of the file called `name`.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] if the file cannot be retrieved.
    fn fetch(&self, name: &str) -> Result<Vec<u8>, FetchError>;
}

impl<T: DataSource + ?Sized> DataSource for &T {
    fn fetch(&self, name: &str) -> Result<Vec<u8>, FetchError> {
        (**self).fetch(name)
    }
}

/// Errors raised by a [`DataSource`].
#[derive(Debug, Error)]
pub enum FetchError {
    /// The source has no file with this name.
    #[error("performance file not found: {name}")]
    NotFound { name: String },

    /// Reading the file failed.
    #[error("failed to read performance file {name}")]
    Io {
        name: String,
        #[source]
        source: io::Error,
    },

    /// A transport-level failure in a network-backed source.
    #[error("failed to fetch performance file {name}")]
    Transport {
        name: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl FetchError {
    /// Wraps a transport error from a network-backed source.
    pub fn transport(
        name: impl Into<String>,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Transport {
            name: name.into(),
            source: Box::new(err),
        }
    }
}

/// A [`DataSource`] reading previously downloaded files from a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directory {
    root: PathBuf,
}

impl Directory {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl DataSource for Directory {
    fn fetch(&self, name: &str) -> Result<Vec<u8>, FetchError> {
        let path = self.root.join(name);
        fs::read(&path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => FetchError::NotFound {
                name: name.to_owned(),
            },
            _ => FetchError::Io {
                name: name.to_owned(),
                source,
            },
        })
    }
}
