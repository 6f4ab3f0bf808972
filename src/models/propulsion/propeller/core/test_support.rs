use std::collections::HashMap;

use crate::models::propulsion::propeller::{DataSource, FetchError};

/// Model name of the bundled performance file.
pub(crate) const FIXTURE_NAME: &str = "PER3_20x13E";

/// A trimmed APC performance file for a 20x13 propeller, in imperial units.
///
/// Four sections (3000 to 6000 rpm, 26 data rows) plus title, heading, and
/// footnote lines, a free-text line with numbers in it, and one truncated row.
pub(crate) const FIXTURE: &str = include_str!("test_support/PER3_20x13E.dat");

/// A [`DataSource`] serving files from memory.
#[derive(Debug, Default)]
pub(crate) struct MemorySource {
    files: HashMap<String, Vec<u8>>,
}

impl MemorySource {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// A source holding only the bundled fixture under [`FIXTURE_NAME`].
    pub(crate) fn with_fixture() -> Self {
        Self::new().with_file(FIXTURE_NAME, FIXTURE.as_bytes())
    }

    pub(crate) fn with_file(mut self, name: &str, contents: &[u8]) -> Self {
        self.files.insert(name.to_owned(), contents.to_vec());
        self
    }
}

impl DataSource for MemorySource {
    fn fetch(&self, name: &str) -> Result<Vec<u8>, FetchError> {
        self.files
            .get(name)
            .cloned()
            .ok_or_else(|| FetchError::NotFound {
                name: name.to_owned(),
            })
    }
}
