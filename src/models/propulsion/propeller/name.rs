use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;
use thiserror::Error;

use super::source::APC_FILES_URL;

static SIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)x(\d+)").expect("valid size pattern"));

/// A propeller model name such as `PER3_20x13E`.
///
/// The first `<diameter>x<pitch>` pair in the name gives the propeller's size
/// labels. They identify the propeller and are never used in arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelName {
    name: String,
    diameter: String,
    pitch: String,
}

/// Error returned when a model name has no `<diameter>x<pitch>` part.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("model name {name:?} has no <diameter>x<pitch> size")]
pub struct InvalidModelName {
    pub name: String,
}

impl ModelName {
    /// Parses a model name.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidModelName`] if the name carries no size.
    pub fn new(name: impl Into<String>) -> Result<Self, InvalidModelName> {
        let name = name.into();
        let size = SIZE
            .captures(&name)
            .map(|size| (size[1].to_owned(), size[2].to_owned()));
        let Some((diameter, pitch)) = size else {
            return Err(InvalidModelName { name });
        };

        Ok(Self {
            name,
            diameter,
            pitch,
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// Diameter label, e.g. `20` for `PER3_20x13E`.
    #[must_use]
    pub fn diameter(&self) -> &str {
        &self.diameter
    }

    /// Pitch label, e.g. `13` for `PER3_20x13E`.
    #[must_use]
    pub fn pitch(&self) -> &str {
        &self.pitch
    }

    /// Name of the performance file to request from a data source.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.name
    }

    /// Location of the published performance file.
    #[must_use]
    pub fn url(&self) -> String {
        format!("{APC_FILES_URL}{}", self.file_name())
    }
}

impl FromStr for ModelName {
    type Err = InvalidModelName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for ModelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
