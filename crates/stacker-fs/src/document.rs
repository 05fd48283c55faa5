//! Format-aware document parsing
//!
//! Stack configuration is always YAML, while templates may be YAML or JSON.
//! The format is detected from the file extension.

use serde::de::DeserializeOwned;

use crate::{Error, NormalizedPath, Result, io};

/// Structured document formats understood by stacker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Json,
}

impl DocumentFormat {
    /// Detect the format from a bare extension (no leading dot).
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_lowercase().as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Detect the format from a path's extension.
    pub fn from_path(path: &NormalizedPath) -> Result<Self> {
        let extension = path.extension().unwrap_or("");
        Self::from_extension(extension).ok_or_else(|| Error::UnsupportedFormat {
            extension: extension.to_string(),
        })
    }

    /// Human-readable format name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Yaml => "YAML",
            Self::Json => "JSON",
        }
    }

    /// Parse `content` read from `path` into `T`.
    pub fn parse<T: DeserializeOwned>(&self, path: &NormalizedPath, content: &str) -> Result<T> {
        match self {
            Self::Yaml => serde_yaml::from_str(content).map_err(|e| self.parse_error(path, e)),
            Self::Json => serde_json::from_str(content).map_err(|e| self.parse_error(path, e)),
        }
    }

    /// Parse `content`, treating an empty YAML document as `T::default()`.
    ///
    /// YAML merge keys (`<<: *anchor`) are expanded before deserializing.
    ///
    /// A YAML file containing only comments or whitespace has no value; such
    /// files are valid and contribute nothing.
    pub fn parse_or_default<T: DeserializeOwned + Default>(
        &self,
        path: &NormalizedPath,
        content: &str,
    ) -> Result<T> {
        match self {
            Self::Yaml => {
                let mut value: serde_yaml::Value =
                    serde_yaml::from_str(content).map_err(|e| self.parse_error(path, e))?;
                if value.is_null() {
                    return Ok(T::default());
                }
                value.apply_merge().map_err(|e| self.parse_error(path, e))?;
                serde_yaml::from_value(value).map_err(|e| self.parse_error(path, e))
            }
            Self::Json => self.parse(path, content),
        }
    }

    fn parse_error(&self, path: &NormalizedPath, error: impl std::fmt::Display) -> Error {
        Error::Parse {
            path: path.to_native(),
            format: self.name().into(),
            message: error.to_string(),
        }
    }
}

/// Load a document from disk, detecting the format from its extension.
pub fn load<T: DeserializeOwned + Default>(path: &NormalizedPath) -> Result<T> {
    let format = DocumentFormat::from_path(path)?;
    let content = io::read_text(path)?;
    tracing::trace!(path = %path, format = format.name(), "Parsing document");
    format.parse_or_default(path, &content)
}
