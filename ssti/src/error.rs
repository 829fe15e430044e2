//!
//! # Black-Box Result and Error Types
//!

// Std-Lib
use std::path::PathBuf;

// Local Imports
use crate::template::Artifact;
use crate::utils;

/// # [BboxError] Result Type
pub type BboxResult<T> = Result<T, BboxError>;

///
/// # Black-Box Generation Error Enumeration
///
/// Each variant names the precondition or resource a generation pass found unmet.
///
pub enum BboxError {
    /// Unsupported configuration, e.g. an unknown IPC protocol
    Configuration(String),
    /// Port declared with a category other than clock, input, output or inout
    PortType { name: String, category: String },
    /// Generation attempted with an empty port list
    PortsNotSet,
    /// Template file missing for `artifact`
    TemplateNotFound { artifact: Artifact, path: PathBuf },
    /// Context key required by the artifact's schema, or referenced by its template, but not provided
    Placeholder { artifact: Artifact, key: String },
    /// Malformed placeholder syntax in a template
    TemplateSyntax {
        artifact: Artifact,
        line: usize,
        msg: String,
    },
    /// Declared type whose bit-width cannot be determined
    Width { declared_type: String },
    /// Boxed External Errors
    Boxed(Box<dyn std::error::Error + Send + Sync>),
    /// Uncategorized Error, with String Message
    Str(String),
}
impl BboxError {
    /// Create a [BboxError::Str] from anything String-convertible
    pub fn msg(s: impl Into<String>) -> Self {
        Self::Str(s.into())
    }
    /// Create an error-variant [Result] of our [BboxError::Str] variant
    pub fn fail<T>(s: impl Into<String>) -> Result<T, Self> {
        Err(Self::msg(s))
    }
    /// Create a [BboxError::Width] for `declared_type`
    pub fn width(declared_type: impl Into<String>) -> Self {
        Self::Width {
            declared_type: declared_type.into(),
        }
    }
}
impl std::fmt::Debug for BboxError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            BboxError::Configuration(msg) => write!(f, "Configuration Error: {}", msg),
            BboxError::PortType { name, category } => write!(
                f,
                "Port Type Error: port `{}` has category `{}`, expected one of clock, input, output, inout",
                name, category
            ),
            BboxError::PortsNotSet => write!(f, "Ports Not Set: no ports were declared"),
            BboxError::TemplateNotFound { artifact, path } => {
                write!(f, "{} template not found: {:?}", artifact, path)
            }
            BboxError::Placeholder { artifact, key } => {
                write!(f, "{} template: no value for placeholder `{}`", artifact, key)
            }
            BboxError::TemplateSyntax { artifact, line, msg } => {
                write!(f, "{} template, line {}: {}", artifact, line, msg)
            }
            BboxError::Width { declared_type } => {
                write!(f, "Cannot determine bit-width of type `{}`", declared_type)
            }
            BboxError::Boxed(err) => err.fmt(f),
            BboxError::Str(err) => err.fmt(f),
        }
    }
}
impl std::fmt::Display for BboxError {
    /// Delegates to the [Debug] implementation
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}
impl std::error::Error for BboxError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Boxed(e) => Some(&**e),
            _ => None,
        }
    }
}
impl From<String> for BboxError {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}
impl From<&str> for BboxError {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}
impl From<std::io::Error> for BboxError {
    fn from(e: std::io::Error) -> Self {
        Self::Boxed(Box::new(e))
    }
}
impl From<utils::ser::Error> for BboxError {
    fn from(e: utils::ser::Error) -> Self {
        Self::Boxed(Box::new(e))
    }
}
