//! Error handling for VecEdit
//!
//! Errors are split by where they originate:
//! - Document errors (parsing and decoding persisted shape trees)
//! - Geometry errors (caller-requested validation of shape geometry)
//! - Command errors (broken undo/redo invariants)
//!
//! User-input guards (grouping a single shape, a drag that never moved) are
//! not errors at all; the operations simply leave the scene unchanged.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Document error type
///
/// Raised while decoding a persisted document. A document error always leaves
/// the scene untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DocumentError {
    /// The `type` tag of a shape record is not recognised
    #[error("Unknown shape type: {type_name}")]
    UnknownShapeType {
        /// The unrecognised tag.
        type_name: String,
    },

    /// The document text is not valid
    #[error("Malformed document: {reason}")]
    Parse {
        /// The parser's description of the problem.
        reason: String,
    },

    /// The document was written by an incompatible format version
    #[error("Unsupported document version: {version}")]
    UnsupportedVersion {
        /// The version tag found in the document.
        version: String,
    },

    /// A color string could not be decoded
    #[error("Invalid color '{value}'")]
    InvalidColor {
        /// The rejected color string.
        value: String,
    },

    /// A stroke width was not a positive integer
    #[error("Invalid stroke width {width}: must be at least 1")]
    InvalidStrokeWidth {
        /// The rejected width.
        width: u32,
    },
}

/// Geometry error type
///
/// Only produced when a caller opts into strict validation; the shape model
/// itself accepts degenerate geometry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Geometry rejected by a validation policy
    #[error("Invalid {kind} geometry: {reason}")]
    InvalidGeometry {
        /// The shape kind being validated.
        kind: String,
        /// Why the geometry was rejected.
        reason: String,
    },
}

/// Command error type
///
/// A command error means a command's captured state no longer matches the
/// scene it is applied to. This is a programming error in command
/// construction, never a user mistake.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    /// A shape captured by the command is not where the command expects it
    #[error("{command}: shape {id} is missing from the scene")]
    MissingShape {
        /// Display name of the failing command.
        command: String,
        /// Identity of the missing shape.
        id: u64,
    },

    /// The command's preconditions do not hold
    #[error("{command}: {reason}")]
    InvariantViolation {
        /// Display name of the failing command.
        command: String,
        /// Description of the broken invariant.
        reason: String,
    },
}

/// Main error type for VecEdit
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Document error
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// Geometry error
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Command error
    #[error(transparent)]
    Command(#[from] CommandError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this error came from decoding a document
    pub fn is_document_error(&self) -> bool {
        matches!(self, Error::Document(_))
    }

    /// Check if this error signals a broken undo/redo invariant
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, Error::Command(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
