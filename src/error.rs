//! Error types for the logic-circuit editor.
//!
//! This module provides a unified error type [`SimError`] used by the
//! frontends (command parsing, stdin/stdout I/O) and by graph consistency
//! checking. Core editing operations never return these errors: per the
//! editing protocol, an invalid gesture is a silent no-op surfaced only
//! through the editor's status line.

use thiserror::Error;

/// Result type alias using [`SimError`].
pub type Result<T> = std::result::Result<T, SimError>;

/// Unified error type for all frontend and consistency operations.
#[derive(Error, Debug)]
pub enum SimError {
    // ============ Command Parsing Errors ============
    /// Malformed command line in the CLI frontend
    #[error("Command error at line {line}: {message}")]
    CommandError { line: usize, message: String },

    /// Unrecognized component kind name
    #[error("Unknown component kind '{kind}'")]
    UnknownKind { kind: String },

    /// A command referenced a node id not present in the graph
    #[error("No node N{id} in the circuit")]
    NodeNotFound { id: u32 },

    // ============ Graph Consistency Errors ============
    /// A structural invariant of the graph does not hold
    #[error("Inconsistent graph: {message}")]
    Inconsistent { message: String },

    // ============ I/O Errors ============
    /// Error reading command input
    #[error("Failed to read command input: {source}")]
    ReadInput {
        #[source]
        source: std::io::Error,
    },

    /// Error writing frame output
    #[error("Failed to write output: {source}")]
    WriteOutput {
        #[source]
        source: std::io::Error,
    },
}

impl SimError {
    /// Create a command parse error
    pub fn command(line: usize, message: impl Into<String>) -> Self {
        Self::CommandError {
            line,
            message: message.into(),
        }
    }

    /// Create an unknown-kind error
    pub fn unknown_kind(kind: impl Into<String>) -> Self {
        Self::UnknownKind { kind: kind.into() }
    }

    /// Create a graph consistency error
    pub fn inconsistent(message: impl Into<String>) -> Self {
        Self::Inconsistent {
            message: message.into(),
        }
    }
}
