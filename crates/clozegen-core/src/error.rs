//! Error types for quiz generation.
//!
//! Every failure is fatal for the problem being generated: the driver never
//! skips a combination and never hands out a partial document.

use thiserror::Error;

/// An evaluator could not produce answers for one combination.
///
/// Typically raised when a physical correlation is used outside the range
/// it is valid for.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("computation failed: {message}")]
pub struct ComputationError {
    pub message: String,
}

impl ComputationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors raised by the engine's building blocks.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClozeError {
    /// A declared input variable is malformed (bad name, duplicate, bad range).
    #[error("invalid input space: {0}")]
    InputSpace(String),

    /// The evaluator rejected a combination.
    #[error(transparent)]
    Computation(#[from] ComputationError),

    /// A template placeholder names a variable absent from the context.
    #[error("template '{template}' references undefined variable '{name}'")]
    MissingVariable { name: String, template: String },

    /// An input and an output share a name, so a placeholder would be ambiguous.
    #[error("variable '{name}' is defined both as an input and as an output")]
    AmbiguousVariable { name: String },

    /// Malformed template syntax or a value that cannot be displayed as requested.
    #[error("template '{template}': {message}")]
    Render { template: String, message: String },
}

impl ClozeError {
    /// Short name of the error kind, used when reporting failures.
    pub fn kind(&self) -> &'static str {
        match self {
            ClozeError::InputSpace(_) => "InputSpaceError",
            ClozeError::Computation(_) => "ComputationError",
            ClozeError::MissingVariable { .. } => "MissingVariableError",
            ClozeError::AmbiguousVariable { .. } => "AmbiguousVariableError",
            ClozeError::Render { .. } => "RenderError",
        }
    }
}

/// A generation run aborted at a specific combination.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("problem '{problem}' failed at combination {index} ({}): {error}", .error.kind())]
pub struct GenerationError {
    /// Id of the problem being generated.
    pub problem: String,
    /// Zero-based position of the combination in enumeration order.
    pub index: usize,
    /// The originating error.
    pub error: ClozeError,
}
