use std::fmt;

/// The terminal error recorded by a `fail` navigation event.
pub type Failure = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised while building a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackError {
    /// The initial screen was absent. No controller is produced.
    NilModel,
}

impl fmt::Display for StackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StackError::NilModel => write!(f, "model cannot be nil"),
        }
    }
}

impl std::error::Error for StackError {}
