use crate::scenario::ScenarioId;

/// Alias for `Result<T, SessionError>`.
pub type SessionResult<T> = Result<T, SessionError>;

/// A single referential-integrity violation found while building a graph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntegrityViolation {
    /// An option's successor id does not name any scenario in the graph.
    #[error("option {option_index} of scenario \"{scenario}\" advances to unknown scenario \"{target}\"")]
    DanglingNext {
        /// The scenario holding the offending option.
        scenario: ScenarioId,
        /// Index of the offending option within that scenario.
        option_index: usize,
        /// The successor id that resolved to nothing.
        target: ScenarioId,
    },

    /// The designated entry id does not name any scenario in the graph.
    #[error("entry scenario \"{entry}\" is not defined")]
    UnknownEntry {
        /// The unresolved entry id.
        entry: ScenarioId,
    },

    /// A scenario declares an empty option list.
    #[error("scenario \"{scenario}\" has no options")]
    NoOptions {
        /// The scenario without options.
        scenario: ScenarioId,
    },

    /// The same id was declared by more than one scenario.
    #[error("scenario \"{id}\" is defined more than once")]
    DuplicateId {
        /// The id declared twice.
        id: ScenarioId,
    },
}

/// Raised when graph construction fails validation.
///
/// Carries every violation found, not just the first; callers can list
/// them all via [`violations`](GraphError::violations).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("scenario graph failed validation with {} integrity violation(s)", .violations.len())]
pub struct GraphError {
    violations: Vec<IntegrityViolation>,
}

impl GraphError {
    pub(crate) fn new(violations: Vec<IntegrityViolation>) -> Self {
        Self { violations }
    }

    /// Every violation found during validation, in declaration order.
    pub fn violations(&self) -> &[IntegrityViolation] {
        &self.violations
    }
}

/// Errors raised by a running session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// A scenario id failed to resolve at runtime. Unreachable through the
    /// public API of a validated graph; kept as a defensive signal.
    #[error("scenario not found: \"{0}\"")]
    NotFound(ScenarioId),

    /// An option index outside the current scenario's option list.
    #[error("invalid option {index} for scenario \"{scenario}\": {available} option(s) available")]
    InvalidChoice {
        /// The scenario whose options were indexed.
        scenario: ScenarioId,
        /// The out-of-range index.
        index: usize,
        /// How many options the scenario actually has.
        available: usize,
    },

    /// A different option was selected while an outcome dialog is open.
    #[error("an outcome dialog is already open")]
    DialogOpen,
}

/// Errors raised while loading a scenario deck.
#[derive(Debug, thiserror::Error)]
pub enum DeckError {
    /// The deck file could not be read.
    #[error("failed to read deck: {0}")]
    Io(#[from] std::io::Error),

    /// The deck file is not valid JSON or does not match the deck shape.
    #[error("malformed deck: {0}")]
    Json(#[from] serde_json::Error),

    /// The deck parsed but its graph failed validation.
    #[error(transparent)]
    Integrity(#[from] GraphError),
}
