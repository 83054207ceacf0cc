//! Scenario data model: identifiers, choices, and scenario nodes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier for a scenario within a graph.
///
/// Ids are authored strings (`"police"`, `"warrant"`), compared and hashed
/// as-is. Serializes transparently as a plain string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScenarioId(String);

impl ScenarioId {
    /// Create an id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ScenarioId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ScenarioId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A single selectable choice within a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// The label shown to the user.
    pub text: String,
    /// The outcome text shown in the dialog once this choice is selected.
    /// May span multiple lines.
    pub outcome: String,
    /// Whether the dialog solicits a typed response for this choice.
    #[serde(default)]
    pub requires_free_text: bool,
    /// Scenario entered when the outcome dialog is dismissed. `None` marks
    /// a terminal branch: dismissal returns to the current scenario.
    #[serde(default)]
    pub next: Option<ScenarioId>,
}

impl Choice {
    /// Create a new choice with the given label and outcome text.
    pub fn new(text: impl Into<String>, outcome: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            outcome: outcome.into(),
            requires_free_text: false,
            next: None,
        }
    }

    /// Set the successor scenario.
    pub fn with_next(mut self, id: impl Into<ScenarioId>) -> Self {
        self.next = Some(id.into());
        self
    }

    /// Mark this choice as soliciting a free-text response.
    pub fn with_free_text(mut self) -> Self {
        self.requires_free_text = true;
        self
    }

    /// Whether this choice ends the branch (has no successor).
    pub fn is_terminal(&self) -> bool {
        self.next.is_none()
    }
}

/// One node of the narrative graph: a question and its ordered choices.
///
/// The position of a choice in `options` is its stable identity; the
/// interaction layer refers to choices by index, never by text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Identifier of this scenario.
    pub id: ScenarioId,
    /// The question or prompt shown to the user.
    pub question: String,
    /// The choices offered, in display order.
    pub options: Vec<Choice>,
}

impl Scenario {
    /// Create a new scenario with the given id and question.
    pub fn new(id: impl Into<ScenarioId>, question: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            question: question.into(),
            options: Vec::new(),
        }
    }

    /// Add a choice.
    pub fn with_option(mut self, option: Choice) -> Self {
        self.options.push(option);
        self
    }

    /// Whether every choice in this scenario is terminal.
    pub fn is_terminal(&self) -> bool {
        self.options.iter().all(Choice::is_terminal)
    }
}
