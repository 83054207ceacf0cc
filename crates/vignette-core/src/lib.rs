//! Core types for Vignette: the scenario graph and the interaction session.
//!
//! A vignette is a single screen of interactive fiction: one question, a
//! fixed set of options, and a modal outcome for the option picked. This
//! crate owns the authored data model, its referential-integrity validation,
//! and the select/dismiss state machine. Rendering is a separate concern:
//! build a [`ScenarioGraph`] (or load one with [`deck`]), hand it to a
//! [`Session`], and drive it from any front end.

/// Deck loading from JSON plus the built-in deck.
pub mod deck;
/// Error types used throughout the crate.
pub mod error;
/// The validated, immutable scenario graph.
pub mod graph;
/// Scenario nodes, choices, and identifiers.
pub mod scenario;
/// The interaction state machine driving one playthrough.
pub mod session;
/// Chronological record of committed decisions.
pub mod transcript;

/// Re-export error types.
pub use error::{DeckError, GraphError, IntegrityViolation, SessionError, SessionResult};
/// Re-export the graph.
pub use graph::ScenarioGraph;
/// Re-export scenario data types.
pub use scenario::{Choice, Scenario, ScenarioId};
/// Re-export session types.
pub use session::{Phase, Session};
/// Re-export transcript types.
pub use transcript::{Transcript, TranscriptEntry};
