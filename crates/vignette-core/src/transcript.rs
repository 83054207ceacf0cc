//! Chronological record of a session's committed decisions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scenario::ScenarioId;

/// One committed decision, recorded when an outcome dialog is dismissed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    /// The scenario the decision was made in.
    pub scenario: ScenarioId,
    /// The question that was on screen.
    pub question: String,
    /// Index of the chosen option within the scenario.
    pub option_index: usize,
    /// Label of the chosen option.
    pub choice: String,
    /// The outcome text that was reviewed.
    pub outcome: String,
    /// The typed response, present only for choices that solicit one.
    pub response: Option<String>,
    /// When the dialog was dismissed.
    pub timestamp: DateTime<Utc>,
}

/// A chronological log of committed decisions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry to the transcript.
    pub fn record(&mut self, entry: TranscriptEntry) {
        self.entries.push(entry);
    }

    /// Get all entries.
    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the transcript is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Export the transcript as markdown.
    pub fn export_markdown(&self) -> String {
        let mut out = String::from("# Vignette Transcript\n\n");
        for (n, entry) in self.entries.iter().enumerate() {
            out.push_str(&format!("## {}. {}\n\n", n + 1, entry.question));
            out.push_str(&format!("**Chose**: {}\n", entry.choice));
            out.push_str(&format!("**Outcome**: {}\n", entry.outcome));
            if let Some(response) = &entry.response {
                out.push_str(&format!("**Response**: {response}\n"));
            }
            out.push('\n');
        }
        out
    }

    /// Export the transcript as plain text.
    pub fn export_text(&self) -> String {
        let mut out = String::from("Vignette Transcript\n===================\n\n");
        for (n, entry) in self.entries.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", n + 1, entry.question));
            out.push_str(&format!("   Chose: {}\n", entry.choice));
            out.push_str(&format!("   Outcome: {}\n", entry.outcome));
            if let Some(response) = &entry.response {
                out.push_str(&format!("   Response: {response}\n"));
            }
            out.push('\n');
        }
        out
    }
}
