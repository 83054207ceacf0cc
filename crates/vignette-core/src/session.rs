//! The interaction session: a state machine over one scenario graph.

use chrono::Utc;

use crate::error::{SessionError, SessionResult};
use crate::graph::ScenarioGraph;
use crate::scenario::{Choice, Scenario, ScenarioId};
use crate::transcript::{Transcript, TranscriptEntry};

/// Which half of the interaction loop the session is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Reading the question; no dialog on screen.
    Browsing,
    /// Reviewing a selected option's outcome in the dialog.
    ReviewingOutcome,
}

/// The open outcome dialog: which option is under review and what has been
/// typed so far. Identity is the option index; the outcome text is looked
/// up on demand, so duplicate outcome strings cannot misroute advancement.
#[derive(Debug, Clone)]
struct OpenDialog {
    choice: usize,
    free_text: String,
}

/// A running session over a validated scenario graph.
///
/// The graph is injected at construction and owned read-only by the
/// session; there is no global scenario table. All other state is derived:
/// the phase from whether a dialog is open, the outcome text from the
/// selected option.
#[derive(Debug)]
pub struct Session {
    graph: ScenarioGraph,
    current: ScenarioId,
    dialog: Option<OpenDialog>,
    transcript: Transcript,
}

impl Session {
    /// Start a session at the graph's entry scenario.
    pub fn new(graph: ScenarioGraph) -> Self {
        let current = graph.entry().clone();
        Self {
            graph,
            current,
            dialog: None,
            transcript: Transcript::new(),
        }
    }

    /// The graph this session runs over.
    pub fn graph(&self) -> &ScenarioGraph {
        &self.graph
    }

    /// Id of the scenario currently on screen.
    pub fn current_id(&self) -> &ScenarioId {
        &self.current
    }

    /// The scenario currently on screen.
    pub fn current_scenario(&self) -> SessionResult<&Scenario> {
        self.graph
            .get(&self.current)
            .ok_or_else(|| SessionError::NotFound(self.current.clone()))
    }

    /// Which phase the session is in.
    pub fn phase(&self) -> Phase {
        if self.dialog.is_some() {
            Phase::ReviewingOutcome
        } else {
            Phase::Browsing
        }
    }

    /// Whether the outcome dialog is on screen.
    pub fn dialog_visible(&self) -> bool {
        self.dialog.is_some()
    }

    /// The choice under review while the dialog is open.
    pub fn selected_choice(&self) -> Option<&Choice> {
        let dialog = self.dialog.as_ref()?;
        self.graph.get(&self.current)?.options.get(dialog.choice)
    }

    /// Index of the choice under review while the dialog is open.
    pub fn selected_index(&self) -> Option<usize> {
        self.dialog.as_ref().map(|d| d.choice)
    }

    /// The outcome text under review while the dialog is open.
    pub fn outcome_text(&self) -> Option<&str> {
        self.selected_choice().map(|c| c.outcome.as_str())
    }

    /// The free-text buffer. Empty outside the solicitation window.
    pub fn free_text(&self) -> &str {
        self.dialog.as_ref().map_or("", |d| d.free_text.as_str())
    }

    /// The committed decisions so far.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Select the option at `index` in the current scenario, opening the
    /// outcome dialog over it with a fresh free-text buffer.
    ///
    /// Re-selecting the option already under review is an `Ok` no-op.
    /// Selecting a different option while the dialog is open is rejected;
    /// so is an out-of-range index. Neither rejection changes any state.
    pub fn select_option(&mut self, index: usize) -> SessionResult<()> {
        if let Some(dialog) = &self.dialog {
            if dialog.choice == index {
                return Ok(());
            }
            return Err(SessionError::DialogOpen);
        }
        let scenario = self.current_scenario()?;
        if index >= scenario.options.len() {
            return Err(SessionError::InvalidChoice {
                scenario: scenario.id.clone(),
                index,
                available: scenario.options.len(),
            });
        }
        self.dialog = Some(OpenDialog {
            choice: index,
            free_text: String::new(),
        });
        Ok(())
    }

    /// Overwrite the free-text buffer with `value`.
    ///
    /// Live only while the dialog is open over a choice that solicits a
    /// response; at any other time the call leaves all state untouched.
    pub fn update_free_text(&mut self, value: impl Into<String>) {
        let editable = self
            .selected_choice()
            .is_some_and(|c| c.requires_free_text);
        if !editable {
            return;
        }
        if let Some(dialog) = &mut self.dialog {
            dialog.free_text = value.into();
        }
    }

    /// Dismiss the outcome dialog, committing the decision.
    ///
    /// Records a transcript entry, then advances to the selected choice's
    /// successor when it has one; a terminal choice leaves the current
    /// scenario in place so it can be explored again. Closing the dialog
    /// clears the outcome text and the free-text buffer. Dismissing while
    /// no dialog is open does nothing.
    ///
    /// All checks run before any state changes, so an error (unreachable
    /// for graphs built through validation) leaves the session as it was.
    pub fn dismiss_dialog(&mut self) -> SessionResult<()> {
        let Some(dialog) = &self.dialog else {
            return Ok(());
        };
        let index = dialog.choice;
        let scenario = self
            .graph
            .get(&self.current)
            .ok_or_else(|| SessionError::NotFound(self.current.clone()))?;
        let choice =
            scenario
                .options
                .get(index)
                .ok_or_else(|| SessionError::InvalidChoice {
                    scenario: scenario.id.clone(),
                    index,
                    available: scenario.options.len(),
                })?;
        if let Some(next) = &choice.next {
            if !self.graph.contains(next) {
                return Err(SessionError::NotFound(next.clone()));
            }
        }

        let entry = TranscriptEntry {
            scenario: scenario.id.clone(),
            question: scenario.question.clone(),
            option_index: index,
            choice: choice.text.clone(),
            outcome: choice.outcome.clone(),
            response: choice
                .requires_free_text
                .then(|| dialog.free_text.clone()),
            timestamp: Utc::now(),
        };
        let next = choice.next.clone();

        self.transcript.record(entry);
        self.dialog = None;
        if let Some(next) = next {
            self.current = next;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doorstep_graph() -> ScenarioGraph {
        ScenarioGraph::new(
            "doorstep",
            vec![
                Scenario::new("doorstep", "Someone is knocking. What do you do?")
                    .with_option(
                        Choice::new("Open the door", "They step inside.").with_next("search"),
                    )
                    .with_option(Choice::new("Keep it shut", "They knock again."))
                    .with_option(
                        Choice::new("Something else", "Describe what you would do instead.")
                            .with_free_text(),
                    ),
                Scenario::new("search", "They ask to look around. What now?")
                    .with_option(Choice::new("Refuse", "They insist, then leave."))
                    .with_option(Choice::new("Allow it", "The search begins.")),
            ],
        )
        .unwrap()
    }

    #[test]
    fn fresh_session_starts_browsing_at_entry() {
        let session = Session::new(doorstep_graph());
        assert_eq!(session.current_id().as_str(), "doorstep");
        assert_eq!(session.phase(), Phase::Browsing);
        assert!(!session.dialog_visible());
        assert_eq!(session.outcome_text(), None);
        assert_eq!(session.free_text(), "");
        assert!(session.transcript().is_empty());
    }

    #[test]
    fn select_opens_dialog_without_advancing() {
        let mut session = Session::new(doorstep_graph());
        session.select_option(0).unwrap();
        assert_eq!(session.phase(), Phase::ReviewingOutcome);
        assert!(session.dialog_visible());
        assert_eq!(session.selected_index(), Some(0));
        assert_eq!(session.outcome_text(), Some("They step inside."));
        assert_eq!(session.current_id().as_str(), "doorstep");
    }

    #[test]
    fn select_out_of_range_is_rejected_without_side_effects() {
        let mut session = Session::new(doorstep_graph());
        let err = session.select_option(7).unwrap_err();
        assert_eq!(
            err,
            SessionError::InvalidChoice {
                scenario: "doorstep".into(),
                index: 7,
                available: 3,
            }
        );
        assert_eq!(session.phase(), Phase::Browsing);
        assert!(!session.dialog_visible());
    }

    #[test]
    fn reselecting_the_open_option_is_idempotent() {
        let mut session = Session::new(doorstep_graph());
        session.select_option(1).unwrap();
        session.select_option(1).unwrap();
        assert_eq!(session.selected_index(), Some(1));
        assert_eq!(session.outcome_text(), Some("They knock again."));
        assert!(session.transcript().is_empty());
    }

    #[test]
    fn selecting_another_option_while_reviewing_is_rejected() {
        let mut session = Session::new(doorstep_graph());
        session.select_option(1).unwrap();
        let err = session.select_option(0).unwrap_err();
        assert_eq!(err, SessionError::DialogOpen);
        assert_eq!(session.selected_index(), Some(1));
        assert_eq!(session.outcome_text(), Some("They knock again."));
    }

    #[test]
    fn stray_dismiss_changes_nothing() {
        let mut session = Session::new(doorstep_graph());
        session.dismiss_dialog().unwrap();
        assert_eq!(session.phase(), Phase::Browsing);
        assert_eq!(session.current_id().as_str(), "doorstep");
        assert!(session.transcript().is_empty());
    }

    #[test]
    fn dismiss_advances_and_clears_dialog_state() {
        let mut session = Session::new(doorstep_graph());
        session.select_option(0).unwrap();
        session.dismiss_dialog().unwrap();
        assert_eq!(session.current_id().as_str(), "search");
        assert_eq!(session.phase(), Phase::Browsing);
        assert_eq!(session.outcome_text(), None);
        assert_eq!(session.free_text(), "");
    }

    #[test]
    fn dismissing_a_terminal_choice_stays_put() {
        let mut session = Session::new(doorstep_graph());
        session.select_option(1).unwrap();
        session.dismiss_dialog().unwrap();
        assert_eq!(session.current_id().as_str(), "doorstep");
        // the scenario stays explorable
        session.select_option(1).unwrap();
        assert_eq!(session.outcome_text(), Some("They knock again."));
    }

    #[test]
    fn free_text_is_ignored_while_browsing() {
        let mut session = Session::new(doorstep_graph());
        session.update_free_text("hello?");
        assert_eq!(session.free_text(), "");
    }

    #[test]
    fn free_text_is_ignored_for_plain_choices() {
        let mut session = Session::new(doorstep_graph());
        session.select_option(0).unwrap();
        session.update_free_text("should not stick");
        assert_eq!(session.free_text(), "");
    }

    #[test]
    fn free_text_buffer_holds_the_last_value() {
        let mut session = Session::new(doorstep_graph());
        session.select_option(2).unwrap();
        session.update_free_text("first draft");
        session.update_free_text("I ask them to wait outside");
        assert_eq!(session.free_text(), "I ask them to wait outside");
    }

    #[test]
    fn dismiss_records_the_free_text_response() {
        let mut session = Session::new(doorstep_graph());
        session.select_option(2).unwrap();
        session.update_free_text("I ask them to wait outside");
        session.dismiss_dialog().unwrap();
        let entries = session.transcript().entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(
            entries[0].response.as_deref(),
            Some("I ask them to wait outside")
        );
        assert_eq!(session.free_text(), "");
    }

    #[test]
    fn free_text_starts_fresh_on_every_dialog() {
        let mut session = Session::new(doorstep_graph());
        session.select_option(2).unwrap();
        session.update_free_text("left over");
        session.dismiss_dialog().unwrap();
        session.select_option(2).unwrap();
        assert_eq!(session.free_text(), "");
    }

    #[test]
    fn transcript_captures_decisions_in_order() {
        let mut session = Session::new(doorstep_graph());
        session.select_option(0).unwrap();
        session.dismiss_dialog().unwrap();
        session.select_option(1).unwrap();
        session.dismiss_dialog().unwrap();
        let entries = session.transcript().entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].scenario.as_str(), "doorstep");
        assert_eq!(entries[0].option_index, 0);
        assert_eq!(entries[0].choice, "Open the door");
        assert_eq!(entries[0].response, None);
        assert_eq!(entries[1].scenario.as_str(), "search");
        assert_eq!(entries[1].choice, "Allow it");
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Action {
            Select(usize),
            Type(String),
            Dismiss,
        }

        fn arb_action() -> impl Strategy<Value = Action> {
            prop_oneof![
                (0usize..5).prop_map(Action::Select),
                "[a-z ]{0,12}".prop_map(Action::Type),
                Just(Action::Dismiss),
            ]
        }

        /// Graphs whose successor targets always resolve, so construction
        /// cannot fail and dismissal never hits the defensive errors.
        fn arb_graph() -> impl Strategy<Value = ScenarioGraph> {
            (1usize..6).prop_flat_map(|n| {
                prop::collection::vec(
                    prop::collection::vec((prop::option::of(0..n), any::<bool>()), 1..4),
                    n,
                )
                .prop_map(move |shape| {
                    let scenarios = shape
                        .into_iter()
                        .enumerate()
                        .map(|(i, options)| {
                            let mut scenario =
                                Scenario::new(format!("s{i}"), format!("Question {i}?"));
                            for (j, (next, free)) in options.into_iter().enumerate() {
                                let mut choice =
                                    Choice::new(format!("Option {j}"), format!("Outcome {i}.{j}"));
                                if let Some(target) = next {
                                    choice = choice.with_next(format!("s{target}"));
                                }
                                if free {
                                    choice = choice.with_free_text();
                                }
                                scenario = scenario.with_option(choice);
                            }
                            scenario
                        })
                        .collect();
                    ScenarioGraph::new("s0", scenarios).unwrap()
                })
            })
        }

        fn observe(session: &Session) -> (ScenarioId, Option<usize>, String, usize) {
            (
                session.current_id().clone(),
                session.selected_index(),
                session.free_text().to_string(),
                session.transcript().len(),
            )
        }

        proptest! {
            #[test]
            fn random_walks_keep_the_machine_consistent(
                graph in arb_graph(),
                actions in prop::collection::vec(arb_action(), 0..40),
            ) {
                let mut session = Session::new(graph);
                for action in actions {
                    let before = observe(&session);
                    match action {
                        Action::Select(index) => {
                            let was_open = session.dialog_visible();
                            match session.select_option(index) {
                                Ok(()) => {
                                    prop_assert!(session.dialog_visible());
                                    prop_assert_eq!(session.selected_index(), Some(index));
                                    // selecting never moves the story
                                    prop_assert_eq!(session.current_id(), &before.0);
                                    if was_open {
                                        // only an idempotent re-select succeeds
                                        prop_assert_eq!(observe(&session), before);
                                    }
                                }
                                Err(_) => prop_assert_eq!(observe(&session), before),
                            }
                        }
                        Action::Type(text) => {
                            session.update_free_text(text.clone());
                            let editable = session
                                .selected_choice()
                                .is_some_and(|c| c.requires_free_text);
                            if editable {
                                prop_assert_eq!(session.free_text(), text.as_str());
                            } else {
                                prop_assert_eq!(observe(&session), before);
                            }
                        }
                        Action::Dismiss => {
                            let was_open = session.dialog_visible();
                            let result = session.dismiss_dialog();
                            prop_assert!(result.is_ok());
                            prop_assert!(!session.dialog_visible());
                            prop_assert_eq!(session.free_text(), "");
                            let expected = if was_open { before.3 + 1 } else { before.3 };
                            prop_assert_eq!(session.transcript().len(), expected);
                            prop_assert!(session.current_scenario().is_ok());
                        }
                    }
                }
            }
        }
    }
}
