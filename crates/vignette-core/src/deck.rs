//! Deck loading: authored scenario graphs, from JSON or built in.
//!
//! A deck file is a JSON object with the entry id and the scenario list:
//!
//! ```json
//! {
//!   "entry": "start",
//!   "scenarios": [
//!     {
//!       "id": "start",
//!       "question": "Someone is knocking. What do you do?",
//!       "options": [
//!         { "text": "Answer", "outcome": "You open the door.", "next": "hall" },
//!         { "text": "Wait", "outcome": "The knocking stops." }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! `requires_free_text` and `next` may be omitted per option.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::DeckError;
use crate::graph::ScenarioGraph;
use crate::scenario::{Choice, Scenario, ScenarioId};

/// On-disk shape of a deck: the entry id plus the scenario list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckFile {
    /// Id of the scenario the session starts at.
    pub entry: ScenarioId,
    /// Every scenario in the deck.
    pub scenarios: Vec<Scenario>,
}

/// Parse a deck from JSON and validate it into a graph.
pub fn from_json(json: &str) -> Result<ScenarioGraph, DeckError> {
    let deck: DeckFile = serde_json::from_str(json)?;
    let graph = ScenarioGraph::new(deck.entry, deck.scenarios)?;
    Ok(graph)
}

/// Read a deck file from disk and validate it into a graph.
pub fn load_path(path: &Path) -> Result<ScenarioGraph, DeckError> {
    let json = fs::read_to_string(path)?;
    from_json(&json)
}

/// The built-in know-your-rights deck: a police officer knocks at your
/// door, and every path teaches something about handling it.
pub fn know_your_rights() -> ScenarioGraph {
    let scenarios = vec![
        Scenario::new(
            "police",
            "A police officer is knocking at your door. What should you do?",
        )
        .with_option(
            Choice::new(
                "Open the door",
                "The police were fake, and they have robbed you.",
            )
            .with_next("robbery"),
        )
        .with_option(
            Choice::new(
                "Deny entrance unless they have a warrant",
                "Good choice! In most jurisdictions, police need a valid warrant to enter \
                 your home without consent.\nAlways ask for identification and verify their \
                 warrant.",
            )
            .with_next("warrant"),
        )
        .with_option(
            Choice::new(
                "Call 100",
                "You called 100 and reported the situation. The real police are on their way.",
            )
            .with_next("realPolice"),
        )
        .with_option(
            Choice::new(
                "Something else",
                "Please describe your action and ensure it aligns with your rights and safety.",
            )
            .with_free_text()
            .with_next("custom"),
        ),
        Scenario::new("robbery", "The robbers are now in your house. What do you do?")
            .with_option(Choice::new(
                "Fight back",
                "That was dangerous! You got hurt.",
            ))
            .with_option(Choice::new(
                "Comply and call police later",
                "Smart choice. Your life is more valuable than possessions.",
            ))
            .with_option(Choice::new(
                "Try to escape",
                "You managed to escape and called for help!",
            ))
            .with_option(Choice::new("Something else", "What would you do?").with_free_text()),
        Scenario::new("warrant", "The police show you a warrant. What do you do next?")
            .with_option(Choice::new(
                "Verify the warrant details",
                "Good choice! Always verify the details.",
            ))
            .with_option(Choice::new(
                "Let them in immediately",
                "You should have verified first!",
            ))
            .with_option(Choice::new(
                "Ask to call a lawyer first",
                "Reasonable. You have the right to consult counsel before anything else \
                 happens.",
            )),
        Scenario::new(
            "realPolice",
            "The real police arrive and verify the situation. What now?",
        )
        .with_option(Choice::new(
            "Give a full statement",
            "You walk the officers through everything that happened.",
        ))
        .with_option(Choice::new(
            "Ask how to report the impersonators",
            "They take down the details and open a case about the fake officers.",
        ))
        .with_option(
            Choice::new(
                "Something else",
                "Please describe what you would tell the officers.",
            )
            .with_free_text(),
        ),
        Scenario::new("custom", "You chose your own course of action. How does it go?")
            .with_option(Choice::new(
                "Keep the door closed and watch",
                "They hesitate on the doorstep, then give up and leave.",
            ))
            .with_option(
                Choice::new(
                    "Call 100 to be sure",
                    "You report the visit. The real police are on their way.",
                )
                .with_next("realPolice"),
            )
            .with_option(Choice::new(
                "Reconsider and ask for a warrant",
                "They cannot produce one and eventually walk away.",
            )),
    ];

    ScenarioGraph::new("police", scenarios).expect("built-in deck must validate")
}
