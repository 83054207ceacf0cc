//! The validated, immutable scenario graph.

use std::collections::{HashMap, HashSet};

use crate::error::{GraphError, IntegrityViolation};
use crate::scenario::{Scenario, ScenarioId};

/// The immutable scenario graph: a designated entry scenario plus a map of
/// scenarios keyed by id.
///
/// [`ScenarioGraph::new`] is the only way to obtain a graph, so every graph
/// in existence has passed referential-integrity validation. There is no
/// mutation API and no deserialize impl that could bypass the check.
#[derive(Debug, Clone)]
pub struct ScenarioGraph {
    entry: ScenarioId,
    scenarios: HashMap<ScenarioId, Scenario>,
}

impl ScenarioGraph {
    /// Build a graph from an entry id and a list of scenarios, validating
    /// referential integrity.
    ///
    /// Validation collects every violation before failing: all dangling
    /// successor references (with scenario id, option index, and target),
    /// duplicate scenario ids, scenarios without options, and an entry id
    /// that names no scenario. Violations are reported in a deterministic
    /// order: duplicates in declaration order, then the entry check, then
    /// per-scenario checks in declaration order.
    pub fn new(
        entry: impl Into<ScenarioId>,
        scenarios: Vec<Scenario>,
    ) -> Result<Self, GraphError> {
        let entry = entry.into();
        let mut violations = Vec::new();

        let mut ids: HashSet<&ScenarioId> = HashSet::with_capacity(scenarios.len());
        for scenario in &scenarios {
            if !ids.insert(&scenario.id) {
                violations.push(IntegrityViolation::DuplicateId {
                    id: scenario.id.clone(),
                });
            }
        }

        if !ids.contains(&entry) {
            violations.push(IntegrityViolation::UnknownEntry {
                entry: entry.clone(),
            });
        }

        for scenario in &scenarios {
            if scenario.options.is_empty() {
                violations.push(IntegrityViolation::NoOptions {
                    scenario: scenario.id.clone(),
                });
            }
            for (option_index, option) in scenario.options.iter().enumerate() {
                if let Some(target) = &option.next {
                    if !ids.contains(target) {
                        violations.push(IntegrityViolation::DanglingNext {
                            scenario: scenario.id.clone(),
                            option_index,
                            target: target.clone(),
                        });
                    }
                }
            }
        }

        if !violations.is_empty() {
            return Err(GraphError::new(violations));
        }

        let mut map = HashMap::with_capacity(scenarios.len());
        for scenario in scenarios {
            map.insert(scenario.id.clone(), scenario);
        }

        Ok(Self {
            entry,
            scenarios: map,
        })
    }

    /// The designated entry scenario id.
    pub fn entry(&self) -> &ScenarioId {
        &self.entry
    }

    /// Look up a scenario by id. `None` is the not-found signal; callers
    /// that require presence convert it to an error.
    pub fn get(&self, id: &ScenarioId) -> Option<&Scenario> {
        self.scenarios.get(id)
    }

    /// Whether the graph contains a scenario with the given id.
    pub fn contains(&self, id: &ScenarioId) -> bool {
        self.scenarios.contains_key(id)
    }

    /// Number of scenarios in the graph.
    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    /// Whether the graph holds no scenarios. Always false for a constructed
    /// graph (the entry check rejects an empty list), kept for completeness.
    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// Iterate over all scenarios in unspecified order.
    pub fn scenarios(&self) -> impl Iterator<Item = &Scenario> {
        self.scenarios.values()
    }
}
