//! Command dispatcher.
//!
//! Resolves one input line against the [`CommandTable`] and answers it from
//! the registry. The dispatcher has two states: it accepts commands until
//! `quit`, after which every further call is rejected.

use super::commands::{Command, CommandTable, HELP_TEXT};
use crate::analysis::{rank, DeviationReport};
use crate::models::{Figure, Metric, STATEWIDE_KEY};
use crate::registry::{canonical_name, Registry};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Dispatcher lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingCommand,
    Terminated,
}

/// Outcome of a dispatched command, handed back to the driver for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DispatchResult {
    Help { text: &'static str },
    /// The driver should end the session.
    Quit,
    Cities { names: Vec<String> },
    /// A query command arrived without a target; the driver should read
    /// one and call [`Dispatcher::resolve`].
    NeedsArgument { metric: Metric },
    Figure(Figure),
    NotFound { name: String },
    /// Statewide figures could not be computed.
    Unavailable { reason: String },
    GrowthData(DeviationReport),
    NotRecognized { input: String },
    /// Input arrived after `quit`.
    Rejected,
}

/// Dispatches commands against a loaded registry.
pub struct Dispatcher<'t> {
    table: &'t CommandTable,
    registry: Registry,
    /// Display convenience for `cities`; membership is always checked
    /// against the registry.
    names: Vec<String>,
    state: SessionState,
}

impl<'t> Dispatcher<'t> {
    /// Create a dispatcher in the `AwaitingCommand` state.
    pub fn new(table: &'t CommandTable, registry: Registry, names: Vec<String>) -> Self {
        debug!(
            "Dispatcher ready: {} cities, commands {:?}",
            registry.len(),
            table.tokens().collect::<Vec<_>>()
        );
        Self {
            table,
            registry,
            names,
            state: SessionState::AwaitingCommand,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Dispatch a single command line.
    ///
    /// Matching is case-insensitive and ignores repeated whitespace. Query
    /// commands accept their target inline (`census austin`); without one
    /// they return [`DispatchResult::NeedsArgument`].
    pub fn dispatch(&mut self, line: &str) -> DispatchResult {
        if self.state == SessionState::Terminated {
            warn!("Command received after quit: {:?}", line);
            return DispatchResult::Rejected;
        }

        let normalized = line
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();

        let (command, argument) = match self.table.lookup(&normalized) {
            Some(command) => (command, None),
            None => {
                let trimmed = line.trim();
                let Some((head, rest)) = trimmed.split_once(char::is_whitespace) else {
                    return self.not_recognized(line);
                };
                match self.table.lookup(&head.to_lowercase()) {
                    Some(command @ Command::Query(_)) => (command, Some(rest.trim())),
                    _ => return self.not_recognized(line),
                }
            }
        };

        debug!("Dispatching {:?} (argument: {:?})", command, argument);

        match command {
            Command::Help => DispatchResult::Help { text: HELP_TEXT },
            Command::Quit => {
                info!("Quit requested");
                self.state = SessionState::Terminated;
                DispatchResult::Quit
            }
            Command::Cities => {
                let mut names = self.names.clone();
                names.sort();
                DispatchResult::Cities { names }
            }
            Command::Query(metric) => match argument {
                Some(name) => self.resolve(metric, name),
                None => DispatchResult::NeedsArgument { metric },
            },
            Command::ShowGrowthData => self.growth_data(),
        }
    }

    /// Answer a query for `name`, which may be a city or `Texas`.
    ///
    /// The statewide aggregate is refreshed first.
    pub fn resolve(&mut self, metric: Metric, name: &str) -> DispatchResult {
        if self.state == SessionState::Terminated {
            warn!("Query received after quit: {} {:?}", metric, name);
            return DispatchResult::Rejected;
        }

        let statewide = self
            .registry
            .refresh_statewide()
            .map(|record| Figure::from_record(record, metric));

        let canonical = canonical_name(name);
        if canonical == STATEWIDE_KEY {
            return match statewide {
                Ok(figure) => DispatchResult::Figure(figure),
                Err(e) => {
                    warn!("Statewide {} unavailable: {}", metric, e);
                    DispatchResult::Unavailable {
                        reason: e.to_string(),
                    }
                }
            };
        }

        match self.registry.get(&canonical) {
            Some(record) => DispatchResult::Figure(Figure::from_record(record, metric)),
            None => {
                debug!("City not found: {:?}", canonical);
                DispatchResult::NotFound { name: canonical }
            }
        }
    }

    fn growth_data(&self) -> DispatchResult {
        match rank(&self.registry) {
            Ok(report) => DispatchResult::GrowthData(report),
            Err(e) => DispatchResult::Unavailable {
                reason: e.to_string(),
            },
        }
    }

    fn not_recognized(&self, line: &str) -> DispatchResult {
        debug!("Unrecognized command: {:?}", line);
        DispatchResult::NotRecognized {
            input: line.trim().to_string(),
        }
    }
}
