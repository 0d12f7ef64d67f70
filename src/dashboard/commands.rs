//! Command table for the dashboard.
//!
//! Maps lower-cased command strings to the [`Command`] they invoke. The
//! table is built once at startup and borrowed by the dispatcher.

use crate::models::Metric;
use indexmap::IndexMap;

/// Static command menu shown by `help` and at startup.
pub const HELP_TEXT: &str = "Enter any of the following commands:
Help - list available commands;
Quit - exit this dashboard;
Cities - list all Texas cities;
Census <cityName>/Texas - population in 2020 census by specified city or statewide;
Estimated <cityName>/Texas - estimated population in 2023 by specified city or statewide;
Growth <cityName>/Texas - percent change from 2020 to 2023, by city or statewide;
Show Growth Data - shows a histogram and data for all growth rates.";

/// A dashboard command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    Cities,
    /// A single-figure query that needs a city (or `Texas`) argument.
    Query(Metric),
    ShowGrowthData,
}

/// Lookup table from command token to [`Command`].
#[derive(Debug, Clone)]
pub struct CommandTable {
    entries: IndexMap<&'static str, Command>,
}

impl CommandTable {
    /// The dashboard's seven commands.
    pub fn standard() -> Self {
        let entries = [
            ("help", Command::Help),
            ("quit", Command::Quit),
            ("cities", Command::Cities),
            ("census", Command::Query(Metric::Census)),
            ("estimated", Command::Query(Metric::Estimated)),
            ("growth", Command::Query(Metric::Growth)),
            ("show growth data", Command::ShowGrowthData),
        ]
        .into_iter()
        .collect();

        Self { entries }
    }

    /// Look up an already lower-cased token.
    pub fn lookup(&self, token: &str) -> Option<Command> {
        self.entries.get(token).copied()
    }

    /// Registered tokens, in registration order.
    pub fn tokens(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table() {
        let table = CommandTable::standard();
        assert_eq!(table.tokens().count(), 7);

        let tokens: Vec<_> = table.tokens().collect();
        assert!(tokens.contains(&"show growth data"));
        assert!(tokens.contains(&"estimated"));

        assert_eq!(table.lookup("growth"), Some(Command::Query(Metric::Growth)));
        assert_eq!(table.lookup("show growth data"), Some(Command::ShowGrowthData));
        assert_eq!(table.lookup("frobnicate"), None);
        // Callers lower-case before lookup.
        assert_eq!(table.lookup("HELP"), None);
    }

    #[test]
    fn test_help_text_lists_every_command() {
        let lowered = HELP_TEXT.to_lowercase();
        for token in CommandTable::standard().tokens() {
            assert!(lowered.contains(token), "help text is missing `{}`", token);
        }
    }
}
