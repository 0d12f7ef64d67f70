//! Output generation for dispatch results.
//!
//! This module turns a [`DispatchResult`] into the text the driver prints,
//! either as the dashboard's plain-text messages or as JSON.

use crate::analysis::DeviationReport;
use crate::dashboard::DispatchResult;
use crate::models::{Figure, FigureValue, Metric, Scope};
use crate::registry::LoadOutcome;
use anyhow::Result;

/// Prompt shown when a query command needs its target.
pub const ARGUMENT_PROMPT: &str = "Enter city name or Texas (e.g. <cityName>/Texas): ";

/// Message printed when the session ends through `quit`.
pub const GOODBYE: &str =
    "Thank you for using the Texas Cities Population Database Dashboard.  Goodbye!";

/// Generate the plain-text output for a dispatch result.
///
/// `precision` is the number of decimals used for growth percentages.
pub fn generate_text_output(result: &DispatchResult, precision: usize) -> String {
    match result {
        DispatchResult::Help { text } => text.to_string(),
        DispatchResult::Quit => GOODBYE.to_string(),
        DispatchResult::Cities { names } => {
            if names.is_empty() {
                "No cities loaded.".to_string()
            } else {
                names.join("\n")
            }
        }
        DispatchResult::NeedsArgument { .. } => ARGUMENT_PROMPT.to_string(),
        DispatchResult::Figure(figure) => generate_figure_line(figure, precision),
        DispatchResult::NotFound { name } => format!("{} not found in the database.", name),
        DispatchResult::Unavailable { reason } => format!("Unavailable: {}", reason),
        DispatchResult::GrowthData(report) => generate_growth_table(report, precision),
        DispatchResult::NotRecognized { .. } => {
            "Command not found. Type \"Help\" for command options.".to_string()
        }
        DispatchResult::Rejected => {
            "The session has ended; no further commands are accepted.".to_string()
        }
    }
}

/// Generate the JSON output for a dispatch result.
pub fn generate_json_output(result: &DispatchResult) -> Result<String> {
    Ok(serde_json::to_string(result)?)
}

/// One-sentence answer to a single-figure query.
fn generate_figure_line(figure: &Figure, precision: usize) -> String {
    let statewide = figure.scope == Scope::Statewide;

    match (figure.metric, figure.value) {
        (Metric::Census, FigureValue::Population(count)) if statewide => {
            format!("Total population in Texas in the 2020 Census: {}", count)
        }
        (Metric::Census, FigureValue::Population(count)) => {
            format!("{}'s total population in the 2020 Census: {}", figure.name, count)
        }
        (Metric::Estimated, FigureValue::Population(count)) if statewide => {
            format!("Total population in Texas in the 2023 Census: {}", count)
        }
        (Metric::Estimated, FigureValue::Population(count)) => {
            format!("{}'s estimated population in 2023: {}", figure.name, count)
        }
        (Metric::Growth, FigureValue::Percent(pct)) if statewide => format!(
            "Texas had percent population change from 2020 to 2023: {:.*} %",
            precision, pct
        ),
        (Metric::Growth, FigureValue::Percent(pct)) => format!(
            "{}'s percent population change from 2020 to 2023: {:.*} %",
            figure.name, precision, pct
        ),
        (metric, value) => format!("{} {}: {:?}", figure.name, metric, value),
    }
}

/// Deviation summary line followed by the ranked table.
fn generate_growth_table(report: &DeviationReport, precision: usize) -> String {
    let mut output = String::new();

    output.push_str("Cities ranked by deviation from average growth rate:\n\n");
    output.push_str(&format!(
        "Growth rate mean {:.3}\t\tGrowth rate standard dev {:.3}\t\tTotal cities count {}\n\n",
        report.mean, report.standard_deviation, report.city_count
    ));

    let name_width = report
        .rows
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("City".len());

    output.push_str(&format!(
        "{:<name_width$}  {:>12}  {:>14}  {:>11}  {:>19}\n",
        "City", "Census 2020", "Estimated 2023", "Growth Rate", "Deviation From Mean"
    ));

    for row in &report.rows {
        output.push_str(&format!(
            "{:<name_width$}  {:>12}  {:>14}  {:>11.*}  {:>19.*}\n",
            row.name,
            row.census2020,
            row.estimated2023,
            precision,
            row.growth_rate,
            precision,
            row.deviation
        ));
    }

    output
}

/// Startup notice describing problems found while loading the dataset.
///
/// Returns `None` when the load was clean.
pub fn generate_load_notice(outcome: &LoadOutcome) -> Option<String> {
    if outcome.source_unavailable() {
        return Some(
            "Error: File not found. Please check the file path. Continuing with an empty dataset."
                .to_string(),
        );
    }

    let skipped = outcome.skipped_rows();
    if skipped == 0 && outcome.issues.is_empty() {
        return None;
    }

    let mut notice = format!(
        "Loaded {} cities; {} row(s) skipped:",
        outcome.names.len(),
        skipped
    );
    for issue in &outcome.issues {
        notice.push_str(&format!("\n  - {}", issue));
    }
    Some(notice)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::DeviationRow;
    use crate::models::CityRecord;
    use crate::registry::{parse_dataset, LoaderOptions};
    use std::io::Cursor;

    fn statewide(metric: Metric) -> Figure {
        Figure::from_record(&CityRecord::new("Texas", 130, 150, 15.384_615), metric)
    }

    #[test]
    fn test_figure_lines() {
        let austin = CityRecord::new("Austin", 961_855, 979_882, 1.874);

        let census = generate_figure_line(&Figure::from_record(&austin, Metric::Census), 2);
        assert_eq!(census, "Austin's total population in the 2020 Census: 961855");

        let growth = generate_figure_line(&Figure::from_record(&austin, Metric::Growth), 2);
        assert_eq!(growth, "Austin's percent population change from 2020 to 2023: 1.87 %");

        let texas = generate_figure_line(&statewide(Metric::Growth), 2);
        assert_eq!(texas, "Texas had percent population change from 2020 to 2023: 15.38 %");

        let texas_census = generate_figure_line(&statewide(Metric::Census), 2);
        assert!(texas_census.contains("130"));
        assert!(texas_census.starts_with("Total population in Texas"));

        let texas_estimated = generate_figure_line(&statewide(Metric::Estimated), 2);
        assert_eq!(texas_estimated, "Total population in Texas in the 2023 Census: 150");
    }

    #[test]
    fn test_text_messages() {
        let not_found = DispatchResult::NotFound {
            name: "Atlantis".to_string(),
        };
        assert_eq!(
            generate_text_output(&not_found, 2),
            "Atlantis not found in the database."
        );

        let unknown = DispatchResult::NotRecognized {
            input: "frobnicate".to_string(),
        };
        assert!(generate_text_output(&unknown, 2).starts_with("Command not found."));

        let cities = DispatchResult::Cities {
            names: vec!["Acity".to_string(), "Bcity".to_string()],
        };
        assert_eq!(generate_text_output(&cities, 2), "Acity\nBcity");

        assert_eq!(generate_text_output(&DispatchResult::Quit, 2), GOODBYE);
    }

    #[test]
    fn test_growth_table() {
        let report = DeviationReport {
            rows: vec![
                DeviationRow {
                    name: "Acity".to_string(),
                    census2020: 90,
                    estimated2023: 100,
                    growth_rate: 10.0,
                    deviation: -5.0,
                },
                DeviationRow {
                    name: "Bcity".to_string(),
                    census2020: 40,
                    estimated2023: 50,
                    growth_rate: 20.0,
                    deviation: 5.0,
                },
            ],
            mean: 15.0,
            standard_deviation: 5.0,
            city_count: 2,
        };

        let table = generate_growth_table(&report, 2);
        assert!(table.contains("Growth rate mean 15.000"));
        assert!(table.contains("Growth rate standard dev 5.000"));
        assert!(table.contains("Total cities count 2"));
        assert!(table.contains("Deviation From Mean"));

        let acity = table.find("Acity").unwrap();
        let bcity = table.find("Bcity").unwrap();
        assert!(acity < bcity);
        assert!(table.contains("-5.00"));
    }

    #[test]
    fn test_json_output() {
        let json = generate_json_output(&DispatchResult::Figure(statewide(Metric::Census))).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["kind"], "figure");
        assert_eq!(value["metric"], "census");
        assert_eq!(value["scope"], "statewide");
        assert_eq!(value["value"], 130);

        let quit = generate_json_output(&DispatchResult::Quit).unwrap();
        assert_eq!(quit, r#"{"kind":"quit"}"#);
    }

    #[test]
    fn test_load_notice() {
        let clean = parse_dataset(Cursor::new("10,9,0.1,\"Acity\"\n"), &LoaderOptions::default());
        assert!(generate_load_notice(&clean).is_none());

        let messy = parse_dataset(
            Cursor::new("10,9,0.1,\"Acity\"\nbroken\n"),
            &LoaderOptions::default(),
        );
        let notice = generate_load_notice(&messy).unwrap();
        assert!(notice.contains("1 row(s) skipped"));
        assert!(notice.contains("line 2"));
    }
}
