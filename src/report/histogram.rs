//! Growth-rate histogram plotting.
//!
//! Plotting sits outside the dashboard core: the driver hands a finished
//! [`DeviationReport`] to a [`GrowthPlotter`] after `show growth data`.

use crate::analysis::DeviationReport;

/// Renders a deviation report as a plot.
pub trait GrowthPlotter {
    fn plot(&self, report: &DeviationReport) -> String;
}

/// Horizontal-bar histogram drawn with plain characters.
#[derive(Debug, Clone)]
pub struct TextHistogram {
    /// Number of equal-width bins.
    pub bins: usize,
    /// Width in characters of the longest bar.
    pub width: usize,
}

impl Default for TextHistogram {
    fn default() -> Self {
        Self {
            bins: 20,
            width: 40,
        }
    }
}

impl TextHistogram {
    pub fn new(bins: usize, width: usize) -> Self {
        Self {
            bins: bins.max(1),
            width: width.max(1),
        }
    }
}

impl GrowthPlotter for TextHistogram {
    fn plot(&self, report: &DeviationReport) -> String {
        let bins = report.histogram(self.bins);
        if bins.is_empty() {
            return String::new();
        }

        let peak = bins.iter().map(|b| b.count).max().unwrap_or(0).max(1);

        let mut output = String::from("Histogram of City Growth Rates\n");
        output.push_str("Growth Rate (%)            Frequency\n");

        for bin in &bins {
            let bar_len = (bin.count * self.width).div_ceil(peak);
            let marker = if bin.contains(report.mean) {
                "  <- mean"
            } else {
                ""
            };
            output.push_str(&format!(
                "[{:>9.2}, {:>9.2}{} {:<width$} {}{}\n",
                bin.lower,
                bin.upper,
                if bin.closed { ']' } else { ')' },
                "#".repeat(bar_len),
                bin.count,
                marker,
                width = self.width
            ));
        }

        output
    }
}
