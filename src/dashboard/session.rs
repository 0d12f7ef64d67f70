//! Interactive session driver.
//!
//! Reads command lines from an async reader, feeds them to the
//! [`Dispatcher`] and writes rendered results. The dispatcher never ends
//! the process; the session returns when `quit` is dispatched or input
//! runs out.

use super::commands::HELP_TEXT;
use super::dispatcher::{DispatchResult, Dispatcher};
use crate::cli::OutputFormat;
use crate::report::{self, GrowthPlotter, ARGUMENT_PROMPT};
use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

const WELCOME: &str = "Welcome to the Texas Cities Population Dashboard.
This provides census data from the 2020 census and
estimated population data in Texas as of 2023.";

const COMMAND_PROMPT: &str = "Enter a command: ";

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Quit,
    EndOfInput,
}

/// Rendering choices for a session.
pub struct SessionOptions<'p> {
    pub format: OutputFormat,
    /// Decimals for growth percentages in text output.
    pub precision: usize,
    /// Invoked after `show growth data` when set.
    pub plotter: Option<&'p dyn GrowthPlotter>,
}

impl Default for SessionOptions<'_> {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            precision: 2,
            plotter: None,
        }
    }
}

impl SessionOptions<'_> {
    fn interactive(&self) -> bool {
        self.format == OutputFormat::Text
    }

    fn render(&self, result: &DispatchResult) -> Result<String> {
        match self.format {
            OutputFormat::Text => Ok(report::generate_text_output(result, self.precision)),
            OutputFormat::Json => report::generate_json_output(result),
        }
    }
}

/// Run the read-dispatch-print loop until `quit` or end of input.
pub async fn run_session<R, W>(
    dispatcher: &mut Dispatcher<'_>,
    reader: R,
    writer: &mut W,
    options: &SessionOptions<'_>,
) -> Result<SessionEnd>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();

    if options.interactive() {
        write_block(writer, &format!("{}\n\n{}", WELCOME, HELP_TEXT)).await?;
    }

    loop {
        prompt(writer, options, COMMAND_PROMPT).await?;
        let Some(line) = lines.next_line().await.context("Failed to read command")? else {
            info!("Input closed; ending session");
            return Ok(SessionEnd::EndOfInput);
        };

        let mut result = dispatcher.dispatch(&line);

        if let DispatchResult::NeedsArgument { metric } = result {
            prompt(writer, options, ARGUMENT_PROMPT).await?;
            let Some(name) = lines.next_line().await.context("Failed to read city name")? else {
                info!("Input closed while awaiting a {} target", metric);
                return Ok(SessionEnd::EndOfInput);
            };
            result = dispatcher.resolve(metric, &name);
        }

        debug!("Result: {:?}", result);
        write_block(writer, &options.render(&result)?).await?;

        if let (DispatchResult::GrowthData(report), Some(plotter)) = (&result, options.plotter) {
            let plot = plotter.plot(report);
            if !plot.is_empty() {
                write_block(writer, &plot).await?;
            }
        }

        if result == DispatchResult::Quit {
            writer.flush().await?;
            return Ok(SessionEnd::Quit);
        }
    }
}

async fn prompt<W>(writer: &mut W, options: &SessionOptions<'_>, text: &str) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    if options.interactive() {
        writer.write_all(format!("\n{}", text).as_bytes()).await?;
        writer.flush().await?;
    }
    Ok(())
}

async fn write_block<W>(writer: &mut W, text: &str) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    writer
        .write_all(text.as_bytes())
        .await
        .context("Failed to write output")?;
    if !text.ends_with('\n') {
        writer.write_all(b"\n").await?;
    }
    writer.flush().await?;
    Ok(())
}
