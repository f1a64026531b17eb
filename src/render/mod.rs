//! Report writers. Every format emits one row per attributed event with the
//! columns person, event, start, end; people without events emit no rows.

use crate::error::Result;
use crate::group::GroupedEvents;
use clap::ValueEnum;
use std::io::Write;

pub mod csv_output;
pub mod html_output;
pub mod json_output;
pub mod markdown_output;
pub mod table_output;

pub use csv_output::write_csv;
pub use html_output::write_html;
pub use json_output::write_json;
pub use markdown_output::write_markdown;
pub use table_output::write_table;

pub const HEADER: [&str; 4] = ["Name", "Event", "Start", "End"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Comma separated values
    Csv,
    /// Markdown pipe table
    Markdown,
    /// JSON object keyed by person
    Json,
    /// Standalone HTML page
    Html,
    /// Plain text table
    Table,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Markdown => "md",
            OutputFormat::Json => "json",
            OutputFormat::Html => "html",
            OutputFormat::Table => "txt",
        }
    }
}

pub fn render(format: OutputFormat, grouped: &GroupedEvents, writer: &mut dyn Write) -> Result<()> {
    match format {
        OutputFormat::Csv => write_csv(grouped, writer),
        OutputFormat::Markdown => write_markdown(grouped, writer),
        OutputFormat::Json => write_json(grouped, writer),
        OutputFormat::Html => write_html(grouped, writer),
        OutputFormat::Table => write_table(grouped, writer),
    }
}

/// Collapses line breaks so a cell stays on one line.
fn single_line(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\n', '\r'], " ")
}
