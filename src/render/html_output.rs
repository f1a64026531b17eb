//! HTML report: a standalone page with one styled table.

use super::HEADER;
use crate::error::Result;
use crate::group::{format_date, rows, GroupedEvents};
use std::io::Write;

const STYLES: &str = r#"
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            margin: 20px;
        }
        table {
            border-collapse: collapse;
        }
        th, td {
            border: 1px solid #ddd;
            padding: 6px 10px;
            text-align: left;
        }
        th {
            background-color: #4a90d9;
            color: white;
        }
        tr:nth-child(even) {
            background-color: #f9f9f9;
        }
"#;

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

pub fn write_html<W: Write>(grouped: &GroupedEvents, mut writer: W) -> Result<()> {
    writeln!(writer, "<!DOCTYPE html>")?;
    writeln!(writer, "<html>")?;
    writeln!(writer, "<head>")?;
    writeln!(writer, "<meta charset=\"utf-8\">")?;
    writeln!(writer, "<title>Calendar Events</title>")?;
    writeln!(writer, "<style>{}</style>", STYLES)?;
    writeln!(writer, "</head>")?;
    writeln!(writer, "<body>")?;
    writeln!(writer, "<h1>Calendar Events</h1>")?;
    writeln!(writer, "<table>")?;

    let header: String = HEADER.iter().map(|h| format!("<th>{}</th>", h)).collect();
    writeln!(writer, "<thead><tr>{}</tr></thead>", header)?;

    writeln!(writer, "<tbody>")?;
    for (person, event) in rows(grouped) {
        writeln!(
            writer,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape_html(person),
            escape_html(&event.title),
            format_date(event.start),
            format_date(event.end)
        )?;
    }
    writeln!(writer, "</tbody>")?;
    writeln!(writer, "</table>")?;
    writeln!(writer, "</body>")?;
    writeln!(writer, "</html>")?;
    Ok(())
}
