use super::{single_line, HEADER};
use crate::error::Result;
use crate::group::{format_date, rows, GroupedEvents};
use std::io::Write;

fn escape_cell(text: &str) -> String {
    single_line(text).replace('|', "\\|")
}

pub fn write_markdown<W: Write>(grouped: &GroupedEvents, mut writer: W) -> Result<()> {
    writeln!(writer, "| {} |", HEADER.join(" | "))?;
    writeln!(writer, "| --- | --- | --- | --- |")?;
    for (person, event) in rows(grouped) {
        writeln!(
            writer,
            "| {} | {} | {} | {} |",
            escape_cell(person),
            escape_cell(&event.title),
            format_date(event.start),
            format_date(event.end)
        )?;
    }
    Ok(())
}
