use super::{single_line, HEADER};
use crate::error::Result;
use crate::group::{format_date, rows, GroupedEvents};
use std::io::Write;
use unicode_width::UnicodeWidthStr;

fn border(widths: &[usize]) -> String {
    let mut line = String::from("+");
    for width in widths {
        line.push_str(&"-".repeat(width + 2));
        line.push('+');
    }
    line
}

fn row(cells: &[String], widths: &[usize]) -> String {
    let mut line = String::from("|");
    for (cell, width) in cells.iter().zip(widths) {
        line.push(' ');
        line.push_str(cell);
        line.push_str(&" ".repeat(width - cell.width()));
        line.push_str(" |");
    }
    line
}

/// Writes a boxed plain-text table sized to its widest cells.
pub fn write_table<W: Write>(grouped: &GroupedEvents, mut writer: W) -> Result<()> {
    let header: Vec<String> = HEADER.iter().map(|h| h.to_string()).collect();
    let body: Vec<Vec<String>> = rows(grouped)
        .map(|(person, event)| {
            vec![
                single_line(person),
                single_line(&event.title),
                format_date(event.start),
                format_date(event.end),
            ]
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|cell| cell.width()).collect();
    for cells in &body {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.width());
        }
    }

    let separator = border(&widths);
    writeln!(writer, "{}", separator)?;
    writeln!(writer, "{}", row(&header, &widths))?;
    writeln!(writer, "{}", separator)?;
    for cells in &body {
        writeln!(writer, "{}", row(cells, &widths))?;
    }
    writeln!(writer, "{}", separator)?;
    Ok(())
}
