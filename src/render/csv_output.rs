use super::HEADER;
use crate::error::Result;
use crate::group::{format_date, rows, GroupedEvents};
use csv::WriterBuilder;
use std::io::Write;

pub fn write_csv<W: Write>(grouped: &GroupedEvents, writer: W) -> Result<()> {
    let mut csv_writer = WriterBuilder::new().from_writer(writer);
    csv_writer.write_record(HEADER)?;
    for (person, event) in rows(grouped) {
        let start = format_date(event.start);
        let end = format_date(event.end);
        csv_writer.write_record([person, event.title.as_str(), start.as_str(), end.as_str()])?;
    }
    csv_writer.flush()?;
    Ok(())
}
