use crate::error::Result;
use crate::group::{format_date, GroupedEvents};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

#[derive(Debug, Serialize)]
struct JsonEvent<'a> {
    event: &'a str,
    start: String,
    end: String,
}

/// Writes `{"<person>": [{"event", "start", "end"}, ...]}`, keeping people
/// who have no events as empty arrays.
pub fn write_json<W: Write>(grouped: &GroupedEvents, mut writer: W) -> Result<()> {
    let report: BTreeMap<&str, Vec<JsonEvent>> = grouped
        .iter()
        .map(|(person, events)| {
            let events = events
                .iter()
                .map(|event| JsonEvent {
                    event: &event.title,
                    start: format_date(event.start),
                    end: format_date(event.end),
                })
                .collect();
            (person.as_str(), events)
        })
        .collect();

    serde_json::to_writer_pretty(&mut writer, &report)?;
    writeln!(writer)?;
    Ok(())
}
