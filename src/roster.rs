//! The set of people a report is built for.

use crate::error::Result;
use crate::Event;
use log::info;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

pub type Roster = BTreeSet<String>;

/// Parses a comma- or newline-separated list of names.
pub fn parse_people(content: &str) -> Roster {
    content
        .split([',', '\n'])
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}

pub fn load_people(path: &Path) -> Result<Roster> {
    let people = parse_people(&fs::read_to_string(path)?);
    info!("Loaded {} people: {}", people.len(), join(&people));
    Ok(people)
}

/// Guesses the roster from event summaries when no people file is available.
///
/// The part of each summary before the first `" - "` names the people it is
/// about, comma separated.
pub fn people_from_events(events: &[Event]) -> Roster {
    let people: Roster = events
        .iter()
        .flat_map(|event| {
            let names = match event.summary.split_once(" - ") {
                Some((names, _)) => names,
                None => event.summary.as_str(),
            };
            names.split(',')
        })
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect();
    info!("Loaded people from calendar: {}", join(&people));
    people
}

fn join(people: &Roster) -> String {
    people.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}
