//! Attributes events to people and filters them by date.
//!
//! An event belongs to every person whose name occurs anywhere in its
//! summary. Matching is case-sensitive substring containment, so a short
//! name such as "Al" also matches "Alice - Standup".

use crate::roster::Roster;
use crate::Event;
use chrono::{Duration, NaiveDate};
use std::collections::BTreeMap;
use std::fmt;

/// Per-person events, keyed in name order. Every roster member has an entry.
pub type GroupedEvents = BTreeMap<String, Vec<AttributedEvent>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributedEvent {
    pub title: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Inclusive date range. A missing bound is not enforced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateWindow {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateWindow {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        DateWindow { start, end }
    }

    /// The three weeks starting at `today`.
    pub fn next_sprint(today: NaiveDate) -> Self {
        DateWindow {
            start: Some(today),
            end: Some(today + Duration::weeks(3)),
        }
    }

    pub fn contains(&self, start: NaiveDate, end: NaiveDate) -> bool {
        if matches!(self.start, Some(lower) if start < lower) {
            return false;
        }
        if matches!(self.end, Some(upper) if end > upper) {
            return false;
        }
        true
    }

    pub fn is_inverted(&self) -> bool {
        matches!((self.start, self.end), (Some(start), Some(end)) if start > end)
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(start) = self.start {
            write!(f, "{}", start)?;
        }
        write!(f, "..")?;
        if let Some(end) = self.end {
            write!(f, "{}", end)?;
        }
        Ok(())
    }
}

/// Strips the first `"<person> - "` from `summary` and trims the rest.
pub fn normalize_title(summary: &str, person: &str) -> String {
    let prefix = format!("{} - ", person);
    summary.replacen(&prefix, "", 1).trim().to_string()
}

pub fn group_events_by_person(
    events: &[Event],
    people: &Roster,
    window: &DateWindow,
) -> GroupedEvents {
    let mut grouped: GroupedEvents = people
        .iter()
        .map(|person| (person.clone(), Vec::new()))
        .collect();

    for event in events {
        let (start, end) = (event.start_date(), event.end_date());
        if !window.contains(start, end) {
            continue;
        }
        for (person, attributed) in grouped.iter_mut() {
            if event.summary.contains(person.as_str()) {
                attributed.push(AttributedEvent {
                    title: normalize_title(&event.summary, person),
                    start,
                    end,
                });
            }
        }
    }

    grouped
}

/// Flattens grouped events into `(person, event)` rows, people in name order
/// and each person's events in calendar order.
pub fn rows(grouped: &GroupedEvents) -> impl Iterator<Item = (&str, &AttributedEvent)> {
    grouped
        .iter()
        .flat_map(|(person, events)| events.iter().map(move |event| (person.as_str(), event)))
}

/// Formats a date as `DD/MM/YYYY`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}
