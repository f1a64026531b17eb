use chrono::prelude::*;
use chrono_tz::Tz;

pub mod cli;
pub mod error;
pub mod group;
pub mod render;
pub mod roster;
pub mod source;

pub use error::{ReportError, Result};
pub use group::{group_events_by_person, AttributedEvent, DateWindow, GroupedEvents};
pub use render::OutputFormat;
pub use roster::Roster;

/// A calendar occurrence with its timestamps expressed in the report time zone.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub summary: String,
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

impl Event {
    pub fn new(summary: impl Into<String>, start: DateTime<Tz>, end: DateTime<Tz>) -> Self {
        Event {
            summary: summary.into(),
            start,
            end,
        }
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start.date_naive()
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end.date_naive()
    }
}
