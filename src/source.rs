//! Loading events out of iCalendar documents, from disk or over HTTP.

use crate::error::{ReportError, Result};
use crate::Event;
use chrono::prelude::*;
use chrono::{Duration, LocalResult, Offset};
use chrono_tz::Tz;
use ical::parser::ical::component::IcalEvent;
use ical::property::Property;
use log::{debug, info, warn};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

const DATETIME_FORMAT: &str = "%Y%m%dT%H%M%S";
const DATE_FORMAT: &str = "%Y%m%d";

/// Reads the first VCALENDAR of `reader`, converting every timestamp to `tz`.
///
/// Events come back sorted by start time. The sort is stable, so events that
/// start together keep their document order.
pub fn events_from_reader<R: BufRead>(reader: R, tz: Tz) -> Result<Vec<Event>> {
    let mut parser = ical::IcalParser::new(reader);
    let cal = match parser.next() {
        Some(Ok(cal)) => cal,
        Some(Err(e)) => return Err(ReportError::Malformed(e.to_string())),
        None => return Err(ReportError::NoCalendar),
    };
    let mut events = parse_events(cal.events, tz);
    events.sort_by(|a, b| a.start.cmp(&b.start));
    Ok(events)
}

pub fn events_from_file(path: &Path, tz: Tz) -> Result<Vec<Event>> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ReportError::CalendarNotFound(path.to_path_buf()),
        _ => ReportError::Io(e),
    })?;
    let events = events_from_reader(BufReader::new(file), tz)?;
    info!("Loaded calendar with {} events", events.len());
    Ok(events)
}

pub fn events_from_ical_url(ical_url: &str, tz: Tz) -> Result<Vec<Event>> {
    info!("Downloading calendar from {}", ical_url);
    let response = reqwest::blocking::get(ical_url)?.error_for_status()?;
    let events = events_from_reader(BufReader::new(response), tz)?;
    info!("Loaded calendar with {} events", events.len());
    Ok(events)
}

fn parse_events(events: Vec<IcalEvent>, tz: Tz) -> Vec<Event> {
    events
        .iter()
        .filter_map(|event| {
            let parsed = parse_event(event, tz);
            if parsed.is_none() {
                let summary = find_property(event, "SUMMARY").and_then(|p| p.value.as_deref());
                warn!("Skipping event with missing or invalid dates: {:?}", summary);
            }
            parsed
        })
        .collect()
}

fn parse_event(event: &IcalEvent, tz: Tz) -> Option<Event> {
    let summary = find_property(event, "SUMMARY")?.value.as_deref()?;
    let start = parse_datetime(find_property(event, "DTSTART")?, tz)?;
    // DTEND is optional; an event without one ends where it starts
    let end = match find_property(event, "DTEND") {
        Some(property) => parse_datetime(property, tz)?,
        None => start,
    };
    debug!("Parsed event {:?} ({} - {})", summary, start, end);
    Some(Event::new(unescape_text(summary), start, end))
}

fn find_property<'a>(event: &'a IcalEvent, name: &str) -> Option<&'a Property> {
    event.properties.iter().find(|p| p.name == name)
}

fn find_param<'a>(property: &'a Property, name: &str) -> Option<&'a str> {
    property
        .params
        .as_ref()?
        .iter()
        .find(|(param_name, _)| param_name == name)?
        .1
        .first()
        .map(|value| value.trim_matches('"'))
}

fn parse_datetime(property: &Property, tz: Tz) -> Option<DateTime<Tz>> {
    let value = property.value.as_deref()?.trim();

    //Try getting an UTC time first
    if let Some(utc_value) = value.strip_suffix('Z') {
        let naive = NaiveDateTime::parse_from_str(utc_value, DATETIME_FORMAT).ok()?;
        return Some(Utc.from_utc_datetime(&naive).with_timezone(&tz));
    }

    //Then a local time, in its TZID or floating in the report zone
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, DATETIME_FORMAT) {
        let zone = match find_param(property, "TZID") {
            Some(tzid) => tzid.parse::<Tz>().ok()?,
            None => tz,
        };
        return resolve_local(zone, &naive).map(|dt| dt.with_timezone(&tz));
    }

    //All-day events start at midnight
    let date = NaiveDate::parse_from_str(value, DATE_FORMAT).ok()?;
    resolve_local(tz, &date.and_hms_opt(0, 0, 0)?)
}

/// Pins a wall-clock time to `zone`. Repeated times take the first
/// occurrence; times skipped by a DST jump use the offset in force before it.
fn resolve_local(zone: Tz, naive: &NaiveDateTime) -> Option<DateTime<Tz>> {
    match zone.from_local_datetime(naive) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => {
            let before_gap = zone.offset_from_utc_datetime(&(*naive - Duration::days(1)));
            before_gap
                .fix()
                .from_local_datetime(naive)
                .single()
                .map(|dt| dt.with_timezone(&zone))
        }
    }
}

/// Decodes the RFC 5545 TEXT escapes (`\,` `\;` `\\` `\n`).
fn unescape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn property(name: &str, params: Option<Vec<(String, Vec<String>)>>, value: &str) -> Property {
        Property {
            name: String::from(name),
            params,
            value: Some(String::from(value)),
        }
    }

    #[test]
    fn parse_events_works() {
        let events = vec![IcalEvent {
            alarms: vec![],
            properties: vec![
                property("DTSTART", None, "20200121T200000Z"),
                property("DTEND", None, "20200121T210000Z"),
                property("SUMMARY", None, "foo"),
            ],
        }];

        assert_eq!(
            parse_events(events, Tz::UTC),
            vec![Event {
                summary: String::from("foo"),
                start: Tz::UTC.with_ymd_and_hms(2020, 1, 21, 20, 0, 0).unwrap(),
                end: Tz::UTC.with_ymd_and_hms(2020, 1, 21, 21, 0, 0).unwrap(),
            }]
        );
    }

    #[test]
    fn parse_events_with_timezone() {
        let events = vec![IcalEvent {
            alarms: vec![],
            properties: vec![
                property(
                    "DTSTART",
                    Some(vec![(
                        String::from("TZID"),
                        vec![String::from("America/New_York")],
                    )]),
                    "20200110T150000",
                ),
                property("SUMMARY", None, "foo"),
            ],
        }];

        let parsed = parse_events(events, Tz::UTC);
        assert_eq!(parsed.len(), 1);
        assert_eq!(
            parsed[0].start,
            Tz::UTC.with_ymd_and_hms(2020, 1, 10, 20, 0, 0).unwrap()
        );
        // no DTEND
        assert_eq!(parsed[0].end, parsed[0].start);
    }

    #[test]
    fn converts_to_report_timezone() {
        let events = vec![IcalEvent {
            alarms: vec![],
            properties: vec![
                property("DTSTART", None, "20240101T230000Z"),
                property("SUMMARY", None, "Alice - Late call"),
            ],
        }];

        let parsed = parse_events(events, chrono_tz::Europe::Helsinki);
        assert_eq!(
            parsed[0].start_date(),
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
        );
    }

    #[test]
    fn parses_all_day_and_floating_times() {
        let events = vec![
            IcalEvent {
                alarms: vec![],
                properties: vec![
                    property(
                        "DTSTART",
                        Some(vec![(String::from("VALUE"), vec![String::from("DATE")])]),
                        "20240102",
                    ),
                    property(
                        "DTEND",
                        Some(vec![(String::from("VALUE"), vec![String::from("DATE")])]),
                        "20240103",
                    ),
                    property("SUMMARY", None, "Bob - Holiday"),
                ],
            },
            IcalEvent {
                alarms: vec![],
                properties: vec![
                    property("DTSTART", None, "20240105T090000"),
                    property("SUMMARY", None, "Bob - Standup"),
                ],
            },
        ];

        let parsed = parse_events(events, Tz::UTC);
        assert_eq!(
            parsed[0].start,
            Tz::UTC.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap()
        );
        assert_eq!(
            parsed[0].end_date(),
            NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()
        );
        assert_eq!(
            parsed[1].start,
            Tz::UTC.with_ymd_and_hms(2024, 1, 5, 9, 0, 0).unwrap()
        );
    }

    #[test]
    fn keeps_times_skipped_by_dst() {
        // Clocks in London jump from 01:00 to 02:00 on 31 March 2024
        let events = || vec![
            IcalEvent {
                alarms: vec![],
                properties: vec![
                    property("DTSTART", None, "20240331T013000"),
                    property("SUMMARY", None, "Alice - Early"),
                ],
            },
            IcalEvent {
                alarms: vec![],
                properties: vec![
                    property(
                        "DTSTART",
                        Some(vec![(String::from("TZID"), vec![String::from("Europe/London")])]),
                        "20240331T013000",
                    ),
                    property("SUMMARY", None, "Bob - Early"),
                ],
            },
        ];

        let floating = parse_events(events(), chrono_tz::Europe::London);
        assert_eq!(floating.len(), 2);
        assert_eq!(
            floating[0].start,
            Tz::UTC.with_ymd_and_hms(2024, 3, 31, 1, 30, 0).unwrap()
        );

        let zoned = parse_events(events(), Tz::UTC);
        assert_eq!(
            zoned[1].start,
            Tz::UTC.with_ymd_and_hms(2024, 3, 31, 1, 30, 0).unwrap()
        );
    }

    #[test]
    fn repeated_times_take_first_occurrence() {
        // 01:30 happens twice in London on 27 October 2024
        let events = vec![IcalEvent {
            alarms: vec![],
            properties: vec![
                property("DTSTART", None, "20241027T013000"),
                property("SUMMARY", None, "Alice - Late"),
            ],
        }];

        let parsed = parse_events(events, chrono_tz::Europe::London);
        assert_eq!(
            parsed[0].start,
            Tz::UTC.with_ymd_and_hms(2024, 10, 27, 0, 30, 0).unwrap()
        );
    }

    #[test]
    fn skips_unusable_events() {
        let events = vec![
            IcalEvent {
                alarms: vec![],
                properties: vec![property("SUMMARY", None, "no start")],
            },
            IcalEvent {
                alarms: vec![],
                properties: vec![property("DTSTART", None, "20240105T090000Z")],
            },
            IcalEvent {
                alarms: vec![],
                properties: vec![
                    property("DTSTART", None, "tomorrow"),
                    property("SUMMARY", None, "bad date"),
                ],
            },
            IcalEvent {
                alarms: vec![],
                properties: vec![
                    property(
                        "DTSTART",
                        Some(vec![(String::from("TZID"), vec![String::from("Mars/Olympus")])]),
                        "20240105T090000",
                    ),
                    property("SUMMARY", None, "unknown zone"),
                ],
            },
        ];

        assert!(parse_events(events, Tz::UTC).is_empty());
    }

    #[test]
    fn unescapes_summary_text() {
        assert_eq!(unescape_text(r"Alice\, Bob - Sync\; weekly"), "Alice, Bob - Sync; weekly");
        assert_eq!(unescape_text(r"a\\b\nc"), "a\\b\nc");
        assert_eq!(unescape_text("trailing\\"), "trailing\\");
    }

    #[test]
    fn reads_and_sorts_document() {
        let doc = "BEGIN:VCALENDAR\n\
VERSION:2.0\n\
PRODID:-//test//EN\n\
BEGIN:VEVENT\n\
UID:2\n\
DTSTART:20240110T100000Z\n\
DTEND:20240110T110000Z\n\
SUMMARY:Bob - Review\n\
END:VEVENT\n\
BEGIN:VEVENT\n\
UID:1\n\
DTSTART:20240102T100000Z\n\
DTEND:20240102T110000Z\n\
SUMMARY:Alice - Planning\n\
END:VEVENT\n\
END:VCALENDAR\n";

        let events = events_from_reader(doc.as_bytes(), Tz::UTC).unwrap();
        let summaries: Vec<&str> = events.iter().map(|e| e.summary.as_str()).collect();
        assert_eq!(summaries, vec!["Alice - Planning", "Bob - Review"]);
    }

    #[test]
    fn empty_document_has_no_calendar() {
        assert!(matches!(
            events_from_reader("".as_bytes(), Tz::UTC),
            Err(ReportError::NoCalendar)
        ));
    }

    #[test]
    fn missing_file_is_reported() {
        let err = events_from_file(Path::new("/definitely/not/here.ics"), Tz::UTC).unwrap_err();
        assert!(matches!(err, ReportError::CalendarNotFound(_)));
    }
}
