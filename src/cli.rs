//! CLI argument parsing for calendar-report

use crate::group::DateWindow;
use crate::render::OutputFormat;
use chrono::NaiveDate;
use chrono_tz::Tz;
use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_CALENDAR: &str = "./calendar.ics";
pub const DEFAULT_PEOPLE: &str = "./people.csv";

#[derive(Parser, Debug)]
#[command(name = "calendar-report")]
#[command(version)]
#[command(about = "Lists each person's events from an iCalendar file", long_about = None)]
pub struct Cli {
    /// Format of the report file
    #[arg(long, value_enum, default_value = "csv")]
    pub format: OutputFormat,

    /// Calendar file to read (defaults to ./calendar.ics unless --url is given)
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Download the calendar from this URL instead of reading a file
    #[arg(long, value_name = "URL", env = "ICAL_URL")]
    pub url: Option<String>,

    /// Comma separated list of people (defaults to ./people.csv, or to the
    /// people named in the calendar when that file does not exist)
    #[arg(long, value_name = "PATH")]
    pub people: Option<PathBuf>,

    /// First day to include (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", value_parser = parse_date)]
    pub start: Option<NaiveDate>,

    /// Last day to include (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", value_parser = parse_date)]
    pub end: Option<NaiveDate>,

    /// Report the next three weeks, starting today
    #[arg(long)]
    pub next_sprint: bool,

    /// Time zone used to turn event times into dates
    #[arg(long, value_name = "TZ", default_value = "UTC", value_parser = parse_timezone)]
    pub timezone: Tz,

    /// Report file (defaults to events-<today>.<extension>)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Do not print the table to the terminal
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Where the calendar comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarLocation {
    File(PathBuf),
    Url(String),
}

impl Cli {
    /// An explicit --file wins over --url; with neither, the default file is read.
    pub fn calendar_location(&self) -> CalendarLocation {
        match (&self.file, &self.url) {
            (Some(path), _) => CalendarLocation::File(path.clone()),
            (None, Some(url)) => CalendarLocation::Url(url.clone()),
            (None, None) => CalendarLocation::File(PathBuf::from(DEFAULT_CALENDAR)),
        }
    }

    /// The roster file to read. `None` means the default file is absent and the
    /// roster has to come from the calendar; an explicit --people is always read.
    pub fn people_file(&self) -> Option<PathBuf> {
        match &self.people {
            Some(path) => Some(path.clone()),
            None => {
                let path = PathBuf::from(DEFAULT_PEOPLE);
                path.exists().then_some(path)
            }
        }
    }

    pub fn window(&self, today: NaiveDate) -> DateWindow {
        if self.next_sprint {
            DateWindow::next_sprint(today)
        } else {
            DateWindow::new(self.start, self.end)
        }
    }

    pub fn output_path(&self, today: NaiveDate) -> PathBuf {
        match &self.output {
            Some(path) => path.clone(),
            None => PathBuf::from(format!(
                "events-{}.{}",
                today.format("%Y-%m-%d"),
                self.format.extension()
            )),
        }
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| format!("invalid date '{}' (expected YYYY-MM-DD): {}", value, e))
}

fn parse_timezone(value: &str) -> Result<Tz, String> {
    value
        .parse::<Tz>()
        .map_err(|e| format!("unknown time zone '{}': {}", value, e))
}
