use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading calendars and rosters or writing reports.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("could not find file: {}", .0.display())]
    CalendarNotFound(PathBuf),

    #[error("document contains no VCALENDAR component")]
    NoCalendar,

    #[error("malformed calendar: {0}")]
    Malformed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not download calendar: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ReportError>;
