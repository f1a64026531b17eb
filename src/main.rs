use anyhow::{bail, Context, Result};
use calendar_report::cli::{CalendarLocation, Cli, DEFAULT_PEOPLE};
use calendar_report::{group_events_by_person, render, roster, source};
use chrono::Utc;
use clap::Parser;
use log::{info, warn, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::fs::File;
use std::io::{self, BufWriter, Write};

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    // Logs go to stderr so the table on stdout can be piped
    if let Err(e) = TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto) {
        eprintln!("Failed to initialize logger: {}", e);
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let today = Utc::now().with_timezone(&cli.timezone).date_naive();
    let window = cli.window(today);
    if window.is_inverted() {
        bail!("start date is after end date ({})", window);
    }

    let events = match cli.calendar_location() {
        CalendarLocation::File(path) => source::events_from_file(&path, cli.timezone)
            .with_context(|| format!("Failed to load calendar {}", path.display()))?,
        CalendarLocation::Url(url) => source::events_from_ical_url(&url, cli.timezone)
            .with_context(|| format!("Failed to download calendar from {}", url))?,
    };

    let people = match cli.people_file() {
        Some(path) => roster::load_people(&path)
            .with_context(|| format!("Failed to read people file {}", path.display()))?,
        None => {
            warn!(
                "People file {} not found, running for all people in the calendar.",
                DEFAULT_PEOPLE
            );
            roster::people_from_events(&events)
        }
    };

    let grouped = group_events_by_person(&events, &people, &window);

    let output_path = cli.output_path(today);
    let file = File::create(&output_path)
        .with_context(|| format!("Failed to create {}", output_path.display()))?;
    let mut writer = BufWriter::new(file);
    render::render(cli.format, &grouped, &mut writer)?;
    writer.flush()?;
    info!("Wrote {:?} report to {}", cli.format, output_path.display());

    if !cli.quiet {
        render::write_table(&grouped, io::stdout().lock())?;
    }

    Ok(())
}
