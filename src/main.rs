// Calendar Pages
// Command-line entry point: prints a month, week or day page with its events

use std::cell::RefCell;
use std::fmt::{self, Write as _};
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use calendar_pages::models::event::CalendarEvent;
use calendar_pages::models::ui::ViewType;
use calendar_pages::services::event::EventCollection;
use calendar_pages::services::settings::SettingsService;
use calendar_pages::services::view::{CalendarView, DayCell};
use calendar_pages::utils::date::weekday_labels;

#[derive(Parser, Debug)]
#[command(name = "calendar-pages", version, about = "Print calendar pages")]
struct Cli {
    /// Settings file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// JSON file containing a list of events
    #[arg(long, global = true)]
    events: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Month grid containing DATE (default: configured initial date or today)
    Month { date: Option<NaiveDate> },
    /// Week containing DATE
    Week { date: Option<NaiveDate> },
    /// Events on DATE
    Day { date: Option<NaiveDate> },
}

impl Command {
    fn target(&self) -> (ViewType, Option<NaiveDate>) {
        match self {
            Command::Month { date } => (ViewType::Month, *date),
            Command::Week { date } => (ViewType::Week, *date),
            Command::Day { date } => (ViewType::Day, *date),
        }
    }
}

fn main() {
    env_logger::init();

    if let Err(err) = run(Cli::parse()) {
        log::error!("{:#}", err);
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let service = match &cli.config {
        Some(path) => SettingsService::new(path.clone()),
        None => SettingsService::with_default_path()?,
    };
    let mut settings = service.get()?;

    let (view, date) = cli.command.target();
    if date.is_some() {
        settings.initial_date = date;
    }

    let events = Rc::new(RefCell::new(EventCollection::new()));
    if let Some(path) = &cli.events {
        let loaded = load_events(path)?;
        log::info!("Loaded {} events from {}", loaded.len(), path.display());
        EventCollection::modify(&events, |collection| collection.add_all(loaded))
            .with_context(|| format!("Invalid event in {}", path.display()))?;
    }

    let calendar = CalendarView::builder()
        .collection(events)
        .settings(settings)
        .view(view)
        .build()
        .context("Failed to set up calendar view")?;

    print!("{}", render(&calendar)?);
    Ok(())
}

fn load_events(path: &Path) -> Result<Vec<CalendarEvent>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read events from {}", path.display()))?;
    serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse events in {}", path.display()))
}

fn render(calendar: &CalendarView) -> Result<String, fmt::Error> {
    let navigator = calendar.navigator();
    let cells = calendar.visible_days();
    match navigator.view() {
        ViewType::Month => render_month(navigator.current_date(), navigator.week_start(), &cells),
        ViewType::Week | ViewType::Day => render_days(&cells),
    }
}

fn render_month(
    anchor: NaiveDate,
    week_start: chrono::Weekday,
    cells: &[DayCell],
) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "{}", anchor.format("%B %Y"))?;
    let header: Vec<String> = weekday_labels(week_start)
        .iter()
        .map(|label| format!("{:>5}", label))
        .collect();
    writeln!(out, "{}", header.join(""))?;

    for week in cells.chunks(7) {
        let row: String = week.iter().map(format_cell).collect();
        writeln!(out, "{}", row)?;
    }
    Ok(out)
}

fn format_cell(cell: &DayCell) -> String {
    let day = cell.date.format("%e").to_string();
    let day = if cell.in_current_month {
        day
    } else {
        format!("({})", day.trim())
    };
    let marker = match (cell.is_today, cell.events.is_empty()) {
        (true, false) => "!*",
        (true, true) => "!",
        (false, false) => "*",
        (false, true) => "",
    };
    format!("{:>5}", format!("{}{}", day, marker))
}

fn render_days(cells: &[DayCell]) -> Result<String, fmt::Error> {
    let mut out = String::new();
    for cell in cells {
        writeln!(out, "{}", cell.date.format("%a %Y-%m-%d"))?;
        if cell.events.is_empty() {
            writeln!(out, "    (no events)")?;
        }
        for event in &cell.events {
            let when = if event.all_day {
                "all day".to_string()
            } else {
                format!("{}-{}", event.start.format("%H:%M"), event.end.format("%H:%M"))
            };
            writeln!(out, "    {:<11} {}", when, event.title)?;
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use calendar_pages::services::layout::CellTiles;
    use chrono::Datelike;

    fn cell(date: NaiveDate, in_current_month: bool, events: usize) -> DayCell {
        let start = date.and_hms_opt(9, 0, 0).unwrap();
        DayCell {
            date,
            in_current_month,
            is_today: false,
            events: (0..events)
                .map(|i| {
                    CalendarEvent::new(format!("Event {}", i), start, start + chrono::Duration::hours(1))
                        .unwrap()
                })
                .collect(),
            tiles: CellTiles {
                visible: events,
                overflow: 0,
            },
        }
    }

    #[test]
    fn test_cli_parses_subcommand_and_date() {
        let cli = Cli::try_parse_from(["calendar-pages", "week", "2021-05-13", "--config", "c.toml"])
            .unwrap();
        assert_eq!(
            cli.command.target(),
            (ViewType::Week, NaiveDate::from_ymd_opt(2021, 5, 13))
        );
        assert_eq!(cli.config, Some(PathBuf::from("c.toml")));
    }

    #[test]
    fn test_cli_rejects_bad_date() {
        assert!(Cli::try_parse_from(["calendar-pages", "month", "2021-13-40"]).is_err());
    }

    #[test]
    fn test_format_cell_marks_events_and_adjacent_days() {
        let date = NaiveDate::from_ymd_opt(2021, 4, 26).unwrap();
        assert_eq!(format_cell(&cell(date, false, 0)), " (26)");
        assert_eq!(format_cell(&cell(date, true, 2)), "  26*");
    }

    #[test]
    fn test_render_month_header_and_rows() {
        let first = NaiveDate::from_ymd_opt(2021, 4, 26).unwrap();
        let cells: Vec<DayCell> = first
            .iter_days()
            .take(35)
            .map(|date| cell(date, date.month() == 5, 0))
            .collect();

        let out = render_month(NaiveDate::from_ymd_opt(2021, 5, 13).unwrap(), chrono::Weekday::Mon, &cells)
            .unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "May 2021");
        assert!(lines[1].trim_start().starts_with("Mon"));
        assert_eq!(lines.len(), 2 + 5);
    }

    #[test]
    fn test_render_days_lists_events() {
        let date = NaiveDate::from_ymd_opt(2021, 5, 13).unwrap();
        let out = render_days(&[cell(date, true, 1)]).unwrap();
        assert!(out.starts_with("Thu 2021-05-13"));
        assert!(out.contains("09:00-10:00 Event 0"));
    }
}
