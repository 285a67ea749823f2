// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

use chrono::{
    DateTime, Datelike, FixedOffset, Local, NaiveDate, NaiveTime, Offset, TimeZone, Utc,
};
use clap::Parser;
use log::{debug, LevelFilter};
use serde::Serialize;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use solcalc::format::{day_string, time_string, ClockPrecision, DayStyle};
use solcalc::{
    get_azimuth_elevation, get_solar_times_with, CivilInstant, HorizontalPosition, JulianDay,
    PolarFallback, SolarConfig, SolarTimes,
};

#[derive(Parser)]
#[command(name = "solcalc", version, about = "Solar noon, sunrise and sunset for a location")]
struct Cli {
    /// Latitude in degrees, north positive
    #[arg(short = 'l', long, allow_hyphen_values = true)]
    latitude: f64,
    /// Longitude in degrees, east positive
    #[arg(short = 'g', long, allow_hyphen_values = true)]
    longitude: f64,
    /// Civil date (YYYY-MM-DD), default today
    #[arg(short = 'd', long)]
    date: Option<NaiveDate>,
    /// UTC offset in hours, default the system's current offset
    #[arg(short = 'z', long, allow_hyphen_values = true)]
    utc_offset: Option<f64>,
    /// Also print the sun's azimuth and elevation at this local time (HH:MM[:SS])
    #[arg(long, value_parser = parse_clock)]
    at: Option<NaiveTime>,
    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
    /// Maximum number of days the polar fallback search may step
    #[arg(long, default_value_t = SolarConfig::DEFAULT_MAX_SEARCH_DAYS)]
    max_search_days: u32,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Serialize)]
struct Report {
    #[serde(flatten)]
    times: SolarTimes<DateTime<FixedOffset>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    position: Option<HorizontalPosition>,
}

fn parse_clock(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .map_err(|e| format!("expected HH:MM or HH:MM:SS: {e}"))
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if let Err(e) = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("Unable to initiate logger: {e}");
    }
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// `Sunday, May 21st 2017, 1:22:59 pm`
fn long_form(instant: &DateTime<FixedOffset>) -> String {
    let day = instant.day();
    format!(
        "{}, {} {day}{} {}",
        instant.format("%A"),
        instant.format("%B"),
        ordinal_suffix(day),
        instant.format("%Y, %-I:%M:%S %P"),
    )
}

fn event_line(instant: &DateTime<FixedOffset>, fallback: Option<PolarFallback>) -> String {
    match fallback {
        None => long_form(instant),
        Some(fallback) => {
            let jd = JulianDay::from_naive_date(instant.civil_date());
            day_string(jd, DayStyle::WithDirection(fallback.direction))
                .unwrap_or_else(|| long_form(instant))
        }
    }
}

fn resolve_offset(hours: Option<f64>) -> Option<FixedOffset> {
    match hours {
        Some(hours) if hours.is_finite() => {
            FixedOffset::east_opt((hours * 3600.0).round() as i32)
        }
        Some(_) => None,
        None => Some(Local::now().offset().fix()),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let Some(offset) = resolve_offset(cli.utc_offset) else {
        eprintln!("Invalid UTC offset: {:?} (must be within ±24 h)", cli.utc_offset);
        std::process::exit(1);
    };
    let date = cli
        .date
        .unwrap_or_else(|| Utc::now().with_timezone(&offset).date_naive());
    let time = cli.at.unwrap_or(NaiveTime::MIN);
    let Some(instant) = offset.from_local_datetime(&date.and_time(time)).single() else {
        eprintln!("Invalid local time: {date} {time}");
        std::process::exit(1);
    };
    debug!("computing for {instant}");

    let config = SolarConfig::default().with_max_search_days(cli.max_search_days);
    let times = match get_solar_times_with(&config, cli.latitude, cli.longitude, &instant) {
        Ok(times) => times,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let position = match cli.at {
        Some(_) => match get_azimuth_elevation(&instant, cli.latitude, cli.longitude) {
            Ok(pos) => Some(pos.rounded(-2)),
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        },
        None => None,
    };

    if cli.json {
        let report = Report { times, position };
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Failed to serialize output: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    println!("solarNoon: {}", long_form(&times.solar_noon));
    println!("sunrise:   {}", event_line(&times.sunrise, times.sunrise_fallback));
    println!("sunset:    {}", event_line(&times.sunset, times.sunset_fallback));
    if let Some(pos) = position {
        let clock = time_string(instant.minutes_since_midnight(), ClockPrecision::Seconds)
            .unwrap_or_default();
        println!(
            "at {clock}: azimuth {}°, elevation {}°{}",
            pos.azimuth,
            pos.elevation,
            if pos.is_dark { " (dark)" } else { "" }
        );
    }
}
