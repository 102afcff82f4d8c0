use crate::domain::model::{Arrival, OutputFormat, PhaseReport};
use crate::utils::error::{PhaseListError, Result};
use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};
use serde::Serialize;
use std::fmt::Write;

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    phase: &'a str,
    travel_time_sec: String,
    minutes: i64,
    seconds: String,
    arrival_time: String,
}

pub fn render(report: &PhaseReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(report)),
        OutputFormat::Csv => render_csv(report),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
    }
}

/// 主控台格式：前言 + 每個相位一行，順序與引擎回傳一致
pub fn render_text(report: &PhaseReport) -> String {
    let params = &report.parameters;
    let distance = &report.distance;
    let mut out = String::new();

    // String 寫入不會失敗
    let _ = writeln!(
        out,
        "Station coordinates (A): {},{}",
        format_decimal(params.station_latitude),
        format_decimal(params.station_longitude)
    );
    let _ = writeln!(
        out,
        "Event coordinates (B): {},{}",
        format_decimal(params.event_latitude),
        format_decimal(params.event_longitude)
    );
    let _ = writeln!(
        out,
        "Event depth = {} Km ({:4.2} r)",
        format_decimal(params.depth_km),
        report.radial_depth
    );
    let _ = writeln!(out, "Distance = {:.1} arc degrees.", distance.distance_deg);
    let _ = writeln!(out, "{:.0} Km distance.", distance.distance_km());
    let _ = writeln!(out, "{:.0} deg Azimuth to event.", distance.azimuth_deg);
    let _ = writeln!(
        out,
        "{:.0} degrees back Azimuth from event towards station.",
        distance.back_azimuth_deg
    );
    let _ = writeln!(out, "For origin time {}, ", format_origin_time(report.origin_time));
    let _ = writeln!(
        out,
        "Phase arrival times are based on the {} earth model.",
        report.model
    );
    let _ = writeln!(out, "TauP big list of phases and arrival times:");

    for arrival in &report.arrivals {
        let _ = writeln!(out, "{}", format_arrival_line(arrival));
    }

    out
}

pub fn format_arrival_line(arrival: &Arrival) -> String {
    let (minutes, seconds) = arrival.minutes_and_seconds();
    format!(
        "Phase: {:<10} arrives in {:7.2} sec. ({:2} min,{:4.1} sec) at time {}",
        arrival.phase_name,
        arrival.travel_time_sec,
        minutes,
        seconds,
        format_time_of_day(arrival.arrival_time)
    )
}

/// `HH:MM:SS.hh`, rounded to the nearest hundredth of a second.
pub fn format_time_of_day(time: DateTime<Utc>) -> String {
    let micros = time.timestamp_micros();
    let rounded = (micros + 5_000).div_euclid(10_000) * 10_000;
    let time = time
        .checked_add_signed(TimeDelta::microseconds(rounded - micros))
        .unwrap_or(time);

    format!(
        "{}.{:02}",
        time.format("%H:%M:%S"),
        time.timestamp_subsec_micros() / 10_000
    )
}

pub fn format_origin_time(time: DateTime<Utc>) -> String {
    time.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}

/// Shortest decimal form that still shows a fractional digit (`5.0`, `42.74695`).
pub fn format_decimal(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

fn render_csv(report: &PhaseReport) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    for arrival in &report.arrivals {
        let (minutes, seconds) = arrival.minutes_and_seconds();
        writer.serialize(CsvRow {
            phase: &arrival.phase_name,
            travel_time_sec: format!("{:.2}", arrival.travel_time_sec),
            minutes,
            seconds: format!("{:.2}", seconds),
            arrival_time: arrival
                .arrival_time
                .to_rfc3339_opts(SecondsFormat::Micros, true),
        })?;
    }

    // 沒有任何到達時仍輸出標題列
    if report.arrivals.is_empty() {
        writer.write_record([
            "phase",
            "travel_time_sec",
            "minutes",
            "seconds",
            "arrival_time",
        ])?;
    }

    let bytes = writer.into_inner().map_err(|e| PhaseListError::ProcessingError {
        message: format!("Failed to flush CSV output: {}", e),
    })?;
    String::from_utf8(bytes).map_err(|e| PhaseListError::ProcessingError {
        message: format!("CSV output is not UTF-8: {}", e),
    })
}
