use crate::utils::error::{PhaseListError, Result};
use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Station {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// 參數解析的結果；origin time 在這個階段仍是原始字串
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventParameters {
    pub origin_time: String,
    pub station_latitude: f64,
    pub station_longitude: f64,
    pub event_latitude: f64,
    pub event_longitude: f64,
    pub depth_km: f64,
}

impl EventParameters {
    pub fn station(&self) -> GeoPoint {
        GeoPoint::new(self.station_latitude, self.station_longitude)
    }

    pub fn event(&self) -> GeoPoint {
        GeoPoint::new(self.event_latitude, self.event_longitude)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub origin_time: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    pub depth_km: f64,
}

impl Event {
    pub fn from_parameters(params: &EventParameters) -> Result<Self> {
        Ok(Self {
            origin_time: parse_origin_time(&params.origin_time)?,
            latitude: params.event_latitude,
            longitude: params.event_longitude,
            depth_km: params.depth_km,
        })
    }
}

/// Parses `yyyy-mm-ddTHH:MM:SS`, with optional fractional seconds and a trailing `Z`.
pub fn parse_origin_time(value: &str) -> Result<DateTime<Utc>> {
    let trimmed = value.trim();
    let trimmed = trimmed.strip_suffix(['Z', 'z']).unwrap_or(trimmed);

    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|source| PhaseListError::InvalidOriginTime {
            value: value.to_string(),
            source,
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DistanceResult {
    pub distance_m: f64,
    pub distance_deg: f64,
    pub azimuth_deg: f64,
    pub back_azimuth_deg: f64,
}

impl DistanceResult {
    /// 與度數換算使用同一個每度長度 (111.25 km)
    pub fn distance_km(&self) -> f64 {
        self.distance_deg * 111.25
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TravelTimeRequest {
    pub model: String,
    pub source_depth_km: f64,
    pub distance_deg: f64,
    pub phases: Vec<String>,
}

impl TravelTimeRequest {
    pub fn new(model: &str, source_depth_km: f64, distance_deg: f64, phases: &[&str]) -> Self {
        Self {
            model: model.to_string(),
            source_depth_km,
            distance_deg,
            phases: phases.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// One row returned by the travel-time engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseTime {
    pub phase_name: String,
    pub travel_time_sec: f64,
    pub ray_param_sec_per_deg: Option<f64>,
    pub takeoff_angle_deg: Option<f64>,
    pub incident_angle_deg: Option<f64>,
}

impl PhaseTime {
    pub fn new(phase_name: impl Into<String>, travel_time_sec: f64) -> Self {
        Self {
            phase_name: phase_name.into(),
            travel_time_sec,
            ray_param_sec_per_deg: None,
            takeoff_angle_deg: None,
            incident_angle_deg: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Arrival {
    pub phase_name: String,
    pub travel_time_sec: f64,
    pub arrival_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ray_param_sec_per_deg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub takeoff_angle_deg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incident_angle_deg: Option<f64>,
}

impl Arrival {
    pub fn from_phase_time(origin_time: DateTime<Utc>, phase: PhaseTime) -> Result<Self> {
        let micros = (phase.travel_time_sec * 1_000_000.0).round();
        let arrival_time = micros
            .is_finite()
            .then(|| TimeDelta::microseconds(micros as i64))
            .and_then(|delta| origin_time.checked_add_signed(delta))
            .ok_or_else(|| PhaseListError::ProcessingError {
                message: format!(
                    "travel time {} s for phase {} is out of range",
                    phase.travel_time_sec, phase.phase_name
                ),
            })?;

        Ok(Self {
            phase_name: phase.phase_name,
            travel_time_sec: phase.travel_time_sec,
            arrival_time,
            ray_param_sec_per_deg: phase.ray_param_sec_per_deg,
            takeoff_angle_deg: phase.takeoff_angle_deg,
            incident_angle_deg: phase.incident_angle_deg,
        })
    }

    /// 整數分鐘與剩餘秒數
    pub fn minutes_and_seconds(&self) -> (i64, f64) {
        let minutes = (self.travel_time_sec / 60.0).trunc();
        (minutes as i64, self.travel_time_sec - minutes * 60.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RayPoint {
    pub distance_deg: f64,
    pub depth_km: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RayPath {
    pub phase_name: String,
    pub travel_time_sec: f64,
    pub points: Vec<RayPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseReport {
    pub parameters: EventParameters,
    pub origin_time: DateTime<Utc>,
    pub distance: DistanceResult,
    pub radial_depth: f64,
    pub model: String,
    pub arrivals: Vec<Arrival>,
    pub ray_path_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Csv,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Text => "text",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        };
        f.write_str(name)
    }
}

impl FromStr for OutputFormat {
    type Err = PhaseListError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(PhaseListError::InvalidConfigValueError {
                field: "output.format".to_string(),
                value: other.to_string(),
                reason: "Expected one of: text, csv, json".to_string(),
            }),
        }
    }
}
