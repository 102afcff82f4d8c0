use crate::domain::model::{PhaseTime, RayPath, RayPoint, TravelTimeRequest};
use crate::domain::ports::TravelTimeEngine;
use crate::utils::error::{PhaseListError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

pub const DEFAULT_TRAVEL_TIME_ENDPOINT: &str = "https://service.iris.edu/irisws/traveltime/1/query";

/// HTTP client for a TauP-style travel-time web service that answers in TauP text format.
#[derive(Debug, Clone)]
pub struct TaupWebClient {
    client: Client,
    endpoint: String,
    path_endpoint: Option<String>,
}

impl TaupWebClient {
    pub fn new(endpoint: String, path_endpoint: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("phaselist/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint,
            path_endpoint,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn fetch_text(&self, url: &str, request: &TravelTimeRequest) -> Result<String> {
        let query = [
            ("model", request.model.clone()),
            ("evdepth", request.source_depth_km.to_string()),
            ("distdeg", request.distance_deg.to_string()),
            ("phases", request.phases.join(",")),
        ];

        tracing::debug!(
            "Requesting {} phases from {} (depth {} km, distance {:.4}°)",
            request.phases.len(),
            url,
            request.source_depth_km,
            request.distance_deg
        );
        let response = self.client.get(url).query(&query).send().await?;
        let status = response.status();
        tracing::debug!("Travel-time service response status: {}", status);

        // 沒有任何相位到達時服務可能回 204
        if status == StatusCode::NO_CONTENT {
            return Ok(String::new());
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let snippet: String = body.trim().chars().take(200).collect();
            return Err(PhaseListError::EngineError {
                message: format!("{} returned HTTP {}: {}", url, status, snippet),
            });
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl TravelTimeEngine for TaupWebClient {
    async fn arrivals(&self, request: &TravelTimeRequest) -> Result<Vec<PhaseTime>> {
        let body = self.fetch_text(&self.endpoint, request).await?;
        parse_travel_times(&body)
    }

    async fn ray_paths(&self, request: &TravelTimeRequest) -> Result<Vec<RayPath>> {
        let url = self
            .path_endpoint
            .as_deref()
            .ok_or_else(|| PhaseListError::MissingConfigError {
                field: "engine.path_endpoint".to_string(),
            })?;
        let body = self.fetch_text(url, request).await?;
        parse_ray_paths(&body)
    }

    fn supports_ray_paths(&self) -> bool {
        self.path_endpoint.is_some()
    }
}

/// Parses TauP `time` text output.
///
/// Data rows look like
/// `12.06  5.0  P  176.85  13.710  40.12  39.98  12.06  = P`;
/// any line whose first column is not a number is a header and is skipped.
pub fn parse_travel_times(body: &str) -> Result<Vec<PhaseTime>> {
    let mut phases = Vec::new();

    for (index, line) in body.lines().enumerate() {
        let columns: Vec<&str> = line.split_whitespace().collect();
        let Some(first) = columns.first() else {
            continue;
        };
        if first.parse::<f64>().is_err() {
            continue;
        }

        if columns.len() < 4 {
            return Err(PhaseListError::EngineResponseError {
                line: index + 1,
                message: format!("expected at least 4 columns, found {}", columns.len()),
            });
        }

        let travel_time_sec =
            columns[3]
                .parse::<f64>()
                .map_err(|e| PhaseListError::EngineResponseError {
                    line: index + 1,
                    message: format!("invalid travel time '{}': {}", columns[3], e),
                })?;

        let optional = |i: usize| columns.get(i).and_then(|v| v.parse::<f64>().ok());

        phases.push(PhaseTime {
            phase_name: columns[2].to_string(),
            travel_time_sec,
            ray_param_sec_per_deg: optional(4),
            takeoff_angle_deg: optional(5),
            incident_angle_deg: optional(6),
        });
    }

    Ok(phases)
}

/// Parses TauP `path` text output: a `> PHASE at TIME seconds ...` header per ray
/// followed by `distance depth` rows.
pub fn parse_ray_paths(body: &str) -> Result<Vec<RayPath>> {
    let mut paths: Vec<RayPath> = Vec::new();

    for (index, line) in body.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(header) = trimmed.strip_prefix('>') {
            let columns: Vec<&str> = header.split_whitespace().collect();
            let phase_name = columns.first().ok_or_else(|| PhaseListError::EngineResponseError {
                line: index + 1,
                message: "ray path header without phase name".to_string(),
            })?;
            let travel_time_sec = columns
                .iter()
                .position(|c| *c == "at")
                .and_then(|i| columns.get(i + 1))
                .and_then(|v| v.parse::<f64>().ok())
                .ok_or_else(|| PhaseListError::EngineResponseError {
                    line: index + 1,
                    message: format!("no travel time in ray path header '{}'", trimmed),
                })?;

            paths.push(RayPath {
                phase_name: phase_name.to_string(),
                travel_time_sec,
                points: Vec::new(),
            });
            continue;
        }

        let mut columns = trimmed.split_whitespace().map(|v| v.parse::<f64>());
        let (Some(Ok(distance_deg)), Some(Ok(depth_km))) = (columns.next(), columns.next()) else {
            continue;
        };

        let current = paths.last_mut().ok_or_else(|| PhaseListError::EngineResponseError {
            line: index + 1,
            message: "ray path point before any path header".to_string(),
        })?;
        current.points.push(RayPoint {
            distance_deg,
            depth_km,
        });
    }

    Ok(paths)
}
