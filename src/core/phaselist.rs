use crate::core::geodesy::radial_depth;
use crate::domain::model::{Arrival, Event, EventParameters, PhaseReport, TravelTimeRequest};
use crate::domain::phases::{ARRIVAL_PHASES, RAY_PATH_PHASES};
use crate::domain::ports::{DistanceCalculator, TravelTimeEngine};
use crate::utils::error::Result;

/// Geodesy → travel-time engine → arrivals, once per event.
pub struct PhaseListEngine<E: TravelTimeEngine, G: DistanceCalculator> {
    engine: E,
    geodesy: G,
    model: String,
    include_ray_paths: bool,
}

impl<E: TravelTimeEngine, G: DistanceCalculator> PhaseListEngine<E, G> {
    pub fn new(engine: E, geodesy: G, model: impl Into<String>) -> Self {
        Self {
            engine,
            geodesy,
            model: model.into(),
            include_ray_paths: false,
        }
    }

    pub fn with_ray_paths(mut self, include_ray_paths: bool) -> Self {
        self.include_ray_paths = include_ray_paths;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn run(&self, params: &EventParameters) -> Result<PhaseReport> {
        let event = Event::from_parameters(params)?;
        tracing::info!(
            "🌍 Event at {} ({}, {}), depth {} km",
            event.origin_time,
            event.latitude,
            event.longitude,
            event.depth_km
        );

        let distance = self.geodesy.compute_distance(params.station(), params.event());
        tracing::info!(
            "📏 Distance {:.3}° ({:.1} km), azimuth {:.1}°, back azimuth {:.1}°",
            distance.distance_deg,
            distance.distance_km(),
            distance.azimuth_deg,
            distance.back_azimuth_deg
        );

        let request = TravelTimeRequest::new(
            &self.model,
            event.depth_km,
            distance.distance_deg,
            ARRIVAL_PHASES,
        );
        let phases = self.engine.arrivals(&request).await?;
        if phases.is_empty() {
            tracing::warn!("⚠️ The travel-time engine returned no arrivals for this geometry");
        } else {
            tracing::info!("⏱️ Received {} phase arrivals from {}", phases.len(), self.model);
        }

        let arrivals = phases
            .into_iter()
            .map(|phase| Arrival::from_phase_time(event.origin_time, phase))
            .collect::<Result<Vec<_>>>()?;

        let ray_path_count = self.fetch_ray_path_count(&event, distance.distance_deg).await?;

        Ok(PhaseReport {
            parameters: params.clone(),
            origin_time: event.origin_time,
            distance,
            radial_depth: radial_depth(event.depth_km),
            model: self.model.clone(),
            arrivals,
            ray_path_count,
        })
    }

    // 射線路徑目前只計數，不輸出
    async fn fetch_ray_path_count(&self, event: &Event, distance_deg: f64) -> Result<usize> {
        if !self.include_ray_paths {
            return Ok(0);
        }
        if !self.engine.supports_ray_paths() {
            tracing::warn!("⚠️ Ray paths requested but no ray-path endpoint is configured");
            return Ok(0);
        }

        let request =
            TravelTimeRequest::new(&self.model, event.depth_km, distance_deg, RAY_PATH_PHASES);
        let paths = self.engine.ray_paths(&request).await?;
        for path in &paths {
            tracing::debug!(
                "Ray path {} ({:.2} s) with {} points",
                path.phase_name,
                path.travel_time_sec,
                path.points.len()
            );
        }
        tracing::info!("🛰️ Received {} ray paths", paths.len());
        Ok(paths.len())
    }
}
