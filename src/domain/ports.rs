use crate::domain::model::{DistanceResult, GeoPoint, PhaseTime, RayPath, TravelTimeRequest};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 外部的地球模型走時引擎
#[async_trait]
pub trait TravelTimeEngine: Send + Sync {
    /// Returns one row per requested phase that has a valid ray for the geometry,
    /// in the order the engine reports them.
    async fn arrivals(&self, request: &TravelTimeRequest) -> Result<Vec<PhaseTime>>;

    async fn ray_paths(&self, request: &TravelTimeRequest) -> Result<Vec<RayPath>>;

    /// Whether `ray_paths` can be served at all.
    fn supports_ray_paths(&self) -> bool {
        true
    }
}

pub trait DistanceCalculator: Send + Sync {
    /// Distance and bearings from `station` (A) to `event` (B).
    fn compute_distance(&self, station: GeoPoint, event: GeoPoint) -> DistanceResult;
}
