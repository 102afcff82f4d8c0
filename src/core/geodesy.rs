//! Distance, azimuth and depth conversions between a station and an event.
//!
//! Distances are solved on the WGS-84 ellipsoid with Vincenty's inverse formula
//! (Karney's algorithm when Vincenty does not converge) and then expressed in
//! arc degrees using a fixed degree length of 111.25 km.

use crate::domain::model::{DistanceResult, GeoPoint};
use crate::domain::ports::DistanceCalculator;
use geographiclib_rs::{Geodesic, InverseGeodesic};
use std::f64::consts::PI;

/// WGS-84 semi-major axis in metres.
pub const WGS84_A: f64 = 6_378_137.0;
/// WGS-84 flattening.
pub const WGS84_F: f64 = 1.0 / 298.257_223_563;

/// Metres per arc degree used for every distance conversion.
pub const METERS_PER_DEGREE: f64 = 111_250.0;

/// Mean Earth radius in km.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

const MAX_ITERATIONS: usize = 200;
const CONVERGENCE: f64 = 1e-12;

pub fn meters_to_degrees(meters: f64) -> f64 {
    meters / METERS_PER_DEGREE
}

/// 深度佔地球平均半徑的比例
pub fn radial_depth(depth_km: f64) -> f64 {
    depth_km / EARTH_RADIUS_KM
}

/// Ellipsoidal inverse solution: (distance m, azimuth A→B°, back-azimuth B→A°).
///
/// Returns `None` when the iteration does not converge, which only happens for
/// nearly antipodal points.
pub fn vincenty_inverse(from: GeoPoint, to: GeoPoint) -> Option<(f64, f64, f64)> {
    let b = (1.0 - WGS84_F) * WGS84_A;
    let l = wrap_pi((to.longitude - from.longitude).to_radians());

    let u1 = ((1.0 - WGS84_F) * from.latitude.to_radians().tan()).atan();
    let u2 = ((1.0 - WGS84_F) * to.latitude.to_radians().tan()).atan();
    let (sin_u1, cos_u1) = u1.sin_cos();
    let (sin_u2, cos_u2) = u2.sin_cos();

    let mut lambda = l;
    let mut converged = false;
    let (mut sin_sigma, mut cos_sigma, mut sigma) = (0.0, 0.0, 0.0);
    let (mut cos_sq_alpha, mut cos_2sigma_m) = (0.0, 0.0);

    for _ in 0..MAX_ITERATIONS {
        let (sin_lambda, cos_lambda) = lambda.sin_cos();
        sin_sigma = (cos_u2 * sin_lambda).hypot(cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda);
        if sin_sigma == 0.0 {
            // 同一點
            return Some((0.0, 0.0, 0.0));
        }
        cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
        sigma = sin_sigma.atan2(cos_sigma);

        let sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
        cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;
        // equatorial line
        cos_2sigma_m = if cos_sq_alpha != 0.0 {
            cos_sigma - 2.0 * sin_u1 * sin_u2 / cos_sq_alpha
        } else {
            0.0
        };

        let c = WGS84_F / 16.0 * cos_sq_alpha * (4.0 + WGS84_F * (4.0 - 3.0 * cos_sq_alpha));
        let previous = lambda;
        lambda = l
            + (1.0 - c)
                * WGS84_F
                * sin_alpha
                * (sigma
                    + c * sin_sigma
                        * (cos_2sigma_m + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)));

        // 近對蹠點時 lambda 會跑出 (-π, π]
        if lambda.abs() > PI {
            return None;
        }
        if (lambda - previous).abs() < CONVERGENCE {
            converged = true;
            break;
        }
    }

    if !converged || !lambda.is_finite() {
        return None;
    }

    let u_sq = cos_sq_alpha * (WGS84_A * WGS84_A - b * b) / (b * b);
    let big_a = 1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
    let big_b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));
    let delta_sigma = big_b
        * sin_sigma
        * (cos_2sigma_m
            + big_b / 4.0
                * (cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)
                    - big_b / 6.0
                        * cos_2sigma_m
                        * (-3.0 + 4.0 * sin_sigma * sin_sigma)
                        * (-3.0 + 4.0 * cos_2sigma_m * cos_2sigma_m)));
    let distance = b * big_a * (sigma - delta_sigma);

    let (sin_lambda, cos_lambda) = lambda.sin_cos();
    let azimuth = (cos_u2 * sin_lambda).atan2(cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda);
    let back_azimuth =
        (cos_u1 * sin_lambda).atan2(-sin_u1 * cos_u2 + cos_u1 * sin_u2 * cos_lambda) + PI;

    Some((
        distance,
        normalize_degrees(azimuth.to_degrees()),
        normalize_degrees(back_azimuth.to_degrees()),
    ))
}

/// Karney's inverse on WGS-84; converges for every pair, antipodes included.
pub fn karney_inverse(from: GeoPoint, to: GeoPoint) -> (f64, f64, f64) {
    let (distance, azimuth, arrival_azimuth, _arc): (f64, f64, f64, f64) =
        Geodesic::wgs84().inverse(from.latitude, from.longitude, to.latitude, to.longitude);

    (
        distance,
        normalize_degrees(azimuth),
        normalize_degrees(arrival_azimuth + 180.0),
    )
}

fn wrap_pi(angle: f64) -> f64 {
    (angle + PI).rem_euclid(2.0 * PI) - PI
}

fn normalize_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid 可能因浮點誤差回傳 360.0
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Wgs84Geodesic;

impl DistanceCalculator for Wgs84Geodesic {
    fn compute_distance(&self, station: GeoPoint, event: GeoPoint) -> DistanceResult {
        let (distance_m, azimuth_deg, back_azimuth_deg) = match vincenty_inverse(station, event) {
            Some(solution) => solution,
            None => {
                tracing::warn!(
                    "⚠️ Vincenty inverse did not converge for {:?} -> {:?}, using Karney's algorithm",
                    station,
                    event
                );
                karney_inverse(station, event)
            }
        };

        tracing::debug!(
            "Geodesic distance {:.1} m, azimuth {:.3}°, back azimuth {:.3}°",
            distance_m,
            azimuth_deg,
            back_azimuth_deg
        );

        DistanceResult {
            distance_m,
            distance_deg: meters_to_degrees(distance_m),
            azimuth_deg,
            back_azimuth_deg,
        }
    }
}
