//! Map-plane projection of radar beam samples.
//!
//! Turns (azimuth, slant range) beam coordinates into normalized Web
//! Mercator positions about a radar origin. The slant range is first
//! corrected to ground range with the 4/3-effective-earth beam model, then
//! the polar ground offset is inverted through an azimuthal-equidistant
//! projection (spherical or WGS84 ellipsoidal) and normalized to the
//! `[0,1] x [0,1]` Mercator square.
//!
//! The two strategies sit behind one [`ProjectionFunction`] trait:
//!
//! - [`AnalyticProjection`]: spherical inverse, cheap enough to evaluate
//!   per vertex inside a render stage. This implementation is the CPU
//!   reference for that stage.
//! - [`EllipsoidalProjection`]: WGS84 Vincenty inverse, evaluated once per
//!   mesh vertex on the CPU and baked into the geometry buffer.

pub mod aeqd;
pub mod beam;
pub mod mercator;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use beam::{ground_range, EARTH_RADIUS_M, KE, MIN_SLANT_RANGE_M};

/// Maps beam coordinates to normalized Web Mercator map coordinates.
pub trait ProjectionFunction {
    /// Project an (azimuth in degrees, slant range in meters) sample
    /// position to normalized map-plane (x, y).
    ///
    /// Implementations clamp degenerate slant ranges internally; the result
    /// is always finite.
    fn project(&self, azimuth_deg: f64, slant_range_m: f64) -> (f64, f64);
}

/// Which projection strategy bakes vertex positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionMode {
    /// Spherical inverse, suitable for per-vertex evaluation in the
    /// renderer; positions are carried as beam parameters.
    Analytic,
    /// WGS84 ellipsoidal inverse, baked into the buffer on the CPU.
    Ellipsoidal,
}

impl ProjectionMode {
    /// Parse a mode name as used in configuration ("analytic" or
    /// "ellipsoidal", case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "analytic" => Some(ProjectionMode::Analytic),
            "ellipsoidal" => Some(ProjectionMode::Ellipsoidal),
            _ => None,
        }
    }

    /// Build the projection function for this mode about a radar origin.
    pub fn projector(
        &self,
        radar_lat_deg: f64,
        radar_lon_deg: f64,
        elevation_deg: f64,
    ) -> Box<dyn ProjectionFunction> {
        match self {
            ProjectionMode::Analytic => Box::new(AnalyticProjection::new(
                radar_lat_deg,
                radar_lon_deg,
                elevation_deg,
            )),
            ProjectionMode::Ellipsoidal => Box::new(EllipsoidalProjection::new(
                radar_lat_deg,
                radar_lon_deg,
                elevation_deg,
            )),
        }
    }
}

impl fmt::Display for ProjectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectionMode::Analytic => write!(f, "analytic"),
            ProjectionMode::Ellipsoidal => write!(f, "ellipsoidal"),
        }
    }
}

/// Spherical azimuthal-equidistant inverse about the radar origin.
#[derive(Debug, Clone)]
pub struct AnalyticProjection {
    radar_lat_deg: f64,
    radar_lon_deg: f64,
    elevation_deg: f64,
}

impl AnalyticProjection {
    pub fn new(radar_lat_deg: f64, radar_lon_deg: f64, elevation_deg: f64) -> Self {
        Self {
            radar_lat_deg,
            radar_lon_deg,
            elevation_deg,
        }
    }
}

impl ProjectionFunction for AnalyticProjection {
    fn project(&self, azimuth_deg: f64, slant_range_m: f64) -> (f64, f64) {
        let gr = beam::ground_range(slant_range_m, self.elevation_deg);
        let (lat, lon) =
            aeqd::spherical_destination(self.radar_lat_deg, self.radar_lon_deg, azimuth_deg, gr);
        mercator::normalize(lat, lon)
    }
}

/// WGS84 ellipsoidal azimuthal-equidistant inverse about the radar origin.
#[derive(Debug, Clone)]
pub struct EllipsoidalProjection {
    radar_lat_deg: f64,
    radar_lon_deg: f64,
    elevation_deg: f64,
}

impl EllipsoidalProjection {
    pub fn new(radar_lat_deg: f64, radar_lon_deg: f64, elevation_deg: f64) -> Self {
        Self {
            radar_lat_deg,
            radar_lon_deg,
            elevation_deg,
        }
    }
}

impl ProjectionFunction for EllipsoidalProjection {
    fn project(&self, azimuth_deg: f64, slant_range_m: f64) -> (f64, f64) {
        let gr = beam::ground_range(slant_range_m, self.elevation_deg);
        let (lat, lon) =
            aeqd::ellipsoidal_destination(self.radar_lat_deg, self.radar_lon_deg, azimuth_deg, gr);
        mercator::normalize(lat, lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategies_agree_within_tolerance() {
        let analytic = AnalyticProjection::new(35.0, -97.0, 0.5);
        let ellipsoidal = EllipsoidalProjection::new(35.0, -97.0, 0.5);

        for az in [0.0, 37.0, 90.0, 181.5, 270.0, 359.9] {
            for sr in [1_000.0, 50_000.0, 150_000.0] {
                let (xa, ya) = analytic.project(az, sr);
                let (xe, ye) = ellipsoidal.project(az, sr);
                assert!(
                    (xa - xe).abs() < 1e-4 && (ya - ye).abs() < 1e-4,
                    "az {az} sr {sr}: analytic ({xa}, {ya}) vs ellipsoidal ({xe}, {ye})"
                );
            }
        }
    }

    #[test]
    fn test_zero_range_projects_to_origin() {
        let analytic = AnalyticProjection::new(35.0, -97.0, 0.5);
        let (x, y) = analytic.project(45.0, 0.0);
        let (x0, y0) = mercator::normalize(35.0, -97.0);
        assert!(x.is_finite() && y.is_finite());
        assert!((x - x0).abs() < 1e-9 && (y - y0).abs() < 1e-9);
    }

    #[test]
    fn test_azimuth_wraparound_no_seam() {
        // Positions just either side of north must be adjacent, not a
        // map-width apart.
        for proj in [
            Box::new(AnalyticProjection::new(35.0, -97.0, 0.5)) as Box<dyn ProjectionFunction>,
            Box::new(EllipsoidalProjection::new(35.0, -97.0, 0.5)),
        ] {
            let (xa, ya) = proj.project(359.9, 100_000.0);
            let (xb, yb) = proj.project(0.1, 100_000.0);
            assert!((xa - xb).abs() < 1e-4, "x seam: {xa} vs {xb}");
            assert!((ya - yb).abs() < 1e-4, "y seam: {ya} vs {yb}");
        }
    }

    #[test]
    fn test_cardinal_directions() {
        let proj = EllipsoidalProjection::new(35.0, -97.0, 0.5);
        let (x0, y0) = mercator::normalize(35.0, -97.0);

        let (_, y_n) = proj.project(0.0, 100_000.0);
        assert!(y_n < y0, "north must decrease y");
        let (x_e, _) = proj.project(90.0, 100_000.0);
        assert!(x_e > x0, "east must increase x");
        let (_, y_s) = proj.project(180.0, 100_000.0);
        assert!(y_s > y0, "south must increase y");
        let (x_w, _) = proj.project(270.0, 100_000.0);
        assert!(x_w < x0, "west must decrease x");
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!(ProjectionMode::parse("analytic"), Some(ProjectionMode::Analytic));
        assert_eq!(
            ProjectionMode::parse("Ellipsoidal"),
            Some(ProjectionMode::Ellipsoidal)
        );
        assert_eq!(ProjectionMode::parse("mercator"), None);
    }

    #[test]
    fn test_mode_serde_names() {
        let mode: ProjectionMode = serde_json::from_str("\"analytic\"").unwrap();
        assert_eq!(mode, ProjectionMode::Analytic);
        assert_eq!(
            serde_json::to_string(&ProjectionMode::Ellipsoidal).unwrap(),
            "\"ellipsoidal\""
        );
    }
}
