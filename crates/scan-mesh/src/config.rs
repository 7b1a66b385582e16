//! Configuration for mesh construction.

use projection::ProjectionMode;
use serde::{Deserialize, Serialize};

/// Tunables for the mesh pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshConfig {
    /// Which projection strategy bakes vertex positions.
    pub projection_mode: ProjectionMode,

    /// Angular step below which odd azimuth edges are interpolated from
    /// their exactly projected neighbors instead of projected themselves
    /// (degrees).
    pub interpolation_threshold_deg: f64,

    /// Maximum ground distance one straight radial segment may span before
    /// projection curvature becomes visible (meters).
    pub max_segment_ground_distance_m: f64,

    /// Radar origin (lat, lon) override in degrees. `None` uses the origin
    /// reported in each scan's metadata.
    pub radar_origin: Option<(f64, f64)>,

    /// Bound on the number of cached scans; `None` retains every scan for
    /// the session.
    pub cache_max_entries: Option<usize>,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            projection_mode: ProjectionMode::Ellipsoidal,
            interpolation_threshold_deg: 0.6,
            max_segment_ground_distance_m: 50_000.0,
            radar_origin: None,
            cache_max_entries: None,
        }
    }
}

impl MeshConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("MESH_PROJECTION_MODE") {
            if let Some(mode) = ProjectionMode::parse(&val) {
                config.projection_mode = mode;
            }
        }

        if let Ok(val) = std::env::var("MESH_INTERPOLATION_THRESHOLD_DEG") {
            if let Ok(threshold) = val.parse() {
                config.interpolation_threshold_deg = threshold;
            }
        }

        if let Ok(val) = std::env::var("MESH_MAX_SEGMENT_GROUND_DISTANCE_M") {
            if let Ok(distance) = val.parse() {
                config.max_segment_ground_distance_m = distance;
            }
        }

        if let Ok(val) = std::env::var("MESH_RADAR_ORIGIN") {
            if let Some((lat, lon)) = val.split_once(',') {
                if let (Ok(lat), Ok(lon)) = (lat.trim().parse(), lon.trim().parse()) {
                    config.radar_origin = Some((lat, lon));
                }
            }
        }

        if let Ok(val) = std::env::var("MESH_CACHE_MAX_ENTRIES") {
            if let Ok(entries) = val.parse() {
                config.cache_max_entries = Some(entries);
            }
        }

        config
    }
}
