//! Polar radar scan data model.
//!
//! A scan is an N x G grid of reflectivity codes: N rays, each labeled by its
//! center azimuth, with G range gates at fixed spacing along the beam. This
//! crate owns the typed view over one decoded scan plus the angular cell
//! boundary math (azimuth edges) that mesh construction consumes.

pub mod azimuth;
pub mod error;
pub mod scan;

pub use azimuth::{angle_diff, compute_edges, normalize_angle};
pub use error::DecodeError;
pub use scan::{PolarScan, ScanMetadata};
