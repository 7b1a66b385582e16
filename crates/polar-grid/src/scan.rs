//! Typed view over one decoded radar scan.

use serde::{Deserialize, Serialize};

use crate::error::DecodeError;

/// Scan geometry and dimensions as reported by the data-access layer.
///
/// Field names follow the decoded archive metadata: `nazs` rays of `ngates`
/// gates each, gates spaced `gate_spacing` meters starting `first_gate`
/// meters from the antenna, at elevation `scanangle` degrees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanMetadata {
    /// Ray center azimuths in degrees, length `nazs`. Not necessarily
    /// sorted, but cyclically consistent.
    pub azimuths: Vec<f64>,
    /// Range gate spacing in meters.
    pub gate_spacing: f64,
    /// Slant range to the first gate in meters.
    pub first_gate: f64,
    /// Number of rays in the scan.
    pub nazs: usize,
    /// Number of range gates per ray.
    pub ngates: usize,
    /// Antenna elevation angle in degrees.
    pub scanangle: f64,
    /// Radar site latitude in degrees.
    pub radar_lat: f64,
    /// Radar site longitude in degrees.
    pub radar_lon: f64,
}

impl ScanMetadata {
    /// Parse a metadata document from JSON bytes.
    ///
    /// Missing or mistyped fields fail with [`DecodeError::Metadata`].
    pub fn from_json(raw: &[u8]) -> Result<Self, DecodeError> {
        Ok(serde_json::from_slice(raw)?)
    }
}

/// One decoded radar scan: geometry plus an N x G grid of sample codes.
///
/// Immutable once constructed; construction validates that the sample grid
/// actually has the declared shape.
#[derive(Debug, Clone)]
pub struct PolarScan {
    metadata: ScanMetadata,
    samples: Vec<u8>,
}

impl PolarScan {
    /// Build a scan from validated metadata and row-major samples.
    ///
    /// Fails with a [`DecodeError`] when the grid shape disagrees with the
    /// declared `(nazs, ngates)` or the geometry fields are out of range.
    pub fn from_parts(metadata: ScanMetadata, samples: Vec<u8>) -> Result<Self, DecodeError> {
        if metadata.nazs == 0 {
            return Err(DecodeError::invalid_metadata("nazs must be at least 1"));
        }
        if metadata.ngates == 0 {
            return Err(DecodeError::invalid_metadata("ngates must be at least 1"));
        }
        if !(metadata.gate_spacing > 0.0) {
            return Err(DecodeError::invalid_metadata(format!(
                "gate_spacing must be positive, got {}",
                metadata.gate_spacing
            )));
        }
        if !(metadata.first_gate >= 0.0) {
            return Err(DecodeError::invalid_metadata(format!(
                "first_gate must be non-negative, got {}",
                metadata.first_gate
            )));
        }
        if metadata.azimuths.len() != metadata.nazs {
            return Err(DecodeError::AzimuthCountMismatch {
                expected: metadata.nazs,
                actual: metadata.azimuths.len(),
            });
        }
        let expected = metadata.nazs * metadata.ngates;
        if samples.len() != expected {
            return Err(DecodeError::ShapeMismatch {
                nazs: metadata.nazs,
                ngates: metadata.ngates,
                expected,
                actual: samples.len(),
            });
        }

        Ok(Self { metadata, samples })
    }

    /// Number of rays (azimuths).
    pub fn nazs(&self) -> usize {
        self.metadata.nazs
    }

    /// Number of range gates per ray.
    pub fn ngates(&self) -> usize {
        self.metadata.ngates
    }

    /// Range gate spacing in meters.
    pub fn gate_spacing(&self) -> f64 {
        self.metadata.gate_spacing
    }

    /// Slant range to the first gate in meters.
    pub fn first_gate(&self) -> f64 {
        self.metadata.first_gate
    }

    /// Antenna elevation angle in degrees.
    pub fn elevation_deg(&self) -> f64 {
        self.metadata.scanangle
    }

    /// Radar site (latitude, longitude) in degrees.
    pub fn origin(&self) -> (f64, f64) {
        (self.metadata.radar_lat, self.metadata.radar_lon)
    }

    /// Ray center azimuths in degrees.
    pub fn azimuths(&self) -> &[f64] {
        &self.metadata.azimuths
    }

    /// The full sample grid, row-major (ray-major).
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// Total slant-range depth of the scan in meters (`ngates * gate_spacing`).
    pub fn range_depth_m(&self) -> f64 {
        self.metadata.ngates as f64 * self.metadata.gate_spacing
    }

    /// Sample code at ray `ray`, gate `gate`.
    ///
    /// Indices outside the grid are a programming error and panic.
    pub fn sample(&self, ray: usize, gate: usize) -> u8 {
        assert!(
            ray < self.metadata.nazs && gate < self.metadata.ngates,
            "sample index ({}, {}) outside {} x {} grid",
            ray,
            gate,
            self.metadata.nazs,
            self.metadata.ngates
        );
        self.samples[ray * self.metadata.ngates + gate]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(nazs: usize, ngates: usize) -> ScanMetadata {
        ScanMetadata {
            azimuths: (0..nazs).map(|i| i as f64 * 360.0 / nazs as f64).collect(),
            gate_spacing: 250.0,
            first_gate: 0.0,
            nazs,
            ngates,
            scanangle: 0.5,
            radar_lat: 35.0,
            radar_lon: -97.0,
        }
    }

    #[test]
    fn test_from_parts_valid() {
        let scan = PolarScan::from_parts(metadata(4, 8), vec![7u8; 32]).unwrap();
        assert_eq!(scan.nazs(), 4);
        assert_eq!(scan.ngates(), 8);
        assert_eq!(scan.sample(3, 7), 7);
        assert!((scan.range_depth_m() - 2000.0).abs() < 1e-9);
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let err = PolarScan::from_parts(metadata(4, 8), vec![0u8; 31]).unwrap_err();
        match err {
            DecodeError::ShapeMismatch {
                expected, actual, ..
            } => {
                assert_eq!(expected, 32);
                assert_eq!(actual, 31);
            }
            other => panic!("expected ShapeMismatch, got {other}"),
        }
    }

    #[test]
    fn test_azimuth_count_mismatch_rejected() {
        let mut md = metadata(4, 8);
        md.azimuths.pop();
        let err = PolarScan::from_parts(md, vec![0u8; 32]).unwrap_err();
        assert!(matches!(err, DecodeError::AzimuthCountMismatch { .. }));
    }

    #[test]
    fn test_bad_geometry_rejected() {
        let mut md = metadata(4, 8);
        md.gate_spacing = 0.0;
        assert!(PolarScan::from_parts(md, vec![0u8; 32]).is_err());

        let mut md = metadata(4, 8);
        md.first_gate = -1.0;
        assert!(PolarScan::from_parts(md, vec![0u8; 32]).is_err());
    }

    #[test]
    fn test_metadata_from_json_missing_field() {
        let raw = br#"{"azimuths": [0.0], "gate_spacing": 250.0}"#;
        assert!(matches!(
            ScanMetadata::from_json(raw),
            Err(DecodeError::Metadata(_))
        ));
    }

    #[test]
    fn test_metadata_from_json_roundtrip() {
        let md = metadata(2, 3);
        let raw = serde_json::to_vec(&md).unwrap();
        let parsed = ScanMetadata::from_json(&raw).unwrap();
        assert_eq!(parsed.nazs, 2);
        assert_eq!(parsed.ngates, 3);
        assert_eq!(parsed.azimuths, md.azimuths);
    }

    #[test]
    #[should_panic]
    fn test_out_of_range_sample_panics() {
        let scan = PolarScan::from_parts(metadata(4, 8), vec![0u8; 32]).unwrap();
        scan.sample(4, 0);
    }
}
