//! Azimuth cell boundary math.
//!
//! Rays are labeled by their center azimuth; drawing needs the angular
//! boundaries between adjacent rays. Edge `i` is the bisector of rays `i-1`
//! and `i`, with the `i = 0` edge wrapping through north.

/// Normalize an angle in degrees into `[0, 360)`.
pub fn normalize_angle(deg: f64) -> f64 {
    let a = deg % 360.0;
    if a < 0.0 {
        a + 360.0
    } else {
        a
    }
}

/// Angular step from `a1` to `a2` in degrees, in `[0, 360)`.
///
/// Small values are small forward rotations; values above 180 represent
/// rotation in the opposite direction. Used to test angular-step magnitude
/// between neighboring azimuth edges.
pub fn angle_diff(a1: f64, a2: f64) -> f64 {
    ((a2 - a1 + 180.0).rem_euclid(360.0) - 180.0).rem_euclid(360.0)
}

/// Compute the angular cell boundaries for a scan's ray azimuths.
///
/// Returns one edge per ray: `edge[i]` bisects rays `i-1` and `i`, and
/// `edge[0]` bisects the last and first rays across the 0/360 wrap.
pub fn compute_edges(azimuths: &[f64]) -> Vec<f64> {
    let n = azimuths.len();
    assert!(n >= 1, "scan must have at least one azimuth");

    let mut edges = Vec::with_capacity(n);
    edges.push(normalize_angle((azimuths[0] + 360.0 + azimuths[n - 1]) / 2.0));
    for i in 1..n {
        edges.push((azimuths[i - 1] + azimuths[i]) / 2.0);
    }
    edges
}
