//! Forward Web Mercator normalization.

use std::f64::consts::PI;

/// Latitude limit of the Web Mercator square, degrees.
pub const MAX_LATITUDE_DEG: f64 = 85.05112878;

/// Project geographic coordinates onto the normalized Web Mercator square
/// `[0,1] x [0,1]`, x increasing east from the antimeridian, y increasing
/// south from the north edge.
///
/// Latitude is clamped to [`MAX_LATITUDE_DEG`] so the result is always
/// finite; longitude is wrapped into `[-180, 180]`. The output is clamped
/// onto the unit square: the latitude limit is a rounded constant, so the
/// raw formula can land a fraction of an ulp outside it.
pub fn normalize(lat_deg: f64, lon_deg: f64) -> (f64, f64) {
    let lat = lat_deg.clamp(-MAX_LATITUDE_DEG, MAX_LATITUDE_DEG);

    let mut lon = lon_deg;
    while lon > 180.0 {
        lon -= 360.0;
    }
    while lon < -180.0 {
        lon += 360.0;
    }

    let x = (lon + 180.0) / 360.0;
    let y = (1.0 - ((PI / 4.0 + lat.to_radians() / 2.0).tan().ln()) / PI) / 2.0;
    (x.clamp(0.0, 1.0), y.clamp(0.0, 1.0))
}
