//! Azimuthal-equidistant inverse projections about a center point.
//!
//! Both functions take a polar offset (azimuth, ground distance) from a
//! center and return the geographic coordinates of the offset point, which
//! is exactly the inverse of an azimuthal-equidistant projection referenced
//! at that center. The spherical form is cheap; the ellipsoidal form runs
//! the Vincenty direct problem on WGS84.

use crate::beam::EARTH_RADIUS_M;

/// WGS84 semi-major axis in meters.
const WGS84_A: f64 = 6_378_137.0;
/// WGS84 flattening.
const WGS84_F: f64 = 1.0 / 298.257_223_563;

/// Great-circle destination on a sphere of radius [`EARTH_RADIUS_M`].
///
/// Returns the (lat, lon) in degrees of the point `distance_m` from
/// `(lat0_deg, lon0_deg)` along initial bearing `azimuth_deg`.
pub fn spherical_destination(
    lat0_deg: f64,
    lon0_deg: f64,
    azimuth_deg: f64,
    distance_m: f64,
) -> (f64, f64) {
    let c = distance_m / EARTH_RADIUS_M;
    let az = azimuth_deg.to_radians();
    let lat0 = lat0_deg.to_radians();

    let (sin_lat0, cos_lat0) = (lat0.sin(), lat0.cos());
    let (sin_c, cos_c) = (c.sin(), c.cos());

    let sin_lat = sin_lat0 * cos_c + cos_lat0 * sin_c * az.cos();
    let lat = sin_lat.asin();
    let lon =
        lon0_deg.to_radians() + (az.sin() * sin_c * cos_lat0).atan2(cos_c - sin_lat0 * sin_lat);

    (lat.to_degrees(), lon.to_degrees())
}

/// Geodesic destination on the WGS84 ellipsoid (Vincenty direct problem).
///
/// Returns the (lat, lon) in degrees of the point `distance_m` from
/// `(lat0_deg, lon0_deg)` along initial bearing `azimuth_deg`. The sigma
/// iteration converges in a handful of steps at radar ranges; the iteration
/// cap only guards pathological inputs.
pub fn ellipsoidal_destination(
    lat0_deg: f64,
    lon0_deg: f64,
    azimuth_deg: f64,
    distance_m: f64,
) -> (f64, f64) {
    let b = WGS84_A * (1.0 - WGS84_F);

    let alpha1 = azimuth_deg.to_radians();
    let (sin_alpha1, cos_alpha1) = (alpha1.sin(), alpha1.cos());

    let tan_u1 = (1.0 - WGS84_F) * lat0_deg.to_radians().tan();
    let cos_u1 = 1.0 / (1.0 + tan_u1 * tan_u1).sqrt();
    let sin_u1 = tan_u1 * cos_u1;

    let sigma1 = tan_u1.atan2(cos_alpha1);
    let sin_alpha = cos_u1 * sin_alpha1;
    let cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;
    let u_sq = cos_sq_alpha * (WGS84_A * WGS84_A - b * b) / (b * b);

    let big_a = 1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
    let big_b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));

    let sigma_base = distance_m / (b * big_a);
    let mut sigma = sigma_base;
    let mut sin_sigma = sigma.sin();
    let mut cos_sigma = sigma.cos();
    let mut cos_2sigma_m = (2.0 * sigma1 + sigma).cos();

    for _ in 0..32 {
        cos_2sigma_m = (2.0 * sigma1 + sigma).cos();
        sin_sigma = sigma.sin();
        cos_sigma = sigma.cos();

        let delta_sigma = big_b
            * sin_sigma
            * (cos_2sigma_m
                + big_b / 4.0
                    * (cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)
                        - big_b / 6.0
                            * cos_2sigma_m
                            * (-3.0 + 4.0 * sin_sigma * sin_sigma)
                            * (-3.0 + 4.0 * cos_2sigma_m * cos_2sigma_m)));

        let next = sigma_base + delta_sigma;
        if (next - sigma).abs() < 1e-12 {
            sigma = next;
            break;
        }
        sigma = next;
    }
    sin_sigma = sigma.sin();
    cos_sigma = sigma.cos();
    cos_2sigma_m = (2.0 * sigma1 + sigma).cos();

    let tmp = sin_u1 * sin_sigma - cos_u1 * cos_sigma * cos_alpha1;
    let lat = (sin_u1 * cos_sigma + cos_u1 * sin_sigma * cos_alpha1)
        .atan2((1.0 - WGS84_F) * (sin_alpha * sin_alpha + tmp * tmp).sqrt());

    let lambda = (sin_sigma * sin_alpha1).atan2(cos_u1 * cos_sigma - sin_u1 * sin_sigma * cos_alpha1);
    let big_c = WGS84_F / 16.0 * cos_sq_alpha * (4.0 + WGS84_F * (4.0 - 3.0 * cos_sq_alpha));
    let l = lambda
        - (1.0 - big_c)
            * WGS84_F
            * sin_alpha
            * (sigma
                + big_c
                    * sin_sigma
                    * (cos_2sigma_m
                        + big_c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)));

    let lon = lon0_deg.to_radians() + l;
    (lat.to_degrees(), lon.to_degrees())
}
