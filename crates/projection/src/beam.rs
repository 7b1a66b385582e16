//! Beam propagation model.
//!
//! Radar samples are addressed by slant range along the beam; on a map they
//! sit at the ground range below the beam. Under standard atmospheric
//! refraction the beam bends as if the earth had 4/3 its true radius, so the
//! correction uses an effective earth of radius `KE * EARTH_RADIUS_M`.

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Effective-earth multiplier for standard atmospheric refraction.
pub const KE: f64 = 4.0 / 3.0;

/// Slant ranges below this are clamped before the ground-range formula,
/// which divides by a term that vanishes at zero range.
pub const MIN_SLANT_RANGE_M: f64 = 0.01;

/// Convert slant range along the beam to ground range on the surface.
///
/// Uses the 4/3-effective-earth model:
///
/// ```text
/// h  = sqrt(sr^2 + (ke*Re)^2 + 2*ke*Re*sr*sin(theta))
/// gr = ke*Re * asin(sr*cos(theta) / h)
/// ```
///
/// The slant range is clamped to [`MIN_SLANT_RANGE_M`], so the result is
/// always finite.
pub fn ground_range(slant_range_m: f64, elevation_deg: f64) -> f64 {
    let sr = slant_range_m.max(MIN_SLANT_RANGE_M);
    let theta = elevation_deg.to_radians();
    let ker = KE * EARTH_RADIUS_M;

    let h = (sr * sr + ker * ker + 2.0 * ker * sr * theta.sin()).sqrt();
    ker * (sr * theta.cos() / h).asin()
}
