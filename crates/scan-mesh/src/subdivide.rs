//! Radial subdivision policy.
//!
//! A single straight segment per radial reads fine at short range, but map
//! projection curvature makes it visibly wrong once a radial spans more than
//! a few tens of kilometers of ground distance. Subdividing caps the
//! positional error of each straight segment while keeping the number of
//! projection evaluations small.

/// Number of straight segments used to approximate one curved radial.
///
/// `max(1, ceil(ngates * gate_spacing / max_segment_ground_m))`.
pub fn segment_count(ngates: usize, gate_spacing_m: f64, max_segment_ground_m: f64) -> usize {
    let depth = ngates as f64 * gate_spacing_m;
    ((depth / max_segment_ground_m).ceil() as usize).max(1)
}
