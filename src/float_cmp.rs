//! Floating-point closeness for rank comparisons.
//!
//! Cost keys range from 0 to arbitrarily large values within a single
//! search, so closeness must scale with the magnitude of both operands. An
//! absolute epsilon would either merge distinct large keys or fail to merge
//! near-identical ones, breaking the frontier ordering either way.

/// Relative-magnitude equality: the difference must be small compared to
/// both operands. Note that this is strict for zero operands
/// (`very_close_equals(0.0, 0.0)` is `false`); callers wanting reflexive
/// equality should use [rank_equal].
pub fn very_close_equals(u: f64, v: f64) -> bool {
    let eps = f64::EPSILON;
    (u - v).abs() < eps * u.abs() && (u - v).abs() < eps * v.abs()
}

/// Reflexive closure of [very_close_equals], used as the "primary keys tie"
/// test by the frontier comparator.
pub fn rank_equal(u: f64, v: f64) -> bool {
    u == v || very_close_equals(u, v)
}
