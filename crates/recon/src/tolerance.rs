//! Tolerance predicates for comparing a reconstructed total with an
//! extracted one.

use crate::config::ToleranceConfig;

/// Relative band scaled by the aggregate tax, plus a flat margin:
///
/// ```text
/// target * (1 - eps) - margin <= reconstructed <= target * (1 + eps) + margin
/// eps = 1 / (relative_scale * total_vat)
/// ```
///
/// Small tax totals widen the band, large ones tighten it.
pub fn within_scaled(target: f64, reconstructed: f64, total_vat: f64, tol: &ToleranceConfig) -> bool {
    let eps = 1.0 / (tol.relative_scale * total_vat);
    let lower = target * (1.0 - eps) - tol.absolute_margin;
    let upper = target * (1.0 + eps) + tol.absolute_margin;
    lower <= reconstructed && reconstructed <= upper
}

/// Flat `±flat_margin` band around `target`.
pub fn within_flat(target: f64, reconstructed: f64, tol: &ToleranceConfig) -> bool {
    target - tol.flat_margin <= reconstructed && reconstructed <= target + tol.flat_margin
}
