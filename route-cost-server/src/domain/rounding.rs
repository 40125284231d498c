//! Decimal rounding for reported figures.

/// Round `value` to `decimals` places, half away from zero.
///
/// ```
/// use route_cost_server::domain::round_to;
///
/// assert_eq!(round_to(12.345, 1), 12.3);
/// assert_eq!(round_to(2.675, 2), 2.68);
/// assert_eq!(round_to(-1.25, 1), -1.3);
/// ```
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    let scaled = value * factor;

    // Nudge by a relative epsilon so values like 2.675 (stored as 2.67499...)
    // round the way they read.
    let nudged = scaled + scaled.signum() * scaled.abs() * f64::EPSILON * 4.0;
    nudged.round() / factor
}
