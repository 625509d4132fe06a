//! Number formatting for risk cards.

/// Probability in \[0, 1\] as a percentage with one decimal digit (`0.02` → `"2.0%"`).
///
/// Exact ties round away from zero (`0.0125` → `"1.3%"`); everything else
/// rounds to the nearest representable digit.
pub fn percent(probability: f64) -> String {
    let value = probability * 100.0;
    let tenths = value * 10.0;
    if tenths.fract().abs() == 0.5 {
        return format!("{:.1}%", tenths.round() / 10.0);
    }
    format!("{value:.1}%")
}
