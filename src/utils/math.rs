/// Lowest possible category or overall score
pub const MIN_SCORE: f64 = 0.0;
/// Highest possible category or overall score
pub const MAX_SCORE: f64 = 10.0;

/// Clamp a risk score into `[0, 10]`.
pub fn clamp_score(score: f64) -> f64 {
    score.clamp(MIN_SCORE, MAX_SCORE)
}

/// Weighted average of `(value, weight)` pairs. `None` when the weights sum
/// to zero.
pub fn weighted_average(pairs: &[(f64, f64)]) -> Option<f64> {
    let total_weight: f64 = pairs.iter().map(|(_, w)| w).sum();
    if total_weight <= 0.0 {
        return None;
    }

    let weighted_sum: f64 = pairs.iter().map(|(v, w)| v * w).sum();
    Some(weighted_sum / total_weight)
}

/// Dot product of component risks with their blend weights.
pub fn blend(components: &[(f64, f64)]) -> f64 {
    components.iter().map(|(risk, weight)| risk * weight).sum()
}

/// Format a dollar amount with thousands separators and no decimals.
/// Halves round to even, so `2.5` prints as `2`.
pub fn format_usd_whole(amount: f64) -> String {
    let rounded = amount.round_ties_even();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}
