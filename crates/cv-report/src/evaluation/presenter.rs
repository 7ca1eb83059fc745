//! Display formatting for optional evaluation fields.
//!
//! Every function here is pure. Absent values resolve to a fallback literal and
//! never to an empty string.

/// Fallback for any optional numeric value.
pub const NOT_AVAILABLE: &str = "N/A";
pub const NOT_EVALUATED: &str = "Not Evaluated";
pub const NONE_PROVIDED: &str = "None provided.";
pub const UNNAMED_CANDIDATE: &str = "Unnamed Candidate";
pub const NONE: &str = "None";

/// Two fractional digits when the score is present and finite, otherwise `fallback`.
pub fn format_score(value: Option<f64>, fallback: &str) -> String {
    match value {
        Some(score) if score.is_finite() => format!("{score:.2}"),
        _ => fallback.to_string(),
    }
}

/// The text verbatim when it holds anything besides whitespace, otherwise `fallback`.
pub fn format_text(value: Option<&str>, fallback: &str) -> String {
    match value {
        Some(text) if !text.trim().is_empty() => text.to_string(),
        _ => fallback.to_string(),
    }
}

/// Percentage label for a weight: `12%`, `12.5%`, or [`NOT_AVAILABLE`].
pub fn format_weight(value: Option<f64>) -> String {
    match value {
        Some(weight) if weight.is_finite() => format!("{}%", trim_decimal(weight)),
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn trim_decimal(value: f64) -> String {
    if value.fract() == 0.0 {
        return format!("{value:.0}");
    }
    let fixed = format!("{value:.2}");
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}
