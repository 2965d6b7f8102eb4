//! Latency-based round scoring.

/// Points for an instant answer
pub const MAX_POINTS: u32 = 1000;
/// Points for an answer at or beyond the response horizon
pub const MIN_POINTS: u32 = 100;
/// Default response horizon (ms)
pub const DEFAULT_MAX_RESPONSE_MS: i64 = 10_000;

/// Score a response against the default 10 second horizon
pub fn speed_score(response_ms: i64) -> u32 {
    speed_score_with_max(response_ms, DEFAULT_MAX_RESPONSE_MS)
}

/// Linear falloff from [`MAX_POINTS`] at 0 ms to [`MIN_POINTS`] at `max_ms`
pub fn speed_score_with_max(response_ms: i64, max_ms: i64) -> u32 {
    if response_ms <= 0 {
        return MAX_POINTS;
    }
    if max_ms <= 0 || response_ms >= max_ms {
        return MIN_POINTS;
    }

    let span = f64::from(MAX_POINTS - MIN_POINTS);
    let score = f64::from(MAX_POINTS) - (response_ms as f64 / max_ms as f64) * span;
    (score.round() as u32).max(MIN_POINTS)
}

/// Group thousands with commas: `12345` -> `"12,345"`
pub fn format_score(score: u32) -> String {
    let digits = score.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
