/// Absorbs float accumulation error when comparing summed tick deltas
/// against a duration
const TIMER_EPSILON: f32 = 1e-4;

/// Negative and non-finite deltas advance nothing. Large deltas are passed
/// through untouched; completion guards keep them to a single event.
pub(crate) fn sanitize_delta(delta: f32) -> f32 {
    if delta.is_finite() && delta > 0.0 {
        delta
    } else {
        0.0
    }
}

pub(crate) fn has_elapsed(progress: f32, duration: f32) -> bool {
    progress + TIMER_EPSILON >= duration
}

pub(crate) fn has_run_out(remaining: f32) -> bool {
    remaining <= TIMER_EPSILON
}
