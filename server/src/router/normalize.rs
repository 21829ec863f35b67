//! Scale raw values against the largest value of the batch.

use super::diagnostics::{ScoringEvent, ScoringObserver};

/// Divide `value` by `max_value`.
///
/// Returns 0 and reports a [`ScoringEvent::ZeroMaxNormalization`] when
/// the maximum is absent or not positive. The result is not clamped: it
/// exceeds 1 if `value` was not part of the population `max_value` was
/// taken from.
pub fn normalize(value: f64, max_value: Option<f64>, observer: &mut dyn ScoringObserver) -> f64 {
    match max_value {
        Some(max_value) if max_value > 0.0 => value / max_value,
        _ => {
            observer.on_event(ScoringEvent::ZeroMaxNormalization { value, max_value });
            0.0
        }
    }
}
