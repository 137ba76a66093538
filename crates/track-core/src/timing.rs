//! Frame/time conversion.
//!
//! Hosts express playback rate as a rate/base pair so that fractional rates
//! such as 29.97 (`30 / 1.001`) are exact. Everything downstream works from
//! the single effective rate.

use evtt_common::error::{EvttError, EvttResult};
use evtt_model::clip::FrameRate;

/// Effective frames per second for a rate/base pair.
///
/// A missing or zero `fps_base` counts as `1.0`. Fails with
/// [`EvttError::InvalidRate`] unless the result is finite and positive.
pub fn effective_frame_rate(fps: f64, fps_base: Option<f64>) -> EvttResult<f64> {
    let base = match fps_base {
        Some(base) if base != 0.0 => base,
        _ => 1.0,
    };

    let rate = fps / base;
    if rate.is_finite() && rate > 0.0 {
        Ok(rate)
    } else {
        Err(EvttError::invalid_rate(fps, fps_base))
    }
}

/// Effective frames per second for a [`FrameRate`].
pub fn effective_rate(rate: &FrameRate) -> EvttResult<f64> {
    effective_frame_rate(rate.fps, rate.fps_base)
}

/// Seconds elapsed at `frame`. No clamping is applied.
pub fn frame_to_seconds(frame: f64, effective_fps: f64) -> f64 {
    frame / effective_fps
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_rate() {
        assert_eq!(effective_frame_rate(24.0, Some(1.0)).unwrap(), 24.0);
        assert_eq!(effective_frame_rate(60.0, None).unwrap(), 60.0);
    }

    #[test]
    fn test_zero_base_counts_as_one() {
        assert_eq!(effective_frame_rate(25.0, Some(0.0)).unwrap(), 25.0);
    }

    #[test]
    fn test_fractional_rate() {
        let ntsc = effective_rate(&FrameRate::with_base(30.0, 1.001)).unwrap();
        assert!((ntsc - 29.97003).abs() < 1e-5);
    }

    #[test]
    fn test_degenerate_rates_are_rejected() {
        for (fps, base) in [
            (0.0, None),
            (-24.0, Some(1.0)),
            (24.0, Some(-1.0)),
            (f64::NAN, None),
            (f64::INFINITY, None),
            (24.0, Some(f64::NAN)),
            (24.0, Some(1e-320)),
        ] {
            let err = effective_frame_rate(fps, base).unwrap_err();
            assert!(
                matches!(err, EvttError::InvalidRate { .. }),
                "fps={fps} base={base:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_frame_to_seconds() {
        assert_eq!(frame_to_seconds(12.0, 24.0), 0.5);
        assert_eq!(frame_to_seconds(0.0, 24.0), 0.0);
        assert_eq!(frame_to_seconds(-24.0, 24.0), -1.0);
        assert_eq!(frame_to_seconds(90.0, 60.0), 1.5);
    }
}
