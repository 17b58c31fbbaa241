//! Raw ADC sample to millivolt conversion

use log::debug;
use serde::{Deserialize, Serialize};

use crate::Millivolts;

/// Fixed-point scale of [Calibration::divider]
const DIVIDER_SCALE: u128 = 1000;

/// Per-channel ADC calibration
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calibration {
    /// Full-scale reference voltage of the converter in millivolts
    pub reference: Millivolts,
    /// Quantization span of the converter, i.e., max raw count + 1. Zero is treated as one.
    pub resolution: u32,
    /// External voltage divider ratio in thousandths, e.g., `6000` for a 1:6 attenuator
    pub divider: u32,
    /// Additive correction in millivolts
    pub offset: i32,
}

impl Calibration {
    pub const fn new(reference: Millivolts, resolution: u32, divider: u32, offset: i32) -> Self {
        Self {
            reference,
            resolution,
            divider,
            offset,
        }
    }

    /// Returns the calibration with a zero resolution replaced by one
    pub fn normalized(self) -> Self {
        if self.resolution == 0 {
            debug!("calibration has zero resolution, normalizing to 1");
            Self {
                resolution: 1,
                ..self
            }
        } else {
            self
        }
    }

    /// Convert a raw sample into millivolts
    ///
    /// Each step truncates like the integer division of the converter firmware:
    ///
    /// ```text
    /// raw    = sample * reference / resolution
    /// scaled = raw * divider / 1000
    /// mv     = scaled + offset
    /// ```
    ///
    /// Samples outside `0..resolution` are not clamped and extrapolate linearly. The result
    /// saturates at `0` and `u32::MAX`.
    pub fn convert(&self, sample: u16) -> Millivolts {
        let resolution = u128::from(self.resolution.max(1));
        let raw = u128::from(sample) * u128::from(self.reference) / resolution;
        let scaled = raw * u128::from(self.divider) / DIVIDER_SCALE;
        let scaled = i128::try_from(scaled).unwrap_or(i128::MAX);
        let mv = scaled.saturating_add(i128::from(self.offset));
        mv.clamp(0, i128::from(Millivolts::MAX)) as Millivolts
    }
}

impl Default for Calibration {
    /// Identity calibration: one raw count is one millivolt
    fn default() -> Self {
        Self::new(1, 1, DIVIDER_SCALE as u32, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEMO: Calibration = Calibration::new(5000, 4095, 6000, 0);

    #[test]
    fn zero_sample_is_zero_volts() {
        assert_eq!(DEMO.convert(0), 0);
    }

    #[test]
    fn full_scale_sample() {
        // sample == resolution yields floor(reference * divider / 1000) + offset
        let cal = Calibration::new(5000, 4095, 6000, 0);
        assert_eq!(cal.convert(4095), 30_000);
        let cal = Calibration::new(3300, 4096, 1500, 25);
        assert_eq!(cal.convert(4096), 3300 * 1500 / 1000 + 25);
    }

    #[test]
    fn truncates_each_step() {
        // 1005 * 5000 / 4095 = 1227.1 -> 1227, 1227 * 6 = 7362
        assert_eq!(DEMO.convert(1005), 7362);
        // 2205 * 5000 / 4095 = 2692.3 -> 2692, 2692 * 6 = 16152
        assert_eq!(DEMO.convert(2205), 16152);
        // A fractional divider truncates the scaled value too: 7 * 1500 / 1000 = 10.5 -> 10
        assert_eq!(Calibration::new(1, 1, 1500, 0).convert(7), 10);
    }

    #[test]
    fn wide_intermediate_does_not_overflow() {
        let cal = Calibration::new(u32::MAX, 1, 1000, 0);
        assert_eq!(cal.convert(1), u32::MAX);
        assert_eq!(cal.convert(u16::MAX), u32::MAX);
    }

    #[test]
    fn signed_offset() {
        let cal = Calibration::new(1, 1, 1000, -100);
        assert_eq!(cal.convert(150), 50);
        assert_eq!(cal.convert(50), 0);
    }

    #[test]
    fn out_of_range_sample_extrapolates() {
        let cal = Calibration::new(1000, 100, 1000, 0);
        assert_eq!(cal.convert(200), 2000);
    }

    #[test]
    fn zero_resolution() {
        let cal = Calibration::new(10, 0, 1000, 0);
        assert_eq!(cal.normalized().resolution, 1);
        assert_eq!(cal.convert(3), 30);
        assert_eq!(DEMO.normalized(), DEMO);
    }
}
