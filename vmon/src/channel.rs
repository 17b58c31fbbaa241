use serde::{Deserialize, Serialize};

use crate::{classify, Band, Calibration, Millivolts, Thresholds};

/// Static configuration of a single channel
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelConfig {
    pub calibration: Calibration,
    pub thresholds: Thresholds,
    /// Hysteresis in millivolts
    pub hysteresis: Millivolts,
}

/// A monitored analog input
///
/// Holds the configuration of the input together with the last reading and the band it was
/// classified into. The band starts at `0` and carries over from one [Channel::update] to the next.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Channel {
    calibration: Calibration,
    thresholds: Thresholds,
    hysteresis: Millivolts,
    /// Last computed voltage
    voltage: Millivolts,
    /// Current band, always in `0..=thresholds.count()`
    state: Band,
}

impl Channel {
    pub fn new(config: ChannelConfig) -> Self {
        Self {
            calibration: config.calibration.normalized(),
            thresholds: config.thresholds,
            hysteresis: config.hysteresis,
            voltage: 0,
            state: 0,
        }
    }

    /// Convert `sample` and classify the result. Returns the new band.
    pub fn update(&mut self, sample: u16) -> Band {
        self.voltage = self.calibration.convert(sample);
        self.state = classify(self.voltage, &self.thresholds, self.hysteresis, self.state);
        self.state
    }

    /// Forget the last reading and return to band `0`
    pub fn reset(&mut self) {
        self.voltage = 0;
        self.state = 0;
    }

    pub fn state(&self) -> Band {
        self.state
    }

    pub fn voltage(&self) -> Millivolts {
        self.voltage
    }

    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn hysteresis(&self) -> Millivolts {
        self.hysteresis
    }

    /// Replace the band boundaries
    ///
    /// At most [crate::THRESHOLD_MAX] thresholds are kept. The ordering is not validated. If the
    /// current band no longer exists it is lowered to the new highest band.
    pub fn set_thresholds(&mut self, thresholds: &[Millivolts]) {
        self.thresholds = Thresholds::new(thresholds);
        self.state = self.state.min(self.thresholds.count());
    }

    pub fn set_hysteresis(&mut self, hysteresis: Millivolts) {
        self.hysteresis = hysteresis;
    }
}

impl From<ChannelConfig> for Channel {
    fn from(config: ChannelConfig) -> Self {
        Self::new(config)
    }
}
