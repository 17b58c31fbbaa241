//! Threshold sets and hysteresis band classification

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::{Band, Millivolts};

/// Maximum number of thresholds per channel
pub const THRESHOLD_MAX: usize = 10;

/// Ordered band boundaries of a channel
///
/// Each threshold is the lower edge of a band: with `n` thresholds there are `n + 1` bands, band
/// `0` lies below the first threshold and band `n` at or above the last one. The thresholds are
/// expected to be strictly ascending. This is not enforced; a malformed list yields unspecified
/// but always in-range bands.
///
/// Two sets are equal when the thresholds in use are equal, whatever the unused storage holds.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct Thresholds {
    /// Allocation for the thresholds
    arr: [Millivolts; THRESHOLD_MAX],
    /// Number of thresholds in use
    len: u8,
}

impl Thresholds {
    /// A threshold set without boundaries; every voltage falls into band `0`
    pub const fn empty() -> Self {
        Self {
            arr: [0; THRESHOLD_MAX],
            len: 0,
        }
    }

    /// Copy thresholds from a slice
    ///
    /// Entries beyond [THRESHOLD_MAX] are dropped.
    pub fn new(thresholds: &[Millivolts]) -> Self {
        let len = if thresholds.len() > THRESHOLD_MAX {
            warn!(
                "{} thresholds given, only the first {THRESHOLD_MAX} are used",
                thresholds.len()
            );
            THRESHOLD_MAX
        } else {
            thresholds.len()
        };
        let mut arr = [0; THRESHOLD_MAX];
        arr[..len].copy_from_slice(&thresholds[..len]);
        Self {
            arr,
            len: len as u8,
        }
    }

    /// Build a threshold set from zero-padded fixed storage
    ///
    /// The number of thresholds in use is the count of leading non-zero entries; everything from
    /// the first zero on is ignored and cleared.
    pub const fn from_storage(mut arr: [Millivolts; THRESHOLD_MAX]) -> Self {
        let mut len = 0;
        while len < THRESHOLD_MAX && arr[len] != 0 {
            len += 1;
        }
        let mut i = len;
        while i < THRESHOLD_MAX {
            arr[i] = 0;
            i += 1;
        }
        Self {
            arr,
            len: len as u8,
        }
    }

    pub fn as_slice(&self) -> &[Millivolts] {
        // A deserialized `len` is unchecked
        &self.arr[..usize::from(self.len).min(THRESHOLD_MAX)]
    }

    /// Number of thresholds in use, which is also the highest band
    pub fn count(&self) -> Band {
        self.as_slice().len() as Band
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Band of `voltage` without hysteresis: the number of thresholds at or below `voltage`
    pub fn raw_band(&self, voltage: Millivolts) -> Band {
        self.as_slice().iter().filter(|&&t| voltage >= t).count() as Band
    }

    /// Boundary between `band` and the band above it, or `None` for the highest band
    pub fn upper_bound(&self, band: Band) -> Option<Millivolts> {
        self.as_slice().get(usize::from(band)).copied()
    }

    /// Boundary between `band` and the band below it, or `None` for band `0`
    pub fn lower_bound(&self, band: Band) -> Option<Millivolts> {
        band.checked_sub(1).and_then(|b| self.upper_bound(b))
    }
}

impl PartialEq for Thresholds {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for Thresholds {}

impl From<&[Millivolts]> for Thresholds {
    fn from(value: &[Millivolts]) -> Self {
        Self::new(value)
    }
}

/// Compute the next band of a channel
///
/// A move of exactly one band is only accepted once `voltage` has left the crossed boundary by
/// more than `hysteresis`: upwards it must exceed `boundary + hysteresis`, downwards it must fall
/// below `boundary - hysteresis`. Otherwise `previous` is kept. Any other move, including a jump
/// across several bands, is accepted as is.
///
/// # Arguments
///
/// * `voltage` - the current reading
/// * `thresholds` - band boundaries of the channel
/// * `hysteresis` - dead-band half-width around a boundary in millivolts
/// * `previous` - the band returned for the previous reading
pub fn classify(
    voltage: Millivolts,
    thresholds: &Thresholds,
    hysteresis: Millivolts,
    previous: Band,
) -> Band {
    let raw = thresholds.raw_band(voltage);
    if raw.abs_diff(previous) != 1 {
        if raw != previous {
            debug!("band {previous} -> {raw} at {voltage} mV");
        }
        return raw;
    }

    let voltage = i64::from(voltage);
    let hysteresis = i64::from(hysteresis);
    let accept = if raw > previous {
        thresholds
            .upper_bound(previous)
            .map_or(true, |boundary| voltage > i64::from(boundary) + hysteresis)
    } else {
        thresholds
            .lower_bound(previous)
            .map_or(true, |boundary| voltage < i64::from(boundary) - hysteresis)
    };

    if accept {
        debug!("band {previous} -> {raw} at {voltage} mV");
        raw
    } else {
        trace!("{voltage} mV within hysteresis of band {previous}, holding");
        previous
    }
}
