#![cfg_attr(feature = "device", no_std)]
//! Calibrated voltage readout and hysteresis band classification for multi-channel ADC monitors.
//!
//! A [Monitor] owns one [Channel] per analog input. Each cycle the caller hands in one raw sample
//! per channel; the sample is converted to millivolts using the channel's [Calibration] and then
//! classified into a band of the channel's [Thresholds].

mod channel;
mod convert;
mod monitor;
mod threshold;

pub use channel::{Channel, ChannelConfig};
pub use convert::Calibration;
pub use monitor::Monitor;
pub use threshold::{classify, Thresholds, THRESHOLD_MAX};

/// Voltage in millivolts
pub type Millivolts = u32;

/// Band index of a channel, `0..=count` where `count` is the number of thresholds in use
pub type Band = u8;
