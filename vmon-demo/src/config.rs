//! Demo parameters. The ramp can be tuned with the `VMON_START`, `VMON_STEP` and `VMON_CYCLES`
//! environment variables.

use std::{env, fmt::Display, str::FromStr, sync::LazyLock};

use log::warn;
use vmon::{Calibration, ChannelConfig, Thresholds};

/// 12-bit converter with a 5 V reference behind a 1:6 divider
pub const SUPPLY: ChannelConfig = ChannelConfig {
    calibration: Calibration::new(5000, 4095, 6000, 0),
    thresholds: Thresholds::from_storage([6000, 9000, 16000, 20000, 0, 0, 0, 0, 0, 0]),
    hysteresis: 500,
};

const DEFAULT_START: u16 = 5;
const DEFAULT_STEP: u16 = 200;
const DEFAULT_CYCLES: usize = 20;

/// Raw sample before the first cycle
pub static START: LazyLock<u16> = LazyLock::new(|| env_or("VMON_START", DEFAULT_START));

/// Change of the raw sample per cycle
pub static STEP: LazyLock<u16> = LazyLock::new(|| env_or("VMON_STEP", DEFAULT_STEP));

/// Number of cycles in each direction
pub static CYCLES: LazyLock<usize> = LazyLock::new(|| env_or("VMON_CYCLES", DEFAULT_CYCLES));

fn env_or<T: FromStr + Display>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(value) => value.parse().unwrap_or_else(|_| {
            warn!("ignoring {key}={value:?}, using {default}");
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_override() {
        env::set_var("VMON_TEST_STEP", "150");
        assert_eq!(env_or("VMON_TEST_STEP", DEFAULT_STEP), 150);
        env::set_var("VMON_TEST_STEP", "lots");
        assert_eq!(env_or("VMON_TEST_STEP", DEFAULT_STEP), DEFAULT_STEP);
        assert_eq!(env_or("VMON_TEST_UNSET", DEFAULT_CYCLES), DEFAULT_CYCLES);
    }
}
