mod config;
mod error;

use std::fmt;

use env_logger::Env;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use vmon::{Band, Millivolts, Monitor};

use crate::{
    config::{CYCLES, START, STEP, SUPPLY},
    error::Error,
};

/// Operating level of the supply, one per band
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Level {
    Shutdown,
    Low,
    Normal,
    High,
    Over,
}

impl Level {
    const ALL: [Level; 5] = [
        Level::Shutdown,
        Level::Low,
        Level::Normal,
        Level::High,
        Level::Over,
    ];

    fn from_band(band: Band) -> Option<Self> {
        Self::ALL.get(usize::from(band)).copied()
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Level::Shutdown => "VOLTAGE_SHUTDOWN",
            Level::Low => "VOLTAGE_LOW",
            Level::Normal => "VOLTAGE_NORMAL",
            Level::High => "VOLTAGE_HIGH",
            Level::Over => "VOLTAGE_OVER",
        };
        f.write_str(name)
    }
}

/// Push one sample through the monitor and return the resulting band and voltage
fn cycle(mon: &mut Monitor<1>, sample: u16) -> (Band, Millivolts) {
    mon.classify(&[sample]);
    (mon.states()[0], mon.voltages()[0])
}

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let mut mon = Monitor::new([SUPPLY]);
    info!(
        "thresholds {:?} mV, hysteresis {} mV",
        SUPPLY.thresholds.as_slice(),
        SUPPLY.hysteresis
    );

    // Full scale of the converter after the divider
    let full_scale = SUPPLY.calibration.convert(4095);
    let pb = ProgressBar::new(u64::from(full_scale));
    pb.set_style(
        ProgressStyle::with_template("{prefix:.bold} ▕{bar:40.green}▏{pos:>5} mV {msg}")?
            .progress_chars("█▉▊▋▌▍▎▏  "),
    );
    pb.set_prefix("Supply");

    let mut sample = *START;
    for (label, up) in [("Cycle++", true), ("Cycle--", false)] {
        for i in 0..*CYCLES {
            sample = if up {
                sample.wrapping_add(*STEP)
            } else {
                sample.wrapping_sub(*STEP)
            };
            let (band, voltage) = cycle(&mut mon, sample);
            let level = Level::from_band(band)
                .map(|l| l.to_string())
                .unwrap_or_else(|| format!("BAND_{band}"));

            pb.set_position(u64::from(voltage));
            pb.set_message(level.clone());
            pb.println(format!(
                "{label} {i:02}: sample {sample}, voltage {voltage} mV {level}"
            ));
        }
    }
    pb.finish_and_clear();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_per_band() {
        assert_eq!(Level::from_band(0), Some(Level::Shutdown));
        assert_eq!(Level::from_band(4), Some(Level::Over));
        assert_eq!(Level::from_band(5), None);
        assert_eq!(Level::Normal.to_string(), "VOLTAGE_NORMAL");
    }

    #[test]
    fn cycle_reports_band_and_voltage() {
        let mut mon = Monitor::new([SUPPLY]);
        assert_eq!(cycle(&mut mon, 1005), (1, 7362));
        // 1205 reads 8826 mV, inside band 1
        assert_eq!(cycle(&mut mon, 1205), (1, 8826));
        assert_eq!(cycle(&mut mon, 2805), (4, 20544));
    }

    #[test]
    fn wrapped_sample_does_not_stall_the_ramp() {
        let mut mon = Monitor::new([SUPPLY]);
        // A ramp stepping below zero wraps to the top of the sample range
        let sample = 5u16.wrapping_sub(200);
        let (band, voltage) = cycle(&mut mon, sample);
        assert_eq!(band, 4);
        assert!(voltage > 20000);
        for (sample, expected) in [(1005, 1), (1205, 1), (5, 0)] {
            assert_eq!(cycle(&mut mon, sample).0, expected);
        }
    }
}
