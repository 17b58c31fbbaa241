use crate::{Band, Channel, ChannelConfig, Millivolts};

/// A fixed set of independently monitored channels
///
/// # Type arguments
///
/// * `N` - number of channels. Every per-cycle call takes and returns exactly one value per
///   channel.
#[derive(Clone, Debug)]
pub struct Monitor<const N: usize> {
    channels: [Channel; N],
}

impl<const N: usize> Monitor<N> {
    /// Initialize all channels from their configuration. Every channel starts in band `0`.
    pub fn new(configs: [ChannelConfig; N]) -> Self {
        Self {
            channels: configs.map(Channel::new),
        }
    }

    /// Convert and classify one raw sample per channel
    pub fn classify(&mut self, samples: &[u16; N]) {
        for (channel, &sample) in self.channels.iter_mut().zip(samples) {
            channel.update(sample);
        }
    }

    /// Current band of each channel
    pub fn states(&self) -> [Band; N] {
        core::array::from_fn(|i| self.channels[i].state())
    }

    /// Last voltage of each channel
    pub fn voltages(&self) -> [Millivolts; N] {
        core::array::from_fn(|i| self.channels[i].voltage())
    }

    /// Return every channel to band `0`, keeping the configuration
    pub fn reset(&mut self) {
        self.channels.iter_mut().for_each(Channel::reset);
    }

    pub fn channels(&self) -> &[Channel; N] {
        &self.channels
    }

    pub fn channel(&self, idx: usize) -> Option<&Channel> {
        self.channels.get(idx)
    }

    pub fn channel_mut(&mut self, idx: usize) -> Option<&mut Channel> {
        self.channels.get_mut(idx)
    }
}
