//! Sound-level trigger on an analogue microphone.
//!
//! A baseline is captured at construction; each interval a new sample is
//! compared against it and the trigger is set while the deviation exceeds
//! the threshold.

use embassy_time::{Duration, Instant};

use crate::error::HardwareError;
use crate::gate::IntervalGate;
use crate::poller::Update;

/// Time between microphone samples
pub const DEFAULT_SOUND_INTERVAL: Duration = Duration::from_millis(500);

/// 16-bit analogue sample source (ADC channel)
pub trait LevelSource {
    fn read_u16(&mut self) -> Result<u16, HardwareError>;
}

pub struct SoundTrigger<S> {
    source: S,
    baseline: u16,
    threshold: u16,
    last_difference: u16,
    triggered: bool,
    gate: IntervalGate,
}

impl<S: LevelSource> SoundTrigger<S> {
    /// Capture the baseline from `source` and start sampling after `interval`
    pub fn new(
        mut source: S,
        threshold: u16,
        interval: Duration,
        now: Instant,
    ) -> Result<Self, HardwareError> {
        let baseline = source.read_u16()?;
        Ok(Self {
            source,
            baseline,
            threshold,
            last_difference: 0,
            triggered: false,
            gate: IntervalGate::new(interval, now),
        })
    }

    /// Sample if the interval elapsed; returns `Ok(true)` when sampled
    pub fn update(&mut self, now: Instant) -> Result<bool, HardwareError> {
        if !self.gate.is_open(now) {
            return Ok(false);
        }
        let sample = self.source.read_u16()?;
        self.gate.mark(now);
        self.last_difference = sample.abs_diff(self.baseline);
        self.triggered = self.last_difference > self.threshold;
        Ok(true)
    }

    /// Re-capture the baseline (e.g. after the room got louder)
    pub fn recalibrate(&mut self) -> Result<(), HardwareError> {
        self.baseline = self.source.read_u16()?;
        self.triggered = false;
        Ok(())
    }

    /// Whether the last sample deviated more than the threshold
    pub const fn is_triggered(&self) -> bool {
        self.triggered
    }

    pub const fn last_difference(&self) -> u16 {
        self.last_difference
    }

    pub const fn baseline(&self) -> u16 {
        self.baseline
    }

    pub fn set_threshold(&mut self, threshold: u16) {
        self.threshold = threshold;
    }
}

impl<S: LevelSource> Update for SoundTrigger<S> {
    fn update(&mut self, now: Instant) -> Result<bool, HardwareError> {
        SoundTrigger::update(self, now)
    }
}
