//! Polling driver.
//!
//! Replaces the endless `while True: x.update()` loop of a sketch with a
//! loop that has an explicit exit: an iteration budget or a
//! [`CancelToken`]. Each pass calls `update()` once on every member; the
//! members' interval gates absorb however often that happens.
//!
//! # Usage
//!
//! ```ignore
//! let mut led = Led::pwm(pwm_a);
//! let mut servo = Servo::pwm(pwm_b, ServoConfig::default())?;
//! led.blink(Duration::from_millis(300), None, Instant::now())?;
//! servo.oscillate(Bounds::new(30, 150), 3, Duration::from_millis(30), Instant::now())?;
//!
//! let mut poller: Poller<'_, 4> = Poller::new();
//! poller.add(&mut led).ok();
//! poller.add(&mut servo).ok();
//! poller.run_until(Instant::now, &STOP)?;
//! ```

use core::fmt;

use embassy_time::Instant;
use heapless::Vec;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::cancel::CancelToken;
use crate::error::{Error, HardwareError};

/// Anything that advances on a caller-supplied clock without blocking
pub trait Update {
    /// Advance if due; returns `Ok(true)` when something changed
    fn update(&mut self, now: Instant) -> Result<bool, HardwareError>;
}

/// A member failed during a polling pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollError {
    /// Index of the member, in insertion order
    pub member: usize,
    pub error: HardwareError,
}

impl fmt::Display for PollError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "member {}: {}", self.member, self.error)
    }
}

impl core::error::Error for PollError {}

impl From<PollError> for Error {
    fn from(e: PollError) -> Self {
        Self::Hardware(e.error)
    }
}

/// Summary of a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunReport {
    /// Polling passes completed
    pub iterations: u32,
    /// Member updates that applied a step
    pub steps: u32,
}

/// Fixed-capacity set of members polled together
///
/// N is the maximum number of members
pub struct Poller<'a, const N: usize> {
    members: Vec<&'a mut dyn Update, N>,
}

impl<'a, const N: usize> Poller<'a, N> {
    pub const fn new() -> Self {
        Self {
            members: Vec::new(),
        }
    }

    /// Add a member
    ///
    /// Returns the member back if the poller is full
    pub fn add(&mut self, member: &'a mut dyn Update) -> Result<(), &'a mut dyn Update> {
        self.members.push(member)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Update every member once
    ///
    /// Returns how many members applied a step. Stops at the first failure;
    /// the failed member keeps its state and retries on the next pass.
    pub fn tick(&mut self, now: Instant) -> Result<u32, PollError> {
        let mut steps = 0;
        for (member, update) in self.members.iter_mut().enumerate() {
            match update.update(now) {
                Ok(true) => steps += 1,
                Ok(false) => {}
                Err(error) => {
                    #[cfg(feature = "esp32-log")]
                    println!("[Poller.tick] member {} failed: {}", member, error);
                    return Err(PollError { member, error });
                }
            }
        }
        Ok(steps)
    }

    /// Run exactly `iterations` passes
    pub fn run_for<C>(&mut self, mut clock: C, iterations: u32) -> Result<RunReport, PollError>
    where
        C: FnMut() -> Instant,
    {
        let mut report = RunReport::default();
        while report.iterations < iterations {
            report.steps = report.steps.saturating_add(self.tick(clock())?);
            report.iterations += 1;
        }
        Ok(report)
    }

    /// Run passes until `cancel` is set
    ///
    /// The token is checked before every pass, so a token that is already
    /// cancelled runs nothing.
    pub fn run_until<C>(&mut self, mut clock: C, cancel: &CancelToken) -> Result<RunReport, PollError>
    where
        C: FnMut() -> Instant,
    {
        let mut report = RunReport::default();
        while !cancel.is_cancelled() {
            report.steps = report.steps.saturating_add(self.tick(clock())?);
            report.iterations = report.iterations.saturating_add(1);
        }
        Ok(report)
    }
}

impl<const N: usize> Default for Poller<'_, N> {
    fn default() -> Self {
        Self::new()
    }
}
