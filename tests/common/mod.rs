//! Mock hardware for integration tests.
//!
//! Every mock shares its log through an `Rc`, so a test can keep a handle
//! after the mock was moved into an adapter.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, InputPin, OutputPin};
use embedded_hal::pwm::{self, SetDutyCycle};
use pico_actuators::{HardwareError, Instant, OutputDriver};

pub fn at(ms: u64) -> Instant {
    Instant::from_millis(ms)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

impl pwm::Error for MockError {
    fn kind(&self) -> pwm::ErrorKind {
        pwm::ErrorKind::Other
    }
}

impl digital::Error for MockError {
    fn kind(&self) -> digital::ErrorKind {
        digital::ErrorKind::Other
    }
}

// ── PWM channel ───────────────────────────────────────────────

/// PWM channel recording every duty written
#[derive(Clone)]
pub struct MockPwm {
    max_duty: u16,
    pub duties: Rc<RefCell<Vec<u16>>>,
    pub fail: Rc<Cell<bool>>,
}

impl MockPwm {
    pub fn new(max_duty: u16) -> Self {
        Self {
            max_duty,
            duties: Rc::default(),
            fail: Rc::default(),
        }
    }

    pub fn last(&self) -> Option<u16> {
        self.duties.borrow().last().copied()
    }

    pub fn writes(&self) -> usize {
        self.duties.borrow().len()
    }
}

impl pwm::ErrorType for MockPwm {
    type Error = MockError;
}

impl SetDutyCycle for MockPwm {
    fn max_duty_cycle(&self) -> u16 {
        self.max_duty
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        if self.fail.get() {
            return Err(MockError);
        }
        self.duties.borrow_mut().push(duty);
        Ok(())
    }
}

// ── Digital pin ───────────────────────────────────────────────

/// Pin recording every output level and replaying scripted input levels
#[derive(Clone, Default)]
pub struct MockPin {
    pub levels: Rc<RefCell<Vec<bool>>>,
    /// Input levels returned in order; `idle` is returned once exhausted
    pub script: Rc<RefCell<VecDeque<bool>>>,
    pub idle: Rc<Cell<bool>>,
    pub fail: Rc<Cell<bool>>,
}

impl MockPin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<bool> {
        self.levels.borrow().last().copied()
    }

    pub fn set_input(&self, high: bool) {
        self.idle.set(high);
    }

    pub fn push_input(&self, high: bool, count: usize) {
        let mut script = self.script.borrow_mut();
        for _ in 0..count {
            script.push_back(high);
        }
    }
}

impl digital::ErrorType for MockPin {
    type Error = MockError;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        if self.fail.get() {
            return Err(MockError);
        }
        self.levels.borrow_mut().push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        if self.fail.get() {
            return Err(MockError);
        }
        self.levels.borrow_mut().push(true);
        Ok(())
    }
}

impl InputPin for MockPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        if self.fail.get() {
            return Err(MockError);
        }
        Ok(self
            .script
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| self.idle.get()))
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

// ── Delay ─────────────────────────────────────────────────────

/// Delay that returns immediately and sums the requested time
#[derive(Clone, Default)]
pub struct MockDelay {
    pub total_ns: Rc<Cell<u64>>,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns.set(self.total_ns.get() + u64::from(ns));
    }
}

// ── Generic output ────────────────────────────────────────────

/// Output driver recording applied values, with an optional range limit
#[derive(Clone)]
pub struct Recorder<T> {
    pub applied: Rc<RefCell<Vec<T>>>,
    pub fail: Rc<Cell<bool>>,
    limiter: fn(T) -> T,
}

impl<T> Recorder<T> {
    pub fn new() -> Self {
        Self {
            applied: Rc::new(RefCell::new(Vec::new())),
            fail: Rc::default(),
            limiter: |value| value,
        }
    }

    pub fn with_limit(limiter: fn(T) -> T) -> Self {
        Self {
            limiter,
            ..Self::new()
        }
    }
}

impl<T: Copy> Recorder<T> {
    pub fn values(&self) -> Vec<T> {
        self.applied.borrow().clone()
    }

    pub fn count(&self) -> usize {
        self.applied.borrow().len()
    }

    pub fn clear(&self) {
        self.applied.borrow_mut().clear();
    }
}

impl<T: Copy> OutputDriver<T> for Recorder<T> {
    fn apply(&mut self, value: T) -> Result<(), HardwareError> {
        if self.fail.get() {
            return Err(HardwareError::PwmWrite);
        }
        self.applied.borrow_mut().push(value);
        Ok(())
    }

    fn limit(&self, value: T) -> T {
        (self.limiter)(value)
    }
}
