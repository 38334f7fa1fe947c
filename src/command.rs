//! Commands fed into the polling loop from another context.
//!
//! A bridge task (socket listener, gesture receiver) or an interrupt handler
//! pushes [`Command`]s; the loop drains them into an actuator between
//! passes. The queue is bounded and guarded by `critical-section`, so it can
//! live in a `static`.

use core::cell::RefCell;

use critical_section::Mutex;
use embassy_time::{Duration, Instant};
use heapless::Deque;

use crate::OutputDriver;
use crate::actuator::Actuator;
use crate::error::Error;
use crate::level::Level;
use crate::plan::Plan;

/// Request to change an actuator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<T> {
    /// Apply a value immediately
    Set(T),
    /// Step from the current value toward `target`
    Sweep {
        target: T,
        step: u16,
        interval: Duration,
    },
    /// Stop any trajectory, holding the current value
    Stop,
}

impl<T: Level> Command<T> {
    /// Execute the command against an actuator
    pub fn execute<O>(self, actuator: &mut Actuator<O, T>, now: Instant) -> Result<(), Error>
    where
        O: OutputDriver<T>,
    {
        match self {
            Self::Set(value) => actuator.set_immediate(value)?,
            Self::Sweep {
                target,
                step,
                interval,
            } => {
                let plan = Plan::sweep(actuator.current(), target, step, interval);
                actuator.configure(&plan, now)?;
            }
            Self::Stop => actuator.stop(),
        }
        Ok(())
    }
}

/// Bounded, interrupt-safe command queue
///
/// N is the number of commands that can be pending
pub struct CommandQueue<T, const N: usize> {
    pending: Mutex<RefCell<Deque<Command<T>, N>>>,
}

impl<T, const N: usize> CommandQueue<T, N> {
    pub const fn new() -> Self {
        Self {
            pending: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Queue a command
    ///
    /// Returns the command if the queue is full
    pub fn push(&self, command: Command<T>) -> Result<(), Command<T>> {
        critical_section::with(|cs| self.pending.borrow(cs).borrow_mut().push_back(command))
    }

    /// Take the oldest pending command
    pub fn pop(&self) -> Option<Command<T>> {
        critical_section::with(|cs| self.pending.borrow(cs).borrow_mut().pop_front())
    }

    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.pending.borrow(cs).borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Level, const N: usize> CommandQueue<T, N> {
    /// Execute every pending command in order
    ///
    /// Returns how many ran. Stops at the first failing command; it is
    /// dropped and later commands stay queued.
    pub fn drain_into<O>(&self, actuator: &mut Actuator<O, T>, now: Instant) -> Result<usize, Error>
    where
        O: OutputDriver<T>,
    {
        let mut executed = 0;
        while let Some(command) = self.pop() {
            command.execute(actuator, now)?;
            executed += 1;
        }
        Ok(executed)
    }
}

impl<T, const N: usize> Default for CommandQueue<T, N> {
    fn default() -> Self {
        Self::new()
    }
}
