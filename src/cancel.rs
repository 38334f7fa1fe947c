//! Cancellation flag for the polling loop.
//!
//! Safe to share between an interrupt handler, another task and the loop
//! itself via `critical-section`, so it can live in a `static`.

use core::cell::Cell;

use critical_section::Mutex;

pub struct CancelToken {
    cancelled: Mutex<Cell<bool>>,
}

impl CancelToken {
    pub const fn new() -> Self {
        Self {
            cancelled: Mutex::new(Cell::new(false)),
        }
    }

    /// Ask the loop to exit before its next pass
    pub fn cancel(&self) {
        critical_section::with(|cs| self.cancelled.borrow(cs).set(true));
    }

    pub fn is_cancelled(&self) -> bool {
        critical_section::with(|cs| self.cancelled.borrow(cs).get())
    }

    /// Clear the flag so the token can drive another run
    pub fn reset(&self) {
        critical_section::with(|cs| self.cancelled.borrow(cs).set(false));
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}
