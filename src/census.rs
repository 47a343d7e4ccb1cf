//! Count of patients still anywhere in the hospital, with completion signal.

use std::sync::{Condvar, Mutex};

/// Mutex-guarded count of patients that have not yet departed.
///
/// The population is fixed at construction; the only mutation is `depart`,
/// called exactly once per patient. Waiters on `wait_until_empty` are woken
/// when the count reaches zero.
pub struct PatientCensus {
    remaining: Mutex<usize>,
    empty: Condvar,
}

impl PatientCensus {
    /// Create a census for `patients` admitted patients.
    pub fn new(patients: usize) -> Self {
        Self {
            remaining: Mutex::new(patients),
            empty: Condvar::new(),
        }
    }

    /// Record one departure. Calling this more often than the admitted
    /// population is a caller bug: debug builds assert, release builds log
    /// and keep the count at zero rather than underflow.
    pub fn depart(&self) {
        let mut remaining = self.remaining.lock().expect("census mutex poisoned");
        if *remaining == 0 {
            if !cfg!(debug_assertions) {
                eprintln!("[CENSUS] departure recorded for an empty hospital");
            }
            debug_assert!(false, "departure recorded for an empty hospital");
            return;
        }
        *remaining -= 1;
        if *remaining == 0 {
            self.empty.notify_all();
        }
    }

    /// Whether every patient has departed. Reads the settled count under the
    /// mutex, never a torn value.
    pub fn is_empty(&self) -> bool {
        let remaining = self.remaining.lock().expect("census mutex poisoned");
        *remaining == 0
    }

    /// Block until the hospital is empty.
    pub fn wait_until_empty(&self) {
        let mut remaining = self.remaining.lock().expect("census mutex poisoned");
        while *remaining > 0 {
            remaining = self.empty.wait(remaining).expect("condvar wait failed");
        }
    }

    /// Number of patients still in the hospital.
    pub fn remaining(&self) -> usize {
        let remaining = self.remaining.lock().expect("census mutex poisoned");
        *remaining
    }
}
