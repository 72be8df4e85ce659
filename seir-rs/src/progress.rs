//! Progress reporting for long running computations.
//!
//! Solvers and simulations report progress as an integer percentage to any
//! type implementing Progress. The unit type is the null sink.
use log::{debug, info};

pub type DynProgress = Box<dyn Progress>;

/// Receives progress values between 0 and 100.
pub trait Progress {
    /// Report a new value with a message and a visibility flag. Invisible
    /// reports are used to hide progress indicators once a task is done.
    fn report_with(&mut self, value: u32, message: &str, visible: bool);

    /// Report a new visible value without message.
    fn report(&mut self, value: u32) {
        self.report_with(value, "", true);
    }
}

/////////////////////////////////////////////////////////////////////////////
// Progress instances
/////////////////////////////////////////////////////////////////////////////

impl Progress for () {
    fn report_with(&mut self, _: u32, _: &str, _: bool) {}
}

/// Record all reported values.
impl Progress for Vec<u32> {
    fn report_with(&mut self, value: u32, _: &str, _: bool) {
        self.push(value);
    }
}

impl<P1, P2> Progress for (P1, P2)
where
    P1: Progress,
    P2: Progress,
{
    fn report_with(&mut self, value: u32, message: &str, visible: bool) {
        self.0.report_with(value, message, visible);
        self.1.report_with(value, message, visible);
    }
}

impl<P: Progress + ?Sized> Progress for Box<P> {
    fn report_with(&mut self, value: u32, message: &str, visible: bool) {
        (**self).report_with(value, message, visible)
    }
}

impl<P: Progress + ?Sized> Progress for &mut P {
    fn report_with(&mut self, value: u32, message: &str, visible: bool) {
        (**self).report_with(value, message, visible)
    }
}

/////////////////////////////////////////////////////////////////////////////
// Wrappers
/////////////////////////////////////////////////////////////////////////////

/// Adapt a closure into a Progress sink.
pub struct FnProgress<F>(pub F);

impl<F> Progress for FnProgress<F>
where
    F: FnMut(u32, &str, bool),
{
    fn report_with(&mut self, value: u32, message: &str, visible: bool) {
        (&mut self.0)(value, message, visible)
    }
}

/// Map the 0..=100 range of a sub-task into `base..=base + range` of the
/// enclosing task.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledProgress<P> {
    base: u32,
    range: u32,
    inner: P,
}

impl<P: Progress> ScaledProgress<P> {
    pub fn new(base: u32, range: u32, inner: P) -> Self {
        ScaledProgress { base, range, inner }
    }

    pub fn scale(&self, value: u32) -> u32 {
        self.base + self.range * value / 100
    }

    pub fn into_inner(self) -> P {
        self.inner
    }
}

impl<P: Progress> Progress for ScaledProgress<P> {
    fn report_with(&mut self, value: u32, message: &str, visible: bool) {
        let value = self.scale(value);
        self.inner.report_with(value, message, visible);
    }
}

/// Write progress to the log.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogProgress {
    label: String,
}

impl LogProgress {
    pub fn new(label: impl Into<String>) -> Self {
        LogProgress {
            label: label.into(),
        }
    }
}

impl Progress for LogProgress {
    fn report_with(&mut self, value: u32, message: &str, visible: bool) {
        match (visible, message.is_empty()) {
            (true, true) => info!("{}: {}%", self.label, value),
            (true, false) => info!("{}: {}% {}", self.label, value, message),
            (false, _) => debug!("{}: {}% (hidden) {}", self.label, value, message),
        }
    }
}

/// Convert a count of finished items into 4% steps and tell when the step
/// changes. Nothing is reported before the first step above 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ProgressCounter {
    total: usize,
    last: u32,
}

impl ProgressCounter {
    pub fn new(total: usize) -> Self {
        ProgressCounter { total, last: 0 }
    }

    /// Register that `done` items are finished. Return the new percentage if
    /// it differs from the last reported one.
    pub fn tick(&mut self, done: usize) -> Option<u32> {
        if self.total == 0 {
            return None;
        }
        let value = 4 * (25 * done.min(self.total) / self.total) as u32;
        if self.last == value {
            return None;
        }
        self.last = value;
        Some(value)
    }
}
