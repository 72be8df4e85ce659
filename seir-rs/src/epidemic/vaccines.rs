use std::collections::VecDeque;
use std::iter;

use crate::prelude::{Real, Time};

/// Ledger of cumulative vaccinated counts for the last `delay + 1` days.
///
/// The back of the queue holds the count registered for the current day and
/// the front holds the count registered `delay` days ago, which is the one
/// that protects individuals in the next day. Days without a registered count
/// repeat the previous one. Days before the start of the simulation count as
/// zero vaccinated.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtectionQueue {
    values: VecDeque<Real>,
}

impl ProtectionQueue {
    pub fn new(delay: Time, initial: Real) -> Self {
        let values = iter::repeat(0.0).take(delay as usize).chain(iter::once(initial)).collect();
        ProtectionQueue { values }
    }

    /// Protection delay in days.
    pub fn delay(&self) -> Time {
        (self.values.len() - 1) as Time
    }

    /// Count registered for the current day.
    pub fn latest(&self) -> Real {
        self.values.back().copied().unwrap_or(0.0)
    }

    /// Count that already reached protection.
    pub fn protected(&self) -> Real {
        self.values.front().copied().unwrap_or(0.0)
    }

    /// Register the count for the current day, replacing any previous value
    /// of the same day.
    pub fn record(&mut self, value: Real) {
        match self.values.back_mut() {
            Some(last) => *last = value,
            None => self.values.push_back(value),
        }
    }

    /// Move to the next day, carrying the current count forward.
    pub fn roll(&mut self) {
        let last = self.latest();
        self.values.push_back(last);
        self.values.pop_front();
    }

    pub fn iter(&self) -> impl Iterator<Item = Real> + '_ {
        self.values.iter().copied()
    }
}
