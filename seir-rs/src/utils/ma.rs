use crate::prelude::Real;
use getset::CopyGetters;

/// A moving window over the last `window` observations.
///
/// Used for the 7-day incidence of simulated epicurves and for the trailing
/// mean of R₀ estimates.
#[derive(Debug, Clone, PartialEq, CopyGetters)]
pub struct Window {
    #[getset(get_copy = "pub")]
    window: usize,
    offset: usize,
    buffer: Vec<Real>,
}

impl Window {
    pub fn new(n: usize) -> Window {
        if n == 0 {
            panic!("Cannot create empty moving window");
        }
        Window {
            window: n,
            offset: 0,
            buffer: Vec::with_capacity(2 * n - 1),
        }
    }

    /// Add single observation of value x
    pub fn add(&mut self, x: Real) {
        if self.buffer.len() == 2 * self.window - 1 {
            // Keep the last window - 1 values at the front of the buffer.
            self.buffer.drain(..self.offset + 1);
            self.offset = 0;
        } else if self.buffer.len() >= self.window {
            self.offset += 1;
        }
        self.buffer.push(x);
    }

    /// Add all values from an iterator.
    pub fn extend<I: IntoIterator<Item = Real>>(&mut self, xs: I) {
        for x in xs {
            self.add(x);
        }
    }

    /// Values currently inside the window, oldest first.
    pub fn values(&self) -> &[Real] {
        &self.buffer[self.offset..]
    }

    /// Number of values inside the window. Never larger than window().
    pub fn len(&self) -> usize {
        self.values().len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// True once the window has seen at least window() observations.
    pub fn is_full(&self) -> bool {
        self.len() == self.window
    }

    pub fn sum(&self) -> Real {
        self.values().iter().sum()
    }

    /// Mean of the values inside the window, NaN while empty.
    pub fn mean(&self) -> Real {
        self.sum() / self.len() as Real
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn window_simple() {
        let mut w = Window::new(3);
        w.add(10.0);
        assert_eq!(w.mean(), 10.0);
        w.add(5.0);
        assert_eq!(w.mean(), 7.5);
        w.add(3.0);
        assert_eq!(w.mean(), 6.0);
        w.add(1.0);
        assert_eq!(w.mean(), 3.0);
        w.add(2.0);
        assert_eq!(w.mean(), 2.0);
        w.add(3.0);
        assert_eq!(w.mean(), 2.0);
        w.add(4.0);
        assert_eq!(w.mean(), 3.0);
    }

    #[test]
    fn window_sum_tracks_last_values() {
        let mut w = Window::new(7);
        w.extend((1..=10).map(|x| x as Real));
        assert!(w.is_full());
        assert_eq!(w.len(), 7);
        assert_eq!(w.values(), &[4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]);
        assert_eq!(w.sum(), 49.0);
    }

    #[test]
    fn partial_window() {
        let mut w = Window::new(5);
        assert!(w.is_empty());
        assert!(w.mean().is_nan());
        w.extend(vec![2.0, 4.0]);
        assert!(!w.is_full());
        assert_eq!(w.mean(), 3.0);
    }

    #[test]
    #[should_panic]
    fn empty_window_is_rejected() {
        Window::new(0);
    }
}
