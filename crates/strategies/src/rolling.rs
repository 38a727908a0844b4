// In crates/strategies/src/rolling.rs

use crate::error::{Error, Result};
use std::collections::VecDeque;

/// A trailing simple moving average over the last `window` observations.
///
/// The mean is undefined (`None`) until `window` consecutive valid observations
/// have been seen. A missing observation (`NaN`) empties the window, so any
/// window that overlaps a gap is undefined as well.
#[derive(Debug, Clone)]
pub struct RollingMean {
    window: usize,
    values: VecDeque<f64>,
    sum: f64,
    // Kahan compensation term for `sum`.
    compensation: f64,
    // Length of the run of identical values ending at the newest observation.
    same_run: usize,
}

impl RollingMean {
    pub fn new(window: usize) -> Result<Self> {
        if window == 0 {
            return Err(Error::InvalidWindow(window));
        }

        Ok(Self {
            window,
            values: VecDeque::with_capacity(window),
            sum: 0.0,
            compensation: 0.0,
            same_run: 0,
        })
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Feeds the next observation and returns the trailing mean ending at it.
    pub fn next(&mut self, value: f64) -> Option<f64> {
        if value.is_nan() {
            self.reset();
            return None;
        }

        if self.values.len() == self.window {
            if let Some(oldest) = self.values.pop_front() {
                self.accumulate(-oldest);
            }
        }

        self.same_run = match self.values.back() {
            Some(last) if *last == value => self.same_run + 1,
            _ => 1,
        };
        self.values.push_back(value);
        self.accumulate(value);

        // inf - inf leaves the running sum at NaN; rebuild it from the window.
        if self.sum.is_nan() {
            self.resum();
        }

        if self.values.len() < self.window {
            return None;
        }

        // A flat window returns its value exactly.
        if self.same_run >= self.window {
            return Some(value);
        }

        Some(self.sum / self.window as f64)
    }

    pub fn reset(&mut self) {
        self.values.clear();
        self.sum = 0.0;
        self.compensation = 0.0;
        self.same_run = 0;
    }

    fn accumulate(&mut self, value: f64) {
        let adjusted = value - self.compensation;
        let total = self.sum + adjusted;
        self.compensation = if total.is_finite() {
            (total - self.sum) - adjusted
        } else {
            0.0
        };
        self.sum = total;
    }

    fn resum(&mut self) {
        self.sum = 0.0;
        self.compensation = 0.0;
        let values: Vec<f64> = self.values.iter().copied().collect();
        for value in values {
            self.accumulate(value);
        }
    }
}

/// Computes the trailing mean for every position of `closes` in one pass.
///
/// The result has the same length as the input. Position `i` is `Some` only
/// when `closes[i - window + 1..=i]` are all valid observations.
pub fn trailing_means(closes: &[f64], window: usize) -> Result<Vec<Option<f64>>> {
    let mut rolling = RollingMean::new(window)?;
    Ok(closes.iter().map(|close| rolling.next(*close)).collect())
}
