//! Order-statistic and mean helpers. All return 0 on empty input.

/// Arithmetic mean.
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Nearest-rank percentile, `p` in `[0, 1]`.
///
/// The rank is `ceil(p * n)` clamped to `[1, n]`.
#[must_use]
pub fn percentile(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len();
    let rank = (p.clamp(0.0, 1.0) * n as f64).ceil() as usize;
    sorted[rank.clamp(1, n) - 1]
}

/// Running mean/min/max accumulator.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinMax {
    count: usize,
    sum: f64,
    min: f64,
    max: f64,
}

impl MinMax {
    /// Add a value.
    pub fn push(&mut self, value: f64) {
        if self.count == 0 {
            self.min = value;
            self.max = value;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);
        }
        self.count += 1;
        self.sum += value;
    }

    /// Number of values seen.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Mean, or 0 when empty.
    #[must_use]
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }

    /// Minimum, or 0 when empty.
    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Maximum, or 0 when empty.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }
}
