use anyhow::{bail, Result};

/// A least-squares straight line fitted to an evenly spaced series.
///
/// Observations are indexed 0, 1, 2, ... so the slope is the average change
/// per step and the intercept is the fitted value at the first observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearTrend {
    slope: f64,
    intercept: f64,
}

impl LinearTrend {
    /// Fits a line through the given values by ordinary least squares.
    ///
    /// # Arguments
    ///
    /// * `values`: the observed series, one value per step.
    ///
    /// returns: the fitted trend, or an error when fewer than two values are
    /// given.
    ///
    /// # Examples
    ///
    /// ```
    /// use calc_studio::forecast::LinearTrend;
    /// # use anyhow::Result;
    ///
    /// # fn main() -> Result<()> {
    /// let trend = LinearTrend::fit(&[1.0, 3.0, 5.0, 7.0])?;
    ///
    /// assert_eq!(trend.slope(), 2.0);
    /// assert_eq!(trend.intercept(), 1.0);
    /// assert_eq!(trend.predict(4.0), 9.0);
    /// # Ok::<(), anyhow::Error>(()) }
    /// ```
    pub fn fit(values: &[f64]) -> Result<LinearTrend> {
        let count = values.len();
        if count < 2 {
            bail!("a trend needs at least two observations, got {}", count);
        }

        let n = count as f64;
        let mean_x = (n - 1.0) / 2.0;
        let mean_y = values.iter().sum::<f64>() / n;

        let mut covariance = 0.0;
        let mut variance = 0.0;
        for (index, value) in values.iter().enumerate() {
            let dx = index as f64 - mean_x;
            covariance += dx * (value - mean_y);
            variance += dx * dx;
        }

        let slope = covariance / variance;
        Ok(LinearTrend {
            slope,
            intercept: mean_y - slope * mean_x,
        })
    }

    pub fn slope(&self) -> f64 {
        self.slope
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// The fitted value at position `x`.
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }

    /// Predictions for `steps` consecutive positions starting at `from`.
    /// Positions past `usize::MAX` are cut off rather than wrapped.
    pub fn forecast(&self, from: usize, steps: usize) -> Vec<(f64, f64)> {
        (from..from.saturating_add(steps))
            .map(|index| {
                let x = index as f64;
                (x, self.predict(x))
            })
            .collect()
    }
}
