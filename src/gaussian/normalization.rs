use std::f64::consts::PI;

use super::message::GaussianMessage;

impl GaussianMessage {
    /// Returns the log-partition function
    /// A = log ∫ exp(tau * x - rho * x^2 / 2) dx = log(2π / rho) / 2 + tau^2 / (2 rho).
    ///
    /// A message with rho <= 0 is not normalizable, its log-partition is taken to be 0,
    /// i.e. such a message contributes neither a log-determinant nor a quadratic term
    #[inline]
    pub fn log_partition(&self) -> f64 {
        if self.is_proper() {
            0.5f64 * (f64::ln(2f64 * PI) - f64::ln(self.rho()))
                + 0.5f64 * self.tau() * self.tau() / self.rho()
        } else {
            0f64
        }
    }

    /// Returns log Z such that density(self) * density(other) = Z * density(self * other)
    ///
    /// # Arguments
    ///
    /// * `other` - A second factor
    ///
    /// # Notes
    ///
    /// For proper messages it equals the log-likelihood of one mean under the other one
    /// with the summed variance: -log(2π (var_a + var_b)) / 2 - (mean_a - mean_b)^2 / (2 (var_a + var_b)).
    /// It is 0 when both messages are improper.
    ///
    /// # Example
    ///
    /// ```
    /// use gmmsg::gaussian::GaussianMessage;
    ///
    /// let a = GaussianMessage::from_mean_variance(1f64, 1f64).unwrap();
    /// let b = GaussianMessage::from_mean_variance(3f64, 1f64).unwrap();
    /// let expected = -0.5f64 * f64::ln(4f64 * std::f64::consts::PI) - 1f64;
    /// assert!((a.log_normalization_of_product(&b) - expected).abs() < 1e-12);
    /// ```
    pub fn log_normalization_of_product(&self, other: &Self) -> f64 {
        self.multiply(other).log_partition() - self.log_partition() - other.log_partition()
    }

    /// Returns log Z such that density(self) / density(other) = Z * density(self / other)
    ///
    /// # Arguments
    ///
    /// * `other` - A divisor
    ///
    /// # Notes
    ///
    /// The divisor enters with the opposite sign compared to
    /// [`GaussianMessage::log_normalization_of_product`], so that for proper messages
    /// `(a * b).log_normalization_of_ratio(b) == -a.log_normalization_of_product(b)`.
    /// It is 0 when both messages are improper.
    pub fn log_normalization_of_ratio(&self, other: &Self) -> f64 {
        self.divide(other).log_partition() - self.log_partition() + other.log_partition()
    }
}
