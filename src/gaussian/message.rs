use std::{
    fmt::Display,
    ops::{Div, Mul},
};

use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::core::{Message, MessageError, MessageResult};

// ------------------------------------------------------------------------------------------

/// Gaussian message in natural parameters.
///
/// `tau` is a precision adjusted mean (mean * precision),
/// `rho` is a precision (1 / variance). `rho == 0` is a valid
/// message that carries no information (infinite variance).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGaussianMessage")]
pub struct GaussianMessage {
    tau: f64,
    rho: f64,
}

#[derive(Deserialize)]
struct RawGaussianMessage {
    tau: f64,
    rho: f64,
}

impl TryFrom<RawGaussianMessage> for GaussianMessage {
    type Error = MessageError;

    // Quotients may legitimately carry a negative precision,
    // so only non-finite values are rejected here
    fn try_from(raw: RawGaussianMessage) -> MessageResult<Self> {
        if !raw.tau.is_finite() {
            return Err(MessageError::invalid("tau", raw.tau, "must be finite"));
        }
        if !raw.rho.is_finite() {
            return Err(MessageError::invalid("rho", raw.rho, "must be finite"));
        }
        Ok(GaussianMessage {
            tau: raw.tau,
            rho: raw.rho,
        })
    }
}

impl GaussianMessage {
    /// Creates a Gaussian message from natural parameters
    ///
    /// # Arguments
    ///
    /// * `tau` - A precision adjusted mean, must be finite
    /// * `rho` - A precision, must be non-negative and finite
    ///
    /// # Example
    ///
    /// ```
    /// use gmmsg::gaussian::GaussianMessage;
    ///
    /// let msg = GaussianMessage::new(2f64, 4f64).unwrap();
    /// assert_eq!(msg.mean(), 0.5f64);
    /// assert_eq!(msg.variance(), 0.25f64);
    /// assert!(GaussianMessage::new(0f64, -1f64).is_err());
    /// ```
    pub fn new(tau: f64, rho: f64) -> MessageResult<Self> {
        if !tau.is_finite() {
            return Err(MessageError::invalid("tau", tau, "must be finite"));
        }
        if rho.is_nan() || rho < 0f64 {
            return Err(MessageError::invalid("rho", rho, "precision must be non-negative"));
        }
        if rho.is_infinite() {
            return Err(MessageError::invalid("rho", rho, "a point mass has infinite precision"));
        }
        Ok(GaussianMessage { tau, rho })
    }

    /// Creates a Gaussian message from the regular Gaussian parameters
    ///
    /// # Arguments
    ///
    /// * `mean` - A finite mean value
    /// * `variance` - A variance, must be positive. A zero variance would
    ///     require an infinite precision and is rejected, +inf gives an
    ///     uninformative message
    ///
    /// # Example
    ///
    /// ```
    /// use gmmsg::gaussian::GaussianMessage;
    ///
    /// let msg = GaussianMessage::from_mean_variance(1f64, 0.5f64).unwrap();
    /// assert_eq!(msg.tau(), 2f64);
    /// assert_eq!(msg.rho(), 2f64);
    /// ```
    pub fn from_mean_variance(mean: f64, variance: f64) -> MessageResult<Self> {
        if !mean.is_finite() {
            return Err(MessageError::invalid("mean", mean, "must be finite"));
        }
        if variance.is_nan() || variance < 0f64 {
            return Err(MessageError::invalid(
                "variance",
                variance,
                "variance must be non-negative",
            ));
        }
        if variance == 0f64 {
            return Err(MessageError::invalid(
                "variance",
                variance,
                "a point mass has infinite precision",
            ));
        }
        // A subnormal variance still overflows the precision, new rejects it
        let rho = 1f64 / variance;
        Self::new(mean * rho, rho)
    }

    /// Creates a message carrying no information (tau = rho = 0)
    #[inline]
    pub fn uninformative() -> Self {
        GaussianMessage {
            tau: 0f64,
            rho: 0f64,
        }
    }

    /// Returns the precision adjusted mean
    #[inline(always)]
    pub fn tau(&self) -> f64 {
        self.tau
    }

    /// Returns the precision
    #[inline(always)]
    pub fn rho(&self) -> f64 {
        self.rho
    }

    /// Returns true if the message is a normalizable density (rho > 0)
    #[inline(always)]
    pub fn is_proper(&self) -> bool {
        self.rho > 0f64
    }

    /// Returns the mean, tau / rho. It is not finite when rho == 0
    #[inline(always)]
    pub fn mean(&self) -> f64 {
        self.tau / self.rho
    }

    /// Returns the variance, 1 / rho. It is +inf when rho == 0
    #[inline(always)]
    pub fn variance(&self) -> f64 {
        1f64 / self.rho
    }

    /// Returns the standard deviation
    #[inline(always)]
    pub fn std_dev(&self) -> f64 {
        f64::sqrt(self.variance())
    }

    /// Returns the regular Gaussian parameters (mean, variance)
    #[inline]
    pub fn mean_variance(&self) -> (f64, f64) {
        let variance = self.variance();
        (self.tau * variance, variance)
    }

    /// Evaluates a distance between messages: max(|Δtau|, sqrt(|Δrho|))
    ///
    /// # Arguments
    ///
    /// * `other` - A second message
    ///
    /// # Example
    ///
    /// ```
    /// use gmmsg::gaussian::GaussianMessage;
    ///
    /// let msg = GaussianMessage::new(0f64, 1f64).unwrap();
    /// let squared = msg.multiply(&msg);
    /// assert_eq!(msg.absolute_difference(&squared), 1f64);
    /// ```
    #[inline]
    pub fn absolute_difference(&self, other: &Self) -> f64 {
        f64::max(
            (self.tau - other.tau).abs(),
            f64::sqrt((self.rho - other.rho).abs()),
        )
    }

    /// Includes the belief of the other message into this one
    #[inline]
    pub fn multiply(&self, other: &Self) -> Self {
        GaussianMessage {
            tau: self.tau + other.tau,
            rho: self.rho + other.rho,
        }
    }

    /// Removes the belief of the other message from this one.
    ///
    /// # Notes
    ///
    /// The result is not validated: when `other` is more precise than `self`
    /// the quotient carries a negative precision, which is a common
    /// intermediate value in expectation propagation. Use
    /// [`GaussianMessage::is_proper`] to detect it
    #[inline]
    pub fn divide(&self, other: &Self) -> Self {
        let rho = self.rho - other.rho;
        if rho < 0f64 {
            tracing::trace!(rho, "quotient carries a negative precision");
        }
        GaussianMessage {
            tau: self.tau - other.tau,
            rho,
        }
    }

    /// Evaluates log of the normalized density at a point
    ///
    /// # Arguments
    ///
    /// * `x` - A point
    pub fn log_density(&self, x: f64) -> MessageResult<f64> {
        if !self.is_proper() {
            return Err(MessageError::invalid(
                "rho",
                self.rho,
                "an improper message has no density",
            ));
        }
        Ok(self.tau * x - 0.5f64 * self.rho * x * x - self.log_partition())
    }

    /// Draws a sample from the normalized density
    ///
    /// # Arguments
    ///
    /// * `rng` - A random numbers generator
    pub fn sample(&self, rng: &mut impl Rng) -> MessageResult<f64> {
        if !self.is_proper() {
            return Err(MessageError::invalid(
                "rho",
                self.rho,
                "an improper message cannot be sampled",
            ));
        }
        let distr = Normal::new(self.mean(), self.std_dev())
            .map_err(|_| MessageError::invalid("rho", self.rho, "not a valid normal distribution"))?;
        Ok(distr.sample(rng))
    }
}

impl Default for GaussianMessage {
    fn default() -> Self {
        Self::uninformative()
    }
}

impl Mul for GaussianMessage {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl Div for GaussianMessage {
    type Output = Self;

    #[inline]
    fn div(self, rhs: Self) -> Self {
        self.divide(&rhs)
    }
}

impl Message for GaussianMessage {
    #[inline(always)]
    fn discrepancy(&self, other: &Self) -> f64 {
        self.absolute_difference(other)
    }

    #[inline(always)]
    fn product(&self, other: &Self) -> MessageResult<Self> {
        Ok(self.multiply(other))
    }

    #[inline(always)]
    fn quotient(&self, other: &Self) -> MessageResult<Self> {
        Ok(self.divide(other))
    }

    #[inline(always)]
    fn uninformative_like(&self) -> Self {
        Self::uninformative()
    }
}

impl Display for GaussianMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.rho == 0f64 {
            write!(f, "μ = 0, σ = Inf")
        } else {
            write!(f, "μ = {}, σ = {}", self.mean(), self.std_dev())
        }
    }
}
