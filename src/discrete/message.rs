use std::fmt::Display;

use ndarray::{Array1, Zip};
use rand::{
    distributions::{Distribution, WeightedIndex},
    Rng,
};
use serde::{Deserialize, Serialize};

use crate::core::{
    log_sum_exp_iter, normalized_exponents, Message, MessageError, MessageResult,
};

// ------------------------------------------------------------------------------------------

/// Categorical message over a fixed number of outcomes.
///
/// Stores unnormalized log-probabilities, the probability of the
/// i-th outcome is exp(log_p[i]) / sum_j exp(log_p[j]).
/// Normalization is deferred until probabilities are requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct DiscreteMessage {
    log_p: Array1<f64>,
}

impl TryFrom<Vec<f64>> for DiscreteMessage {
    type Error = MessageError;

    fn try_from(log_p: Vec<f64>) -> MessageResult<Self> {
        Self::new(log_p)
    }
}

impl From<DiscreteMessage> for Vec<f64> {
    fn from(message: DiscreteMessage) -> Self {
        message.log_p.to_vec()
    }
}

impl DiscreteMessage {
    /// Creates a discrete message from unnormalized log-probabilities
    ///
    /// # Arguments
    ///
    /// * `log_p` - Log-probabilities, one per outcome. There must be at least
    ///     one outcome, entries must not be NaN or +inf (-inf marks an impossible outcome)
    ///     and at least one entry must be finite
    ///
    /// # Example
    ///
    /// ```
    /// use gmmsg::discrete::DiscreteMessage;
    ///
    /// let msg = DiscreteMessage::new(vec![0f64, f64::ln(3f64)]).unwrap();
    /// let probs = msg.probabilities();
    /// assert!((probs[0] - 0.25f64).abs() < 1e-12);
    /// assert!((probs[1] - 0.75f64).abs() < 1e-12);
    /// assert!(DiscreteMessage::new(Vec::<f64>::new()).is_err());
    /// ```
    pub fn new(log_p: impl Into<Array1<f64>>) -> MessageResult<Self> {
        let log_p = log_p.into();
        if log_p.is_empty() {
            return Err(MessageError::invalid(
                "n",
                0f64,
                "a discrete message needs at least one outcome",
            ));
        }
        if let Some(bad) = log_p.iter().find(|x| x.is_nan() || **x == f64::INFINITY) {
            return Err(MessageError::invalid(
                "log_p",
                *bad,
                "log-probabilities must be below +inf",
            ));
        }
        if log_p.iter().all(|x| *x == f64::NEG_INFINITY) {
            return Err(MessageError::invalid(
                "log_p",
                f64::NEG_INFINITY,
                "at least one outcome must be possible",
            ));
        }
        Ok(DiscreteMessage { log_p })
    }

    /// Creates a uniform discrete message over n outcomes
    ///
    /// # Arguments
    ///
    /// * `n` - Number of outcomes, must be positive
    pub fn uniform(n: usize) -> MessageResult<Self> {
        if n == 0 {
            return Err(MessageError::invalid(
                "n",
                0f64,
                "a discrete message needs at least one outcome",
            ));
        }
        Ok(DiscreteMessage {
            log_p: Array1::zeros(n),
        })
    }

    /// Creates a discrete message from (possibly unnormalized) probabilities
    ///
    /// # Arguments
    ///
    /// * `p` - Non-negative finite weights, at least one of them positive
    pub fn from_probabilities(p: &[f64]) -> MessageResult<Self> {
        if let Some(bad) = p.iter().find(|x| !x.is_finite() || **x < 0f64) {
            return Err(MessageError::invalid(
                "p",
                *bad,
                "probabilities must be finite and non-negative",
            ));
        }
        if p.iter().all(|x| *x == 0f64) {
            return Err(MessageError::invalid(
                "p",
                0f64,
                "total probability mass must be positive",
            ));
        }
        Self::new(p.iter().map(|x| f64::ln(*x)).collect::<Array1<f64>>())
    }

    /// Returns the number of outcomes
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.log_p.len()
    }

    /// Always false, a discrete message has at least one outcome
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.log_p.is_empty()
    }

    /// Returns unnormalized log-probabilities
    #[inline(always)]
    pub fn log_probabilities(&self) -> &Array1<f64> {
        &self.log_p
    }

    #[inline]
    fn check_dimension(&self, other: &Self) -> MessageResult<()> {
        if self.len() != other.len() {
            return Err(MessageError::mismatch(self.len(), other.len()));
        }
        Ok(())
    }

    /// Multiplies two messages pointwise (log-probabilities are summed).
    /// The result is not renormalized
    ///
    /// # Arguments
    ///
    /// * `other` - A message over the same number of outcomes
    ///
    /// # Notes
    ///
    /// Fails with `InvalidParameter` if a sum overflows to +inf or if
    /// every outcome of the product is impossible
    pub fn multiply(&self, other: &Self) -> MessageResult<Self> {
        self.check_dimension(other)?;
        Self::new(&self.log_p + &other.log_p)
    }

    /// Divides a message by another one pointwise (log-probabilities are subtracted)
    ///
    /// # Arguments
    ///
    /// * `other` - A message over the same number of outcomes
    ///
    /// # Notes
    ///
    /// An outcome impossible in both messages stays impossible (-inf - (-inf) = -inf).
    /// Fails with `InvalidParameter` if an outcome is impossible only in `other`
    /// or if a difference overflows to +inf
    pub fn divide(&self, other: &Self) -> MessageResult<Self> {
        self.check_dimension(other)?;
        let mut log_p = &self.log_p - &other.log_p;
        Zip::from(&mut log_p)
            .and(&self.log_p)
            .and(&other.log_p)
            .for_each(|dst, lhs, rhs| {
                if *lhs == f64::NEG_INFINITY && *rhs == f64::NEG_INFINITY {
                    *dst = f64::NEG_INFINITY;
                }
            });
        Self::new(log_p)
    }

    /// Returns normalized probabilities
    ///
    /// # Notes
    ///
    /// The maximal log-probability is subtracted before exponentiation, so that
    /// shared offsets of any magnitude cancel exactly. Entries are non-negative
    /// and sum up to 1. The maximum is always finite: every message holds at
    /// least one finite entry and none equal to +inf or NaN
    pub fn probabilities(&self) -> Array1<f64> {
        normalized_exponents(&self.log_p)
    }

    /// Returns log of the total unnormalized mass, log(sum_i exp(log_p[i]))
    #[inline]
    pub fn log_normalization(&self) -> f64 {
        log_sum_exp_iter(self.log_p.iter().copied())
    }

    /// Returns an equivalent message whose log-probabilities are normalized,
    /// i.e. exp(log_p) sums up to 1
    pub fn normalized(&self) -> Self {
        let log_norm = self.log_normalization();
        DiscreteMessage {
            log_p: self.log_p.mapv(|x| x - log_norm),
        }
    }

    /// Returns log Z such that p(i) * q(i) = Z * r(i), where p, q and r are
    /// normalized probabilities of `self`, `other` and their product
    ///
    /// # Arguments
    ///
    /// * `other` - A message over the same number of outcomes
    pub fn log_normalization_of_product(&self, other: &Self) -> MessageResult<f64> {
        let product = self.multiply(other)?;
        Ok(product.log_normalization() - self.log_normalization() - other.log_normalization())
    }

    /// Returns log Z such that p(i) / q(i) = Z * r(i), where p, q and r are
    /// normalized probabilities of `self`, `other` and their quotient
    ///
    /// # Arguments
    ///
    /// * `other` - A message over the same number of outcomes
    pub fn log_normalization_of_ratio(&self, other: &Self) -> MessageResult<f64> {
        let quotient = self.divide(other)?;
        Ok(quotient.log_normalization() - self.log_normalization() + other.log_normalization())
    }

    /// Draws an outcome index from normalized probabilities
    ///
    /// # Arguments
    ///
    /// * `rng` - A random numbers generator
    pub fn sample(&self, rng: &mut impl Rng) -> MessageResult<usize> {
        let distr = WeightedIndex::<f64>::new(self.probabilities().iter()).map_err(|_| {
            MessageError::invalid(
                "log_p",
                self.log_normalization(),
                "message has no positive probability mass",
            )
        })?;
        Ok(distr.sample(rng))
    }
}

impl Message for DiscreteMessage {
    /// Maximal absolute difference between normalized probabilities,
    /// +inf for messages over different numbers of outcomes
    #[inline]
    fn discrepancy(&self, other: &Self) -> f64 {
        if self.len() != other.len() {
            return f64::INFINITY;
        }
        let lhs = self.probabilities();
        let rhs = other.probabilities();
        lhs.iter()
            .zip(rhs.iter())
            .fold(0f64, |acc, (x, y)| acc.max((x - y).abs()))
    }

    #[inline(always)]
    fn product(&self, other: &Self) -> MessageResult<Self> {
        self.multiply(other)
    }

    #[inline(always)]
    fn quotient(&self, other: &Self) -> MessageResult<Self> {
        self.divide(other)
    }

    #[inline]
    fn uninformative_like(&self) -> Self {
        DiscreteMessage {
            log_p: Array1::zeros(self.len()),
        }
    }
}

impl Display for DiscreteMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, p) in self.probabilities().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:.4}", p)?;
        }
        write!(f, "]")
    }
}
