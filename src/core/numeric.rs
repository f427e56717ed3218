use ndarray::Array1;

use crate::core::error::{MessageError, MessageResult};

/// Computes log(exp(x) + exp(y)) without overflow
#[inline(always)]
pub(crate) fn log_sum_exponents(x: f64, y: f64) -> f64 {
    let max = f64::max(x, y);
    if max.is_infinite() {
        return max;
    }
    if x > y {
        x + f64::ln_1p(f64::exp(y - x))
    } else {
        y + f64::ln_1p(f64::exp(x - y))
    }
}

/// Computes log(sum_i exp(values[i])) in a numerically stable way
///
/// # Arguments
///
/// * `values` - Logarithms of the terms to be summed
///
/// # Notes
///
/// The largest value m is factored out, so that the result is
/// m + log(sum_i exp(values[i] - m)). It never overflows for large inputs
/// and returns -inf only when every input is -inf. If any input is +inf,
/// the result is +inf. An empty input is an error.
///
/// # Example
///
/// ```
/// use gmmsg::core::log_sum_exp;
///
/// let lse = log_sum_exp(&[1000f64, 1000f64]).unwrap();
/// assert!((lse - 1000f64 - f64::ln(2f64)).abs() < 1e-12);
/// ```
pub fn log_sum_exp(values: &[f64]) -> MessageResult<f64> {
    match values {
        [] => Err(MessageError::EmptyInput),
        [x] => Ok(*x),
        [x, y] => Ok(log_sum_exponents(*x, *y)),
        _ => Ok(log_sum_exp_iter(values.iter().copied())),
    }
}

/// Log-sum-exp over a non-empty iterator; returns -inf for an empty one
pub(crate) fn log_sum_exp_iter<I>(values: I) -> f64
where
    I: Iterator<Item = f64> + Clone,
{
    let max = max_value(values.clone());
    if max.is_infinite() {
        return max;
    }
    let sum: f64 = values.map(|x| f64::exp(x - max)).sum();
    max + f64::ln(sum)
}

/// Largest value, -inf for an empty iterator. NaN entries are skipped
#[inline(always)]
pub(crate) fn max_value<I>(values: I) -> f64
where
    I: Iterator<Item = f64>,
{
    values.fold(f64::NEG_INFINITY, f64::max)
}

/// Computes exp(values[i]) / sum_j exp(values[j]) with the same max shift as
/// [`log_sum_exp`], so that common offsets cancel exactly.
///
/// # Notes
///
/// The largest value must be finite, otherwise every entry is NaN
pub(crate) fn normalized_exponents(values: &Array1<f64>) -> Array1<f64> {
    let max = max_value(values.iter().copied());
    debug_assert!(max.is_finite(), "the largest log-weight must be finite");
    let weights = values.mapv(|x| f64::exp(x - max));
    let total = weights.sum();
    weights / total
}
