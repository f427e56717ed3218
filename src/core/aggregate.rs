use rayon::prelude::{IntoParallelRefIterator, ParallelIterator};

use crate::core::{
    error::{MessageError, MessageResult},
    message::Message,
};

// ------------------------------------------------------------------------------------------

/// Multiplies all messages together (e.g. computes a marginal of a variable
/// from messages received from adjoint factors)
///
/// # Arguments
///
/// * `messages` - Messages to be multiplied
///
/// # Example
///
/// ```
/// use gmmsg::core::product_all;
/// use gmmsg::gaussian::GaussianMessage;
///
/// let messages = vec![
///     GaussianMessage::new(1f64, 1f64).unwrap(),
///     GaussianMessage::new(2f64, 3f64).unwrap(),
/// ];
/// let marginal = product_all(&messages).unwrap();
/// assert_eq!(marginal.tau(), 3f64);
/// assert_eq!(marginal.rho(), 4f64);
/// ```
pub fn product_all<M: Message>(messages: &[M]) -> MessageResult<M> {
    let (first, rest) = messages.split_first().ok_or(MessageError::EmptyInput)?;
    tracing::trace!(count = messages.len(), "multiplying messages");
    rest.iter()
        .try_fold(first.clone(), |acc, message| acc.product(message))
}

/// Multiplies all messages together in parallel
///
/// # Arguments
///
/// * `messages` - Messages to be multiplied
///
/// # Notes
///
/// The order of multiplications is not fixed, therefore the result
/// matches [`product_all`] only up to floating point rounding
pub fn par_product_all<M: Message>(messages: &[M]) -> MessageResult<M> {
    let identity = messages
        .first()
        .ok_or(MessageError::EmptyInput)?
        .uninformative_like();
    tracing::trace!(count = messages.len(), "multiplying messages in parallel");
    messages
        .par_iter()
        .try_fold(|| identity.clone(), |acc, message| acc.product(message))
        .try_reduce(|| identity.clone(), |x, y| x.product(&y))
}

/// For each message computes the product of all other messages,
/// i.e. a message that a variable sends back to each of its factors
///
/// # Arguments
///
/// * `messages` - Messages received from adjoint factors
///
/// # Notes
///
/// dst[0] is a product of all messages except messages[0],
/// dst[1] is a product of all messages except messages[1],
/// etc. It is evaluated as a quotient of the total product by each
/// message. An outcome ruled out (-inf) by messages[i] itself stays ruled out
/// in dst[i], since the total product no longer holds the other messages' values there
pub fn cavities<M: Message>(messages: &[M]) -> MessageResult<Vec<M>> {
    let total = product_all(messages)?;
    messages
        .iter()
        .map(|message| total.quotient(message))
        .collect()
}

/// Parallel version of [`cavities`]
pub fn par_cavities<M: Message>(messages: &[M]) -> MessageResult<Vec<M>> {
    let total = par_product_all(messages)?;
    messages
        .par_iter()
        .map(|message| total.quotient(message))
        .collect()
}

/// Evaluates the maximal discrepancy between old and new messages
///
/// # Arguments
///
/// * `old` - Messages from the previous iteration
/// * `new` - Messages from the current iteration
pub fn max_discrepancy<M: Message>(old: &[M], new: &[M]) -> MessageResult<f64> {
    if old.len() != new.len() {
        return Err(MessageError::mismatch(old.len(), new.len()));
    }
    let mut max_discrepancy = 0f64;
    for (old_msg, new_msg) in old.iter().zip(new) {
        let discrepancy = new_msg.discrepancy(old_msg);
        if max_discrepancy < discrepancy {
            max_discrepancy = discrepancy;
        }
    }
    Ok(max_discrepancy)
}
