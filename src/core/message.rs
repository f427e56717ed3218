use crate::core::error::MessageResult;
use std::fmt::Debug;

/// A trait providing message's methods
pub trait Message: Debug + Clone + Send + Sync + 'static {
    /// Evaluates a distance between messages
    ///
    /// # Arguments
    ///
    /// * `other` - A second message
    ///
    /// # Notes
    ///
    /// This method is used in message passing in order to
    /// define a stopping criterion: when discrepancy is smaller
    /// than some threshold, message passing stops
    fn discrepancy(&self, other: &Self) -> f64;

    /// Multiplies two messages, i.e. combines beliefs of both
    ///
    /// # Arguments
    ///
    /// * `other` - A second message
    fn product(&self, other: &Self) -> MessageResult<Self>;

    /// Divides a message by another one, i.e. removes the belief of `other` from `self`
    ///
    /// # Arguments
    ///
    /// * `other` - A message to be removed
    fn quotient(&self, other: &Self) -> MessageResult<Self>;

    /// Returns a message carrying no information that has the same shape as `self`.
    /// It is the identity element of [`Message::product`].
    fn uninformative_like(&self) -> Self;
}
