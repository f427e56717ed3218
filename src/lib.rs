/// A module containing logic shared by all message kinds: errors, the message trait,
/// numeric primitives and reductions over many messages
pub mod core;
/// A module containing a categorical message stored as unnormalized log-probabilities
pub mod discrete;
/// A module containing a one dimensional Gaussian message in natural parameters
pub mod gaussian;

#[cfg(test)]
mod tests;
