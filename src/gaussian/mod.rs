mod message;
mod normalization;

pub use message::GaussianMessage;
