mod message;

pub use message::DiscreteMessage;
