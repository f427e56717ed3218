mod aggregate;
mod error;
mod message;
mod numeric;

pub use aggregate::{cavities, max_discrepancy, par_cavities, par_product_all, product_all};
pub use error::{MessageError, MessageResult};
pub use message::Message;
pub use numeric::log_sum_exp;
pub(crate) use numeric::{log_sum_exp_iter, normalized_exponents};
