pub mod error;
pub mod paginate;
pub mod types;

pub use error::NewsError;
pub use paginate::{paginate, PAGE_SIZE};
pub use types::*;
