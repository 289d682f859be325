pub mod errors;
pub mod keys;
pub mod tally;
pub mod validation;

pub use errors::*;
pub use tally::Tally;
