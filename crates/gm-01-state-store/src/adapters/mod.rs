pub mod versions;

pub use versions::*;
