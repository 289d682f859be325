pub mod config;
pub mod errors;
pub mod node;
pub mod proofs;
pub mod tree;

pub use config::*;
pub use errors::*;
pub use proofs::*;
pub use tree::*;

pub use shared_crypto::Hash;
