//! # Governmint Test Suite
//!
//! Unified test crate.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── properties.rs   # Replicated state machine properties
//!     ├── sessions.rs     # Commit / rollback isolation
//!     ├── policies.rs     # Deployment configuration choices
//!     └── validators.rs   # InitChain, genesis, EndBlock validator updates
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p gm-tests
//! cargo test -p gm-tests integration::properties::
//! cargo bench -p gm-tests
//! ```

pub mod integration;
