//! Conduit (workspace facade crate).
//!
//! Re-exports the member crates under one roof so the binary, tests and
//! benches can write `conduit::core::Game` and friends.

pub use conduit_core as core;
pub use conduit_input as input;
pub use conduit_store as store;
pub use conduit_term as term;
pub use conduit_types as types;
