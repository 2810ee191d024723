//! Token primitives persisted by the token store.

pub mod pair;
pub mod secret;
