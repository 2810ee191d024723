//! Credential models: redacted token secrets and the access/refresh pair.

pub mod token;

pub use token::{pair::*, secret::*};
