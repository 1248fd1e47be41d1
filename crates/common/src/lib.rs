//! Shared primitives used by every route: result normalization, declared
//! fallbacks, wire types and logging setup.

pub mod fallback;
pub mod settle;
pub mod types;
pub mod utils;

pub use fallback::{recover, recover_with};
pub use settle::{settle, ErrorPayload, Settled};
