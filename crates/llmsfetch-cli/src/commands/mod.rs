//! Command implementations.

mod fetch;

pub use fetch::execute as fetch;
