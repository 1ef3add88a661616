//! Shared argument types for the llmsfetch CLI.

mod verbosity;

pub use verbosity::Verbosity;
