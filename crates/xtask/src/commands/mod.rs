//! Command implementations for xtask
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod check;
mod inspect;

pub use check::Check;
pub use inspect::Inspect;
