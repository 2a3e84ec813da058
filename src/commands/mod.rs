//! CLI command implementations
//!
//! - `show` decodes and prints every pin of the first ports
//! - `pin` applies one command to a single pin

pub mod pin;
pub mod show;
