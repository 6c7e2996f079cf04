//! The prelude exports the machine value types and the instruction
//! catalog.  Providing this prelude is the main purpose of the base
//! crate.
pub use super::error::*;
pub use super::instruction::*;
pub use super::types::*;
