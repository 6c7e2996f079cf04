//! The `base` crate defines the things about the virtual machine
//! which are useful both to the machine itself and to the tools
//! which produce programs for it.  An assembler depends on this
//! crate but not on the machine's implementation.

mod error;
mod types;

pub mod instruction;
pub mod prelude;
