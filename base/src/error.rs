//! Errors raised when building machine values and the instruction
//! catalog.

use std::error::Error;
use std::fmt::{self, Display, Formatter};

/// A native integer could not be represented exactly as a
/// [`NativeNumber`](crate::prelude::NativeNumber) or an
/// [`Address`](crate::prelude::Address).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConversionFailed {
    TooLarge,
    TooSmall,
}

impl Error for ConversionFailed {}

impl Display for ConversionFailed {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        f.write_str(match self {
            ConversionFailed::TooLarge => "value is too large",
            ConversionFailed::TooSmall => "value is too small",
        })
    }
}

/// Reasons why an opcode cannot be added to an
/// [`InstructionCatalog`](crate::prelude::InstructionCatalog).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatalogError {
    /// Mnemonics follow the same rules as label identifiers.
    InvalidMnemonic(String),
    DuplicateMnemonic(String),
    /// Opcode codes are 16 bits wide.
    TooManyOpcodes,
}

impl Error for CatalogError {}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            CatalogError::InvalidMnemonic(name) => {
                write!(f, "'{name}' is not a valid instruction mnemonic")
            }
            CatalogError::DuplicateMnemonic(name) => {
                write!(f, "instruction {name} is defined more than once")
            }
            CatalogError::TooManyOpcodes => write!(
                f,
                "the catalog cannot hold more than {} opcodes",
                usize::from(u16::MAX) + 1
            ),
        }
    }
}
