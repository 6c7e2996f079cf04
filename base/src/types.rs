//! Machine value types.
//!
//! The virtual machine has 32-bit signed data words
//! ([`NativeNumber`]) and a 16-bit address space ([`Address`]).  Both
//! types can only be built from native integers which they can
//! represent exactly; there is no silent truncation.
use std::cmp::Ordering;
use std::fmt::{self, Debug, Display, Formatter, LowerHex};

#[cfg(test)]
use test_strategy::Arbitrary;

use super::error::ConversionFailed;

#[cfg(test)]
mod tests;

/// This macro implements conversions from native types to `$SelfT`
/// where the conversion may not always fit.  For example
/// `TryFrom<i64> for NativeNumber`.
macro_rules! try_from_native_type_to_self {
    ($SelfT:ty, $InnerT:ty, $($from:ty)*) => {
        $(
            impl TryFrom<$from> for $SelfT {
                type Error = ConversionFailed;
                fn try_from(n: $from) -> Result<Self, ConversionFailed> {
                    match <$InnerT>::try_from(n) {
                        Ok(value) => Ok(Self(value)),
                        // Some of the source types are unsigned, in
                        // which case this comparison is always false.
                        #[allow(unused_comparisons)]
                        Err(_) if n < 0 => Err(ConversionFailed::TooSmall),
                        Err(_) => Err(ConversionFailed::TooLarge),
                    }
                }
            }
        )*
    }
}

/// This macro implements conversions from `$SelfT` to native types
/// which are always possible (e.g. `From<Address> for u32`).
macro_rules! from_self_to_native_type {
    ($SelfT:ty, $($to:ty)*) => {
        $(
            impl From<$SelfT> for $to {
                fn from(n: $SelfT) -> $to {
                    <$to>::from(n.0)
                }
            }
        )*
    }
}

/// A data word of the virtual machine.
#[cfg_attr(test, derive(Arbitrary))]
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NativeNumber(i32);

impl NativeNumber {
    pub const ZERO: NativeNumber = NativeNumber(0);
    pub const MIN: NativeNumber = NativeNumber(i32::MIN);
    pub const MAX: NativeNumber = NativeNumber(i32::MAX);

    pub const fn new(value: i32) -> NativeNumber {
        NativeNumber(value)
    }

    pub const fn value(&self) -> i32 {
        self.0
    }
}

try_from_native_type_to_self!(NativeNumber, i32, i64 u32 u64 i128 usize isize);
from_self_to_native_type!(NativeNumber, i32 i64 i128);

impl From<i32> for NativeNumber {
    fn from(n: i32) -> NativeNumber {
        NativeNumber(n)
    }
}

impl Display for NativeNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl Debug for NativeNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "NativeNumber({})", self.0)
    }
}

/// A location in the memory of the virtual machine.
///
/// Before label resolution, an instruction operand may also be a
/// symbolic reference; that case is represented in the assembler,
/// not here.
#[cfg_attr(test, derive(Arbitrary))]
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Address(u16);

impl Address {
    pub const ZERO: Address = Address(0);
    pub const MAX: Address = Address(u16::MAX);

    pub const fn new(value: u16) -> Address {
        Address(value)
    }

    pub const fn value(&self) -> u16 {
        self.0
    }

    /// The number of words between `earlier` and this address, or
    /// `None` if `earlier` actually comes after `self`.
    pub fn distance_from(&self, earlier: Address) -> Option<usize> {
        self.0.checked_sub(earlier.0).map(usize::from)
    }
}

try_from_native_type_to_self!(Address, u16, i32 i64 u32 u64 i128 usize isize);
from_self_to_native_type!(Address, u16 u32 u64 i32 i64 i128 usize);

impl From<u16> for Address {
    fn from(a: u16) -> Address {
        Address(a)
    }
}

/// Every address is also a valid data word (the data word range is
/// wider than the address range).
impl From<Address> for NativeNumber {
    fn from(a: Address) -> NativeNumber {
        NativeNumber(i32::from(a.0))
    }
}

impl Ord for Address {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl PartialOrd for Address {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl LowerHex for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        LowerHex::fmt(&self.0, f) // delegate to u16's implementation
    }
}

impl Debug for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        // Always display as hex.
        write!(f, "Address({:#06x})", self.0)
    }
}
