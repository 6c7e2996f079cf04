//! Numeric literals and address operands.
//!
//! A literal is an optional sign followed by either a `0x`-prefixed
//! hexadecimal number or a decimal number.  Numbers and address
//! literals share this grammar and differ only in the range of values
//! they accept.

use std::fmt::{self, Display, Formatter};
use std::num::IntErrorKind;

use base::prelude::{Address, ConversionFailed, NativeNumber};

use super::rx::LazyRegex;
use super::symbol::{Label, LabelTable};
use super::types::LineFailure;


/// Pattern for a numeric literal, without anchors.  This is a macro
/// rather than a constant so that it can be used inside `concat!`.
macro_rules! number_rx {
    () => {
        r"[-+]?(?:0x[0-9a-fA-F]+|[0-9]+)"
    };
}

/// Pattern for an identifier, without anchors.
macro_rules! identifier_rx {
    () => {
        r"[A-Za-z_][A-Za-z0-9_]*"
    };
}

/// Pattern for an instruction operand: a numeric literal, or a label
/// reference which may carry the same trailing colon as a label
/// declaration.
macro_rules! operand_rx {
    () => {
        concat!("(?:", number_rx!(), "|", identifier_rx!(), ":?)")
    };
}

pub(crate) use {identifier_rx, number_rx, operand_rx};

static RX_LITERAL: LazyRegex =
    LazyRegex::new("^(?<sign>[-+])?(?:0x(?<hex>[0-9a-fA-F]+)|(?<dec>[0-9]+))$");

/// Why a literal could not be converted to an integer.
enum LiteralError {
    NotALiteral,
    OutOfRange(ConversionFailed),
}

/// Parse `text` as a literal.  Values which do not even fit into 64
/// bits are reported as out of range (with the appropriate sign) rather
/// than as invalid.
fn parse_literal(text: &str) -> Result<i64, LiteralError> {
    let Some(captures) = RX_LITERAL.captures_whole(text) else {
        return Err(LiteralError::NotALiteral);
    };
    let negative = captures.name("sign").is_some_and(|m| m.as_str() == "-");
    let (digits, radix) = match (captures.name("hex"), captures.name("dec")) {
        (Some(hex), _) => (hex.as_str(), 16),
        (None, Some(dec)) => (dec.as_str(), 10),
        (None, None) => unreachable!("literal pattern matched without any digits"),
    };
    // Parse the sign along with the digits so that the most negative
    // 64-bit value is accepted.
    let signed_digits = if negative {
        format!("-{digits}")
    } else {
        digits.to_string()
    };
    i64::from_str_radix(&signed_digits, radix).map_err(|e| match e.kind() {
        IntErrorKind::NegOverflow => LiteralError::OutOfRange(ConversionFailed::TooSmall),
        IntErrorKind::PosOverflow => LiteralError::OutOfRange(ConversionFailed::TooLarge),
        _ => LiteralError::NotALiteral,
    })
}

fn out_of_range(text: &str, failure: ConversionFailed) -> LineFailure {
    LineFailure::OutOfRange {
        text: text.to_string(),
        failure,
    }
}

/// Parse a data word.
///
/// # Errors
///
/// `InvalidNumber` if `text` is not a literal, `OutOfRange` if it is a
/// literal whose value cannot be a [`NativeNumber`].
pub fn parse_number(text: &str) -> Result<NativeNumber, LineFailure> {
    match parse_literal(text) {
        Ok(value) => NativeNumber::try_from(value).map_err(|e| out_of_range(text, e)),
        Err(LiteralError::OutOfRange(e)) => Err(out_of_range(text, e)),
        Err(LiteralError::NotALiteral) => Err(LineFailure::InvalidNumber(text.to_string())),
    }
}

/// Parse an address written as a literal.
///
/// # Errors
///
/// `InvalidAddress` if `text` is not a literal, `OutOfRange` if it
/// is a literal whose value is not a valid [`Address`].
pub fn parse_address_literal(text: &str) -> Result<Address, LineFailure> {
    match parse_literal(text) {
        Ok(value) => Address::try_from(value).map_err(|e| out_of_range(text, e)),
        Err(LiteralError::OutOfRange(e)) => Err(out_of_range(text, e)),
        Err(LiteralError::NotALiteral) => Err(LineFailure::InvalidAddress(text.to_string())),
    }
}

/// An instruction argument: either a known address or a reference to
/// a label which is resolved once the whole program has been read.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Operand {
    Address(Address),
    Label(Label),
}

impl Display for Operand {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Address(a) => Display::fmt(a, f),
            Operand::Label(label) => Display::fmt(label, f),
        }
    }
}

/// Parse an instruction argument.
///
/// An address literal is tried first.  Failing that, `text` is
/// taken to be a label (a trailing colon is permitted).  When
/// `labels` is given the label is looked up straight away.
///
/// # Errors
///
/// - `InvalidAddress` if `text` is neither a literal nor an
///   identifier
/// - `OutOfRange` if `text` is a literal but not a valid address
/// - `UndefinedLabel` if `labels` is given but does not contain the
///   label
pub fn parse_address(text: &str, labels: Option<&LabelTable>) -> Result<Operand, LineFailure> {
    match parse_address_literal(text) {
        Ok(address) => {
            return Ok(Operand::Address(address));
        }
        Err(e @ LineFailure::OutOfRange { .. }) => {
            // No identifier starts with a digit or a sign.
            return Err(e);
        }
        Err(_) => (),
    }
    let label = match Label::try_from(text) {
        Ok(label) => label,
        Err(_) => {
            return Err(LineFailure::InvalidAddress(text.to_string()));
        }
    };
    match labels {
        None => Ok(Operand::Label(label)),
        Some(table) => match table.get(&label) {
            Some(address) => Ok(Operand::Address(address)),
            None => Err(LineFailure::UndefinedLabel(label)),
        },
    }
}
