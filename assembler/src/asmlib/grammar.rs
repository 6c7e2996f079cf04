//! Classification of source lines.
//!
//! Every line has exactly one kind.  The kinds are tried in a fixed
//! order and the first whose pattern matches the whole line wins.
//! The order matters: `12` is a value rather than anything else, and
//! `Offset 4` is a directive even if the instruction catalog happens
//! to contain an `Offset` instruction.

use base::prelude::{InstructionCatalog, Opcode};

use super::literal::{identifier_rx, number_rx, operand_rx};
use super::rx::LazyRegex;
use super::types::LineFailure;


/// Leading whitespace, which is allowed on every kind of line.
macro_rules! indent_rx {
    () => {
        r"^[ \t]*"
    };
}

/// Trailing whitespace and an optional comment.
macro_rules! line_end_rx {
    () => {
        r"[ \t]*(?:#.*)?$"
    };
}

static RX_EMPTY: LazyRegex = LazyRegex::new(concat!(indent_rx!(), line_end_rx!()));

static RX_OFFSET: LazyRegex = LazyRegex::new(concat!(
    indent_rx!(),
    r"Offset[ \t]+(?<offset>",
    number_rx!(),
    ")",
    line_end_rx!()
));

static RX_VALUE: LazyRegex = LazyRegex::new(concat!(
    indent_rx!(),
    "(?<value>",
    number_rx!(),
    ")",
    line_end_rx!()
));

static RX_INSTRUCTION: LazyRegex = LazyRegex::new(concat!(
    indent_rx!(),
    "(?<mnemonic>",
    identifier_rx!(),
    r")(?<args>(?:[ \t]+",
    operand_rx!(),
    ")*)",
    line_end_rx!()
));

static RX_LABEL: LazyRegex = LazyRegex::new(concat!(
    indent_rx!(),
    "(?<label>",
    identifier_rx!(),
    "):",
    line_end_rx!()
));

/// The kinds of source line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LineKind {
    Empty,
    Offset,
    Value,
    Instruction,
    Label,
}

/// The order in which line patterns are tried.
pub const LINE_KINDS_IN_PRIORITY_ORDER: [LineKind; 5] = [
    LineKind::Empty,
    LineKind::Offset,
    LineKind::Value,
    LineKind::Instruction,
    LineKind::Label,
];

/// The pieces of a line picked out by its pattern.  The pieces are
/// not yet checked (for example a value may be out of range).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Classified<'a> {
    Empty,
    Offset(&'a str),
    Value(&'a str),
    Instruction {
        opcode: &'a Opcode,
        args: Vec<&'a str>,
    },
    /// The identifier, without its colon.
    Label(&'a str),
}

impl Classified<'_> {
    pub fn kind(&self) -> LineKind {
        match self {
            Classified::Empty => LineKind::Empty,
            Classified::Offset(_) => LineKind::Offset,
            Classified::Value(_) => LineKind::Value,
            Classified::Instruction { .. } => LineKind::Instruction,
            Classified::Label(_) => LineKind::Label,
        }
    }
}

impl LineKind {
    /// Match `text` against the pattern for this kind of line.
    pub fn try_match<'a>(
        self,
        text: &'a str,
        catalog: &'a InstructionCatalog,
    ) -> Option<Classified<'a>> {
        match self {
            LineKind::Empty => RX_EMPTY.captures_whole(text).map(|_| Classified::Empty),
            LineKind::Offset => RX_OFFSET
                .captures_whole(text)
                .and_then(|c| c.name("offset"))
                .map(|m| Classified::Offset(m.as_str())),
            LineKind::Value => RX_VALUE
                .captures_whole(text)
                .and_then(|c| c.name("value"))
                .map(|m| Classified::Value(m.as_str())),
            LineKind::Instruction => {
                let captures = RX_INSTRUCTION.captures_whole(text)?;
                // Only mnemonics in the catalog are instructions; any
                // other word is left for the remaining patterns.
                let opcode = catalog.get(captures.name("mnemonic")?.as_str())?;
                let args: Vec<&str> = captures
                    .name("args")
                    .map(|m| m.as_str().split_whitespace().collect())
                    .unwrap_or_default();
                Some(Classified::Instruction { opcode, args })
            }
            LineKind::Label => RX_LABEL
                .captures_whole(text)
                .and_then(|c| c.name("label"))
                .map(|m| Classified::Label(m.as_str())),
        }
    }
}

/// Determine the kind of a line, trying each pattern in priority
/// order.
///
/// # Errors
///
/// `InvalidSyntax` if no pattern matches.
pub fn classify<'a>(
    text: &'a str,
    catalog: &'a InstructionCatalog,
) -> Result<Classified<'a>, LineFailure> {
    LINE_KINDS_IN_PRIORITY_ORDER
        .iter()
        .find_map(|kind| kind.try_match(text, catalog))
        .ok_or(LineFailure::InvalidSyntax)
}
