//! Turns source text into a sequence of [`Line`]s.
//!
//! The parser is an iterator.  It keeps track of the address at
//! which the next line will begin; each line is created at that
//! address and then the address is advanced by the number of words
//! the line occupies.  Parsing stops at the first bad line.

use std::iter::{Enumerate, FusedIterator};
use std::str::Lines;

use tracing::{event, Level};

use base::prelude::{Address, InstructionCatalog};

use super::grammar::{classify, Classified};
use super::line::Line;
use super::literal::{parse_address, parse_address_literal, parse_number, Operand};
use super::symbol::Label;
use super::types::{AssemblerFailure, LineFailure, LineNumber};


/// Number of words in the address space.
const MEMORY_SIZE: usize = Address::MAX.value() as usize + 1;

/// Build the line described by `classified`, starting at `address`.
fn make_line(
    classified: Classified<'_>,
    address: Address,
    line_number: LineNumber,
) -> Result<Line, LineFailure> {
    match classified {
        Classified::Empty => Ok(Line::empty(address, line_number)),
        Classified::Offset(text) => {
            let offset = parse_address_literal(text)?;
            Line::offset(address, line_number, offset)
        }
        Classified::Value(text) => Ok(Line::value(address, line_number, parse_number(text)?)),
        Classified::Instruction { opcode, args } => {
            let args: Vec<Operand> = args
                .into_iter()
                .map(|arg| parse_address(arg, None))
                .collect::<Result<_, _>>()?;
            Line::instruction(address, line_number, opcode, args)
        }
        Classified::Label(text) => Ok(Line::label(address, line_number, Label::try_from(text)?)),
    }
}

/// An iterator over the lines of a program.  See [`parse`].
pub struct Parser<'a> {
    lines: Enumerate<Lines<'a>>,
    catalog: &'a InstructionCatalog,
    /// Address of the next line.  This can be one past the end of
    /// memory (when the program fills memory exactly); only empty
    /// lines are accepted after that.
    next_address: usize,
    failed: bool,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str, catalog: &'a InstructionCatalog) -> Parser<'a> {
        Parser {
            lines: source.lines().enumerate(),
            catalog,
            next_address: 0,
            failed: false,
        }
    }

    fn parse_line(&self, line_number: LineNumber, text: &str) -> Result<Line, LineFailure> {
        let classified = classify(text, self.catalog)?;
        event!(
            Level::TRACE,
            "line {line_number} is of kind {:?}",
            classified.kind()
        );
        if self.next_address == MEMORY_SIZE && classified == Classified::Empty {
            // Memory is full, but blank and comment lines occupy no
            // words.  They are placed at the last address.
            return Ok(Line::empty(Address::MAX, line_number));
        }
        let address =
            Address::try_from(self.next_address).map_err(|_| LineFailure::ProgramTooBig)?;
        let line = make_line(classified, address, line_number)?;
        if self.next_address + line.padded_word_count() > MEMORY_SIZE {
            return Err(LineFailure::ProgramTooBig);
        }
        Ok(line)
    }
}

impl Iterator for Parser<'_> {
    type Item = Result<Line, AssemblerFailure>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let (index, text) = self.lines.next()?;
        let line_number: LineNumber = index + 1;
        match self.parse_line(line_number, text) {
            Ok(line) => {
                event!(
                    Level::DEBUG,
                    "line {line_number} at address {} occupies {} words",
                    line.address(),
                    line.padded_word_count()
                );
                self.next_address += line.padded_word_count();
                Some(Ok(line))
            }
            Err(failure) => {
                self.failed = true;
                Some(Err(AssemblerFailure::Line {
                    line_number,
                    failure,
                }))
            }
        }
    }
}

impl FusedIterator for Parser<'_> {}

/// Parse `source` lazily, one line at a time.  Instructions are
/// recognised using `catalog`.
///
/// Each item is either the next line or the failure which stopped
/// parsing; after a failure the iterator yields nothing more.
/// Calling `parse` again on the same source starts afresh.
pub fn parse<'a>(source: &'a str, catalog: &'a InstructionCatalog) -> Parser<'a> {
    Parser::new(source, catalog)
}
