//! The classified lines of a program.
//!
//! Each kind of line knows how many words it occupies in the program
//! image (its "padded" word count) and which words it produces.  A
//! line never produces more words than it occupies; the remainder is
//! filled with zeroes.

use std::fmt::{self, Display, Formatter};
use std::iter::repeat;

use base::prelude::{Address, NativeNumber, Opcode};

use super::literal::Operand;
use super::symbol::{Label, LabelTable};
use super::types::{AssemblerFailure, LineFailure, LineNumber};


/// A word of output before label resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceWord {
    Opcode(Opcode),
    Number(NativeNumber),
    Address(Address),
    /// A reference to a label whose address is not yet known.
    Label(Label),
}

impl From<&Operand> for SourceWord {
    fn from(operand: &Operand) -> SourceWord {
        match operand {
            Operand::Address(a) => SourceWord::Address(*a),
            Operand::Label(label) => SourceWord::Label(label.clone()),
        }
    }
}

impl SourceWord {
    /// Replace a label reference with its address.
    ///
    /// # Errors
    ///
    /// `UndefinedLabel` if the label is not in `labels`.
    pub fn resolve(self, labels: &LabelTable) -> Result<Word, AssemblerFailure> {
        match self {
            SourceWord::Opcode(op) => Ok(Word::Opcode(op)),
            SourceWord::Number(n) => Ok(Word::Number(n)),
            SourceWord::Address(a) => Ok(Word::Address(a)),
            SourceWord::Label(label) => match labels.get(&label) {
                Some(address) => Ok(Word::Address(address)),
                None => Err(AssemblerFailure::UndefinedLabel(label)),
            },
        }
    }
}

/// A word of assembler output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Word {
    Opcode(Opcode),
    Number(NativeNumber),
    Address(Address),
}

impl Word {
    /// The numeric value a loader stores in memory for this word.
    /// Opcodes are represented by their catalog code.
    pub fn value(&self) -> NativeNumber {
        match self {
            Word::Opcode(op) => NativeNumber::from(i32::from(op.code())),
            Word::Number(n) => *n,
            Word::Address(a) => NativeNumber::from(*a),
        }
    }
}

impl Display for Word {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Word::Opcode(op) => Display::fmt(op, f),
            Word::Number(n) => Display::fmt(n, f),
            Word::Address(a) => write!(f, "{a:#06x}"),
        }
    }
}

/// What a line is, once classified.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LineBody {
    /// Blank or comment-only.
    Empty,
    /// `Offset <addr>` moves the next line to `<addr>`, padding the
    /// gap with zeroes.
    Offset(Address),
    /// `name:` binds `name` to the address of the line.
    Label(Label),
    /// A bare literal, emitted as one word.
    Value(NativeNumber),
    /// An opcode followed by exactly as many operands as its arity.
    Instruction { opcode: Opcode, args: Vec<Operand> },
}

/// One line of a program, fixed at the address where it begins.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Line {
    address: Address,
    line_number: LineNumber,
    body: LineBody,
}

impl Line {
    pub fn empty(address: Address, line_number: LineNumber) -> Line {
        Line {
            address,
            line_number,
            body: LineBody::Empty,
        }
    }

    /// # Errors
    ///
    /// `InvalidOffset` if `offset` is before `address`.
    pub fn offset(
        address: Address,
        line_number: LineNumber,
        offset: Address,
    ) -> Result<Line, LineFailure> {
        if offset < address {
            return Err(LineFailure::InvalidOffset { offset, address });
        }
        Ok(Line {
            address,
            line_number,
            body: LineBody::Offset(offset),
        })
    }

    pub fn label(address: Address, line_number: LineNumber, label: Label) -> Line {
        Line {
            address,
            line_number,
            body: LineBody::Label(label),
        }
    }

    pub fn value(address: Address, line_number: LineNumber, value: NativeNumber) -> Line {
        Line {
            address,
            line_number,
            body: LineBody::Value(value),
        }
    }

    /// # Errors
    ///
    /// `ArityMismatch` if the number of arguments differs from the
    /// opcode's arity.
    pub fn instruction(
        address: Address,
        line_number: LineNumber,
        opcode: &Opcode,
        args: Vec<Operand>,
    ) -> Result<Line, LineFailure> {
        if args.len() != opcode.arity() {
            return Err(LineFailure::ArityMismatch {
                mnemonic: opcode.mnemonic().to_string(),
                expected: opcode.arity(),
                got: args.len(),
            });
        }
        Ok(Line {
            address,
            line_number,
            body: LineBody::Instruction {
                opcode: opcode.clone(),
                args,
            },
        })
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn line_number(&self) -> LineNumber {
        self.line_number
    }

    pub fn body(&self) -> &LineBody {
        &self.body
    }

    /// The label this line declares, if it is a label line.
    pub fn declared_label(&self) -> Option<&Label> {
        match &self.body {
            LineBody::Label(label) => Some(label),
            _ => None,
        }
    }

    /// Number of words the line occupies in the program image.
    pub fn padded_word_count(&self) -> usize {
        match &self.body {
            LineBody::Empty | LineBody::Label(_) => 0,
            LineBody::Offset(offset) => offset
                .distance_from(self.address)
                .expect("offset lines are never created with an offset before their address"),
            LineBody::Value(_) => 1,
            LineBody::Instruction { opcode, .. } => opcode.word_count(),
        }
    }

    /// The words the line produces, before any padding.
    pub fn produced_words(&self) -> Vec<SourceWord> {
        match &self.body {
            LineBody::Empty | LineBody::Label(_) | LineBody::Offset(_) => Vec::new(),
            LineBody::Value(value) => vec![SourceWord::Number(*value)],
            LineBody::Instruction { opcode, args } => {
                let mut words = Vec::with_capacity(opcode.word_count());
                words.push(SourceWord::Opcode(opcode.clone()));
                words.extend(args.iter().map(SourceWord::from));
                words
            }
        }
    }

    /// The produced words followed by zeroes, up to the padded word
    /// count.
    pub fn padded_words(&self) -> impl Iterator<Item = SourceWord> {
        let produced = self.produced_words();
        let padded = self.padded_word_count();
        // A line producing more than it occupies would shift every
        // following line; that is a bug in this module.
        assert!(
            produced.len() <= padded,
            "line {} produced {} words but occupies only {padded}",
            self.line_number,
            produced.len(),
        );
        let padding = padded - produced.len();
        produced
            .into_iter()
            .chain(repeat(SourceWord::Number(NativeNumber::ZERO)).take(padding))
    }
}
