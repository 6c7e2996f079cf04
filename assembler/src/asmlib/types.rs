use std::error::Error;
use std::ffi::OsString;
use std::fmt::{self, Display, Formatter};
use std::io::Error as IoError;
use std::path::PathBuf;

use base::prelude::{Address, CatalogError, ConversionFailed};

use super::symbol::Label;

/// Source line numbers count from 1.
pub type LineNumber = usize;

/// The distinguishable conditions under which assembly fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidSyntax,
    InvalidNumber,
    InvalidAddress,
    OutOfRange,
    InvalidLabel,
    DuplicateLabel,
    UndefinedLabel,
    InvalidOffset,
    ArityMismatch,
    ProgramTooBig,
    BadCatalog,
    Io,
}

/// A problem with a single source line.  The parser attaches the
/// line number by wrapping this in [`AssemblerFailure::Line`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LineFailure {
    /// The line matches none of the line patterns.
    InvalidSyntax,
    InvalidNumber(String),
    InvalidAddress(String),
    OutOfRange {
        text: String,
        failure: ConversionFailed,
    },
    InvalidLabel(String),
    UndefinedLabel(Label),
    /// An `Offset` directive tried to move the address backwards.
    InvalidOffset {
        offset: Address,
        address: Address,
    },
    ArityMismatch {
        mnemonic: String,
        expected: usize,
        got: usize,
    },
    /// The line would begin past the end of the address space.
    ProgramTooBig,
}

impl LineFailure {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LineFailure::InvalidSyntax => ErrorKind::InvalidSyntax,
            LineFailure::InvalidNumber(_) => ErrorKind::InvalidNumber,
            LineFailure::InvalidAddress(_) => ErrorKind::InvalidAddress,
            LineFailure::OutOfRange { .. } => ErrorKind::OutOfRange,
            LineFailure::InvalidLabel(_) => ErrorKind::InvalidLabel,
            LineFailure::UndefinedLabel(_) => ErrorKind::UndefinedLabel,
            LineFailure::InvalidOffset { .. } => ErrorKind::InvalidOffset,
            LineFailure::ArityMismatch { .. } => ErrorKind::ArityMismatch,
            LineFailure::ProgramTooBig => ErrorKind::ProgramTooBig,
        }
    }
}

impl Display for LineFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            LineFailure::InvalidSyntax => f.write_str("Invalid syntax"),
            LineFailure::InvalidNumber(text) => write!(f, "Invalid number value {text}"),
            LineFailure::InvalidAddress(text) => write!(f, "Invalid address value {text}"),
            LineFailure::OutOfRange { text, failure } => {
                write!(f, "Value {text} is out of range ({failure})")
            }
            LineFailure::InvalidLabel(text) => write!(f, "Invalid label {text}"),
            LineFailure::UndefinedLabel(label) => write!(f, "Undefined label {label}"),
            LineFailure::InvalidOffset { offset, address } => {
                write!(
                    f,
                    "Invalid offset {offset}: the line is already at address {address}"
                )
            }
            LineFailure::ArityMismatch {
                mnemonic,
                expected,
                got,
            } => {
                write!(
                    f,
                    "Instruction {mnemonic} takes {expected} arguments, {got} given"
                )
            }
            LineFailure::ProgramTooBig => {
                write!(
                    f,
                    "Program does not fit into memory; the largest possible address is {}",
                    Address::MAX
                )
            }
        }
    }
}

impl Error for LineFailure {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoAction {
    Read,
    Write,
}

#[derive(Debug)]
pub enum IoTarget {
    File(PathBuf),
    Stdout,
}

#[derive(Debug)]
pub struct IoFailed {
    pub action: IoAction,
    pub target: IoTarget,
    pub error: IoError,
}

impl Display for IoFailed {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        let action = match self.action {
            IoAction::Read => "reading",
            IoAction::Write => "writing",
        };
        match &self.target {
            IoTarget::File(path) => {
                write!(f, "I/O error {action} {}: {}", path.display(), self.error)
            }
            IoTarget::Stdout => write!(f, "I/O error {action} standard output: {}", self.error),
        }
    }
}

#[derive(Debug)]
pub enum AssemblerFailure {
    /// Parsing stopped at the first bad line.
    Line {
        line_number: LineNumber,
        failure: LineFailure,
    },
    /// Two label declarations share a name.  This is a property of
    /// the whole program, so no line number is given.
    DuplicateLabel(Label),
    /// An instruction refers to a label which no line declares.
    UndefinedLabel(Label),
    BadCatalog {
        filename: OsString,
        line_number: LineNumber,
        error: CatalogSyntax,
    },
    Io(IoFailed),
}

/// A problem with one line of an instruction catalog file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSyntax {
    /// The line is not of the form `<mnemonic> <arity>`.
    Malformed,
    InvalidArity(String),
    Rejected(CatalogError),
}

impl Display for CatalogSyntax {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            CatalogSyntax::Malformed => {
                f.write_str("expected an instruction mnemonic followed by its argument count")
            }
            CatalogSyntax::InvalidArity(text) => write!(f, "invalid argument count {text}"),
            CatalogSyntax::Rejected(e) => Display::fmt(e, f),
        }
    }
}

impl AssemblerFailure {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AssemblerFailure::Line { failure, .. } => failure.kind(),
            AssemblerFailure::DuplicateLabel(_) => ErrorKind::DuplicateLabel,
            AssemblerFailure::UndefinedLabel(_) => ErrorKind::UndefinedLabel,
            AssemblerFailure::BadCatalog { .. } => ErrorKind::BadCatalog,
            AssemblerFailure::Io(_) => ErrorKind::Io,
        }
    }

    /// The source line at fault, for failures which concern a single
    /// line.
    pub fn line_number(&self) -> Option<LineNumber> {
        match self {
            AssemblerFailure::Line { line_number, .. } => Some(*line_number),
            _ => None,
        }
    }
}

impl Display for AssemblerFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            AssemblerFailure::Line {
                line_number,
                failure,
            } => {
                write!(f, "Line {line_number}: {failure}")
            }
            AssemblerFailure::DuplicateLabel(label) => write!(f, "Label {label} duplicated"),
            AssemblerFailure::UndefinedLabel(label) => write!(f, "Undefined label {label}"),
            AssemblerFailure::BadCatalog {
                filename,
                line_number,
                error,
            } => {
                write!(
                    f,
                    "{} line {line_number}: {error}",
                    filename.to_string_lossy()
                )
            }
            AssemblerFailure::Io(e) => Display::fmt(e, f),
        }
    }
}

impl Error for AssemblerFailure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AssemblerFailure::Line { failure, .. } => Some(failure),
            AssemblerFailure::Io(e) => Some(&e.error),
            _ => None,
        }
    }
}
