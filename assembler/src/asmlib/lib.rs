//! Two-pass assembler for the crash virtual machine.
//!
//! Source text is parsed line by line into [`Line`]s.  The first
//! pass binds each label to an address and the second emits the
//! program image as a sequence of [`Word`]s.
#![deny(unreachable_pub)]
#![deny(unsafe_code)]
#![warn(clippy::must_use_candidate)]
#![warn(clippy::manual_string_new)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(clippy::return_self_not_must_use)]
#![warn(clippy::wildcard_imports)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(clippy::match_same_arms)]
#![warn(clippy::missing_errors_doc)]
#![warn(clippy::items_after_statements)]
#![warn(clippy::explicit_iter_loop)]
#![warn(clippy::pedantic)]
#![allow(clippy::redundant_closure_for_method_calls)] // fix later
#![allow(clippy::module_name_repetitions)] // fix soon
#![allow(clippy::doc_markdown)] // fix soon
#![allow(clippy::missing_panics_doc)] // fix soon

mod catalog;
mod driver;
mod grammar;
mod line;
mod listing;
mod literal;
mod parser;
mod program;
mod rx;
mod symbol;
mod types;

pub use catalog::parse_catalog;
pub use driver::*;
pub use grammar::{classify, Classified, LineKind, LINE_KINDS_IN_PRIORITY_ORDER};
pub use line::{Line, LineBody, SourceWord, Word};
pub use listing::{Listing, ListingLine};
pub use literal::{parse_address, parse_address_literal, parse_number, Operand};
pub use parser::{parse, Parser};
pub use program::Program;
pub use symbol::{Label, LabelTable};
pub use types::{
    AssemblerFailure, CatalogSyntax, ErrorKind, IoAction, IoFailed, IoTarget, LineFailure,
    LineNumber,
};
