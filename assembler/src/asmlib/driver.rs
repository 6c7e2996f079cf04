use std::ffi::OsStr;
use std::fs::{self, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{event, span, Level};

use base::prelude::InstructionCatalog;

use super::catalog::parse_catalog;
use super::line::Word;
use super::program::Program;
use super::symbol::LabelTable;
use super::types::{AssemblerFailure, IoAction, IoFailed, IoTarget};

mod output;
#[cfg(test)]
mod tests;

pub use output::write_words;

/// Assemble `source` into the words of a program image.
///
/// This makes two passes over the parsed program.  The first finds
/// the address of every label and the second emits the words of
/// each line, replacing label references with those addresses.
/// Nothing is returned unless both passes succeed.
///
/// # Errors
///
/// - Any failure to parse a line (which identifies the line)
/// - A label declared more than once
/// - A reference to a label which is never declared
pub fn compile(source: &str, catalog: &InstructionCatalog) -> Result<Vec<Word>, AssemblerFailure> {
    let program = Program::parse(source, catalog)?;
    let (_, words) = resolve_and_encode(&program)?;
    Ok(words)
}

fn resolve_and_encode(program: &Program) -> Result<(LabelTable, Vec<Word>), AssemblerFailure> {
    let labels = program.label_table()?;
    let words = program.encode(&labels)?;
    event!(
        Level::INFO,
        "assembled {} lines into {} words",
        program.lines().len(),
        words.len()
    );
    Ok((labels, words))
}

/// Options controlling what [`assemble_file`] produces besides the
/// output file.
#[derive(Debug, Default, Clone, Copy)]
pub struct OutputOptions {
    /// When set, print a listing on standard output.
    pub list: bool,
}

fn read_file(name: &OsStr) -> Result<String, AssemblerFailure> {
    fs::read_to_string(name).map_err(|error| {
        AssemblerFailure::Io(IoFailed {
            action: IoAction::Read,
            target: IoTarget::File(PathBuf::from(name)),
            error,
        })
    })
}

fn print_listing(
    program: &Program,
    source: &str,
    labels: &LabelTable,
) -> Result<(), AssemblerFailure> {
    let listing = program.listing(source, labels)?;
    let mut stdout = io::stdout().lock();
    write!(stdout, "{listing}")
        .and_then(|()| stdout.flush())
        .map_err(|error| {
            AssemblerFailure::Io(IoFailed {
                action: IoAction::Write,
                target: IoTarget::Stdout,
                error,
            })
        })
}

/// Assemble the program in `input_file` using the instruction set
/// described in `catalog_file`, writing the result to `output_file`.
///
/// # Errors
///
/// - Failure to read either input file
/// - An invalid instruction catalog
/// - Any of the failures described for [`compile`]
/// - Failure to write the output file or the listing
pub fn assemble_file(
    input_file: &OsStr,
    catalog_file: &OsStr,
    output_file: &Path,
    options: OutputOptions,
) -> Result<(), AssemblerFailure> {
    let catalog = parse_catalog(catalog_file, &read_file(catalog_file)?)?;
    let source = read_file(input_file)?;

    let words = {
        let span = span!(Level::ERROR, "assembly", input=?input_file);
        let _enter = span.enter();
        let program = Program::parse(&source, &catalog)?;
        let (labels, words) = resolve_and_encode(&program)?;
        if options.list {
            print_listing(&program, &source, &labels)?;
        }
        words
    };

    let output = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(output_file)
        .map_err(|error| {
            AssemblerFailure::Io(IoFailed {
                action: IoAction::Write,
                target: IoTarget::File(output_file.to_owned()),
                error,
            })
        })?;
    let mut writer = BufWriter::new(output);
    write_words(&mut writer, output_file, &words)
}
