use tracing::{event, Level};

use base::prelude::InstructionCatalog;

use super::line::{Line, Word};
use super::listing::{Listing, ListingLine};
use super::parser::parse;
use super::symbol::LabelTable;
use super::types::AssemblerFailure;

/// All the lines of one compilation unit, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    lines: Vec<Line>,
}

impl Program {
    /// Parse the whole of `source`.
    ///
    /// # Errors
    ///
    /// The first failure met while parsing; see [`parse`].
    pub fn parse(source: &str, catalog: &InstructionCatalog) -> Result<Program, AssemblerFailure> {
        let lines = parse(source, catalog).collect::<Result<Vec<Line>, AssemblerFailure>>()?;
        Ok(Program { lines })
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Number of words in the program image.
    pub fn word_count(&self) -> usize {
        self.lines.iter().map(Line::padded_word_count).sum()
    }

    /// Pass 1: bind each declared label to the address of its line.
    ///
    /// # Errors
    ///
    /// `DuplicateLabel` if any label is declared twice.
    pub fn label_table(&self) -> Result<LabelTable, AssemblerFailure> {
        let mut table = LabelTable::new();
        for line in self.lines.iter() {
            if let Some(label) = line.declared_label() {
                table.define(label, line.address())?;
            }
        }
        Ok(table)
    }

    /// Pass 2: the words of every line, padded, with labels replaced
    /// by their addresses.
    ///
    /// # Errors
    ///
    /// `UndefinedLabel` if an instruction refers to a label missing
    /// from `labels`.
    pub fn encode(&self, labels: &LabelTable) -> Result<Vec<Word>, AssemblerFailure> {
        let mut words = Vec::with_capacity(self.word_count());
        for line in self.lines.iter() {
            for word in line.padded_words() {
                words.push(word.resolve(labels)?);
            }
        }
        Ok(words)
    }

    /// Pair each line with its resolved words and its source text.
    /// `source` must be the text this program was parsed from.
    ///
    /// # Errors
    ///
    /// As for [`Program::encode`].
    pub fn listing(&self, source: &str, labels: &LabelTable) -> Result<Listing, AssemblerFailure> {
        let mut listing = Listing::new(labels.clone());
        for (line, text) in self.lines.iter().zip(source.lines()) {
            let words = line
                .padded_words()
                .map(|word| word.resolve(labels))
                .collect::<Result<Vec<Word>, AssemblerFailure>>()?;
            listing.push_line(ListingLine::new(line.address(), words, text));
        }
        event!(
            Level::DEBUG,
            "listing has {} lines and {} labels",
            self.lines.len(),
            labels.len()
        );
        Ok(listing)
    }
}
