use std::fmt::{self, Display, Formatter};

use base::prelude::Address;

use super::line::Word;
use super::symbol::LabelTable;

/// A human-readable account of what each source line assembled to.
#[derive(Debug, Default)]
pub struct Listing {
    labels: LabelTable,
    output: Vec<ListingLine>,
}

impl Listing {
    pub(crate) fn new(labels: LabelTable) -> Listing {
        Listing {
            labels,
            output: Vec::new(),
        }
    }

    pub(crate) fn push_line(&mut self, line: ListingLine) {
        self.output.push(line);
    }

    pub fn lines(&self) -> &[ListingLine] {
        &self.output
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct ListingLine {
    address: Address,
    words: Vec<Word>,
    text: String,
}

impl ListingLine {
    pub(crate) fn new(address: Address, words: Vec<Word>, text: &str) -> ListingLine {
        ListingLine {
            address,
            words,
            text: text.to_string(),
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }
}

/// Offset lines can produce a great many zero words; the listing
/// shows only the first few.
const MAX_LISTED_WORDS: usize = 4;

impl Display for ListingLine {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut shown: Vec<String> = self
            .words
            .iter()
            .take(MAX_LISTED_WORDS)
            .map(|w| w.to_string())
            .collect();
        if self.words.len() > MAX_LISTED_WORDS {
            shown.push(format!("...+{}", self.words.len() - MAX_LISTED_WORDS));
        }
        let shown = shown.join(" ");
        write!(f, "{:04x}  {shown:<40}|{}", self.address, self.text)
    }
}

impl Display for Listing {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Labels:")?;
        write!(f, "{}", self.labels)?;
        writeln!(f)?;

        writeln!(f, "Program:")?;
        for line in self.output.iter() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
