//! Reading an instruction catalog from text.
//!
//! The format is one instruction per line, giving its mnemonic and
//! the number of address arguments it takes:
//!
//! ```text
//! # mnemonic  arity
//! HALT        0
//! JMP         1
//! ADD         2
//! ```
//!
//! Blank lines and `#` comments are ignored.  Opcodes are numbered in
//! the order in which they appear.

use std::ffi::OsStr;

use tracing::{event, Level};

use base::prelude::InstructionCatalog;

use super::literal::identifier_rx;
use super::rx::LazyRegex;
use super::types::{AssemblerFailure, CatalogSyntax};

static RX_CATALOG_BLANK: LazyRegex = LazyRegex::new(r"^[ \t]*(?:#.*)?$");

static RX_CATALOG_ENTRY: LazyRegex = LazyRegex::new(concat!(
    r"^[ \t]*(?<mnemonic>",
    identifier_rx!(),
    r")[ \t]+(?<arity>[0-9]+)[ \t]*(?:#.*)?$"
));

fn parse_entry<'a>(text: &'a str) -> Result<Option<(&'a str, usize)>, CatalogSyntax> {
    if RX_CATALOG_BLANK.captures_whole(text).is_some() {
        return Ok(None);
    }
    let captures = RX_CATALOG_ENTRY
        .captures_whole(text)
        .ok_or(CatalogSyntax::Malformed)?;
    match (captures.name("mnemonic"), captures.name("arity")) {
        (Some(mnemonic), Some(arity)) => {
            let arity_text = arity.as_str();
            let arity: usize = arity_text
                .parse()
                .map_err(|_| CatalogSyntax::InvalidArity(arity_text.to_string()))?;
            Ok(Some((mnemonic.as_str(), arity)))
        }
        _ => Err(CatalogSyntax::Malformed),
    }
}

/// Build an instruction catalog from the text of a catalog file.
/// `filename` is used only in error messages.
///
/// # Errors
///
/// `BadCatalog`, identifying the first line which is malformed or
/// which repeats a mnemonic.
pub fn parse_catalog(filename: &OsStr, text: &str) -> Result<InstructionCatalog, AssemblerFailure> {
    let mut catalog = InstructionCatalog::new();
    for (line_number, line) in text.lines().enumerate().map(|(n, line)| (n + 1, line)) {
        let fail = |error: CatalogSyntax| AssemblerFailure::BadCatalog {
            filename: filename.to_owned(),
            line_number,
            error,
        };
        if let Some((mnemonic, arity)) = parse_entry(line).map_err(fail)? {
            catalog
                .add(mnemonic, arity)
                .map_err(|e| fail(CatalogSyntax::Rejected(e)))?;
        }
    }
    event!(
        Level::DEBUG,
        "instruction catalog {} defines {} instructions",
        filename.to_string_lossy(),
        catalog.len()
    );
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use std::ffi::OsStr;

    use base::prelude::CatalogError;

    use super::super::types::{AssemblerFailure, CatalogSyntax};
    use super::parse_catalog;

    fn name() -> &'static OsStr {
        OsStr::new("test.cat")
    }

    #[test]
    fn test_parse_catalog() {
        let catalog = parse_catalog(
            name(),
            "# The instruction set\n\nHALT 0\n  JMP\t1  # jump\nADD 2\n",
        )
        .expect("catalog should be valid");
        let entries: Vec<(&str, u16, usize)> = catalog
            .iter()
            .map(|op| (op.mnemonic(), op.code(), op.arity()))
            .collect();
        assert_eq!(entries, [("HALT", 0, 0), ("JMP", 1, 1), ("ADD", 2, 2)]);
    }

    #[test]
    fn test_malformed_line() {
        match parse_catalog(name(), "HALT 0\nJMP\n") {
            Err(AssemblerFailure::BadCatalog {
                line_number: 2,
                error: CatalogSyntax::Malformed,
                ..
            }) => (),
            other => panic!("expected line 2 to be malformed, got {other:?}"),
        }
    }

    #[test]
    fn test_huge_arity() {
        match parse_catalog(name(), "JMP 99999999999999999999999999\n") {
            Err(AssemblerFailure::BadCatalog {
                line_number: 1,
                error: CatalogSyntax::InvalidArity(_),
                ..
            }) => (),
            other => panic!("expected an invalid arity, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_mnemonic() {
        let result = parse_catalog(name(), "JMP 1\nJMP 2\n");
        match &result {
            Err(AssemblerFailure::BadCatalog {
                line_number: 2,
                error: CatalogSyntax::Rejected(CatalogError::DuplicateMnemonic(m)),
                ..
            }) if m == "JMP" => (),
            other => panic!("expected a duplicate mnemonic, got {other:?}"),
        }
        assert_eq!(
            result.unwrap_err().to_string(),
            "test.cat line 2: instruction JMP is defined more than once"
        );
    }
}
