//! Symbolic instructions of the virtual machine.
//!
//! The assembler does not know the instruction set.  It is told,
//! through an [`InstructionCatalog`], which mnemonics exist and how
//! many address arguments each one takes.  An instruction occupies
//! one word for the opcode plus one word per argument.

use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};

use super::error::CatalogError;


/// One entry of the instruction catalog.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Opcode {
    mnemonic: String,
    /// Numeric code, being the position of the opcode in its catalog.
    code: u16,
    arity: usize,
}

impl Opcode {
    pub fn mnemonic(&self) -> &str {
        self.mnemonic.as_str()
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    /// Number of address arguments the instruction takes.
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Number of words occupied by the instruction and its arguments.
    pub fn word_count(&self) -> usize {
        1 + self.arity
    }
}

impl Display for Opcode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.mnemonic)
    }
}

/// Returns true if `name` is a letter or underscore followed by any
/// number of letters, digits and underscores.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
        }
        _ => false,
    }
}

/// Maps instruction mnemonics to opcodes.  Opcodes are numbered in
/// the order in which they are added.
#[derive(Clone, Debug, Default)]
pub struct InstructionCatalog {
    opcodes: Vec<Opcode>,
    by_mnemonic: HashMap<String, usize>,
}

impl InstructionCatalog {
    pub fn new() -> InstructionCatalog {
        InstructionCatalog::default()
    }

    /// Add an instruction to the catalog.
    ///
    /// # Errors
    ///
    /// - `mnemonic` is not an identifier
    /// - `mnemonic` is already in the catalog
    /// - the catalog already holds as many opcodes as a code can
    ///   number
    pub fn add(&mut self, mnemonic: &str, arity: usize) -> Result<&Opcode, CatalogError> {
        if !is_identifier(mnemonic) {
            return Err(CatalogError::InvalidMnemonic(mnemonic.to_string()));
        }
        if self.by_mnemonic.contains_key(mnemonic) {
            return Err(CatalogError::DuplicateMnemonic(mnemonic.to_string()));
        }
        let code = u16::try_from(self.opcodes.len()).map_err(|_| CatalogError::TooManyOpcodes)?;
        let pos = self.opcodes.len();
        self.opcodes.push(Opcode {
            mnemonic: mnemonic.to_string(),
            code,
            arity,
        });
        self.by_mnemonic.insert(mnemonic.to_string(), pos);
        Ok(&self.opcodes[pos])
    }

    /// Build a catalog from `(mnemonic, arity)` pairs.
    ///
    /// # Errors
    ///
    /// As for [`InstructionCatalog::add`].
    pub fn from_entries(entries: &[(&str, usize)]) -> Result<InstructionCatalog, CatalogError> {
        let mut catalog = InstructionCatalog::new();
        for (mnemonic, arity) in entries {
            catalog.add(mnemonic, *arity)?;
        }
        Ok(catalog)
    }

    pub fn get(&self, mnemonic: &str) -> Option<&Opcode> {
        self.by_mnemonic.get(mnemonic).map(|pos| &self.opcodes[*pos])
    }

    pub fn contains(&self, mnemonic: &str) -> bool {
        self.by_mnemonic.contains_key(mnemonic)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Opcode> {
        self.opcodes.iter()
    }

    pub fn len(&self) -> usize {
        self.opcodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.opcodes.is_empty()
    }
}
