use std::collections::BTreeMap;
use std::fmt::{self, Debug, Display, Formatter};

use tracing::{event, Level};

use base::instruction::is_identifier;
use base::prelude::Address;

use super::types::{AssemblerFailure, LineFailure};


/// A symbolic name for an address.
///
/// Declarations are written with a trailing colon (`loop:`) and
/// references may be written with or without one.  Either way the
/// label itself is the bare identifier.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Label(String);

impl Label {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<&str> for Label {
    type Error = LineFailure;

    /// Accepts `name` or `name:`.
    fn try_from(text: &str) -> Result<Label, LineFailure> {
        let name = text.strip_suffix(':').unwrap_or(text);
        if is_identifier(name) {
            Ok(Label(name.to_string()))
        } else {
            Err(LineFailure::InvalidLabel(text.to_string()))
        }
    }
}

impl Display for Label {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl Debug for Label {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Label({})", self.0)
    }
}

/// The address bound to each label declared in a program.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LabelTable {
    definitions: BTreeMap<Label, Address>,
}

impl LabelTable {
    pub fn new() -> LabelTable {
        LabelTable::default()
    }

    /// Bind `label` to `address`.
    ///
    /// # Errors
    ///
    /// Fails if `label` is already bound; the existing binding is
    /// kept.
    pub fn define(&mut self, label: &Label, address: Address) -> Result<(), AssemblerFailure> {
        if self.definitions.contains_key(label) {
            return Err(AssemblerFailure::DuplicateLabel(label.clone()));
        }
        event!(Level::DEBUG, "label {label} is at address {address}");
        self.definitions.insert(label.clone(), address);
        Ok(())
    }

    pub fn get(&self, label: &Label) -> Option<Address> {
        self.definitions.get(label).copied()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Labels in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&Label, &Address)> {
        self.definitions.iter()
    }
}

impl Display for LabelTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (label, address) in self.definitions.iter() {
            writeln!(f, "{label:<20} {address:#06x}")?;
        }
        Ok(())
    }
}
