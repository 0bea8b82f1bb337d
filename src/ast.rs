//! Compiled signatures: entries, field configurations and the ordered entry store.

use crate::catalog::FieldId;
use crate::value::EncodedValue;
use std::collections::HashMap;

/// One field's value within an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldConfig {
    pub field: FieldId,
    pub value: EncodedValue,
}

impl FieldConfig {
    pub fn new(field: FieldId, value: EncodedValue) -> Self {
        FieldConfig { field, value }
    }

    /// Catalog index of the field.
    pub fn index(&self) -> usize {
        self.field.index()
    }

    pub fn bytes(&self) -> Vec<u8> {
        self.value.to_bytes()
    }

    /// Length of [`FieldConfig::bytes`].
    pub fn len(&self) -> usize {
        self.value.byte_len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A named packet template. Fields are kept in declaration order; `signature` is not among them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureEntry {
    pub name: String,
    pub fields: Vec<FieldConfig>,
}

impl SignatureEntry {
    pub fn new(name: impl Into<String>) -> Self {
        SignatureEntry {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn get(&self, field: FieldId) -> Option<&FieldConfig> {
        self.fields.iter().find(|c| c.field == field)
    }

    pub fn value(&self, field: FieldId) -> Option<&EncodedValue> {
        self.get(field).map(|c| &c.value)
    }

    pub fn has(&self, field: FieldId) -> bool {
        self.get(field).is_some()
    }
}

/// Ordered collection of entries with lookup by name.
#[derive(Debug, Clone, Default)]
pub struct SignatureSet {
    entries: Vec<SignatureEntry>,
    by_name: HashMap<String, usize>,
}

impl SignatureSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. Gives it back if the name is already taken.
    pub fn push(&mut self, entry: SignatureEntry) -> Result<(), SignatureEntry> {
        if self.by_name.contains_key(&entry.name) {
            return Err(entry);
        }
        self.by_name.insert(entry.name.clone(), self.entries.len());
        self.entries.push(entry);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&SignatureEntry> {
        self.by_name.get(name).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SignatureEntry> {
        self.entries.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn entries(&self) -> &[SignatureEntry] {
        &self.entries
    }
}

impl IntoIterator for SignatureSet {
    type Item = SignatureEntry;
    type IntoIter = std::vec::IntoIter<SignatureEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a SignatureSet {
    type Item = &'a SignatureEntry;
    type IntoIter = std::slice::Iter<'a, SignatureEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
