//! String interner keyed by FNV-1a hash.
//!
//! Each parse context owns one interner. Registering text stores an owned
//! copy under its [`Name`]; downstream code compares names and only comes
//! back here to print.
//!
//! Distinct texts with the same 64-bit hash are not told apart: the newer
//! text replaces the stored one and a warning is logged.

use crate::{keywords, HashTable, Name};

/// Per-context string interner.
#[derive(Clone, Debug)]
pub struct StringInterner {
    strings: HashTable<Option<Box<str>>>,
}

impl StringInterner {
    /// Create a new interner with the reserved identifiers registered.
    pub fn new() -> Self {
        let mut interner = StringInterner {
            strings: HashTable::new(),
        };
        interner.register_keywords();
        interner
    }

    fn register_keywords(&mut self) {
        for text in keywords::RESERVED {
            self.register(text);
        }
    }

    /// Intern `text`, returning its name.
    ///
    /// Registering equal text again is a no-op.
    pub fn register(&mut self, text: &str) -> Name {
        let name = Name::of(text);
        let slot = self.strings.insert(name.raw());
        if let Some(existing) = slot.as_deref() {
            if existing == text {
                return name;
            }
            tracing::warn!(
                hash = name.raw(),
                old = existing,
                new = text,
                "interner hash collision, replacing stored text"
            );
        }
        *slot = Some(text.into());
        name
    }

    /// Look up the text registered for `name`.
    pub fn lookup(&self, name: Name) -> Option<&str> {
        self.strings.get(name.raw()).and_then(|text| text.as_deref())
    }

    /// Whether `name` has registered text.
    pub fn contains(&self, name: Name) -> bool {
        self.lookup(name).is_some()
    }

    /// Number of registered texts.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Forget every text, then register the reserved identifiers again.
    pub fn reset(&mut self) {
        self.strings.clear();
        self.register_keywords();
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

/// Read access to interned text.
pub trait StringLookup {
    /// Look up the string for an interned name.
    fn lookup(&self, name: Name) -> Option<&str>;

    /// Text for `name`, or a hex placeholder if it was never registered.
    fn display_name(&self, name: Name) -> String {
        match self.lookup(name) {
            Some(text) => text.to_owned(),
            None => format!("#{:016x}", name.raw()),
        }
    }
}

impl StringLookup for StringInterner {
    fn lookup(&self, name: Name) -> Option<&str> {
        StringInterner::lookup(self, name)
    }
}
