use std::collections::HashMap;

/// The key of an interned name.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SymbolId(u32);

/// A store of atom names.
///
/// Interning the same name twice returns the same [SymbolId], so id comparison stands in for string comparison throughout the library.
#[derive(Default)]
pub struct SymbolDB {
    names: Vec<String>,
    ids: HashMap<String, SymbolId>,
}

impl SymbolDB {
    /// The canonical id of `name`.
    pub fn intern(&mut self, name: &str) -> SymbolId {
        if let Some(id) = self.ids.get(name) {
            return *id;
        }

        let id = SymbolId(self.names.len() as u32);
        self.names.push(name.to_owned());
        self.ids.insert(name.to_owned(), id);
        id
    }

    /// The name stored under `id`.
    ///
    /// # Panics
    /// If `id` was not issued by this database.
    pub fn name(&self, id: SymbolId) -> &str {
        &self.names[id.0 as usize]
    }

    /// The id of `name`, if `name` has been interned.
    pub fn id(&self, name: &str) -> Option<SymbolId> {
        self.ids.get(name).copied()
    }

    /// A count of interned names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True if no name has been interned.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
