//! Symbol table for declared variables

use crate::types::Type;
use std::collections::HashMap;

/// Declared variables of a checking session
///
/// Names are declared once and never removed. Checking only ever borrows the
/// table immutably, so a table shared across threads is read-only for as long
/// as any checker holds it.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: HashMap<String, Type>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `name` with type `ty`.
    ///
    /// Returns `false` and leaves the table untouched if `name` is already
    /// declared.
    pub fn declare(&mut self, name: impl Into<String>, ty: Type) -> bool {
        let name = name.into();
        if self.symbols.contains_key(&name) {
            return false;
        }
        self.symbols.insert(name, ty);
        true
    }

    /// Look up the declared type of `name`
    pub fn lookup(&self, name: &str) -> Option<Type> {
        self.symbols.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Declared symbols ordered by name
    pub fn iter(&self) -> impl Iterator<Item = (&str, Type)> {
        let mut entries: Vec<_> = self.symbols.iter().map(|(n, t)| (n.as_str(), *t)).collect();
        entries.sort_unstable_by_key(|(name, _)| *name);
        entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declare_and_lookup() {
        let mut table = SymbolTable::new();
        assert!(table.is_empty());
        assert!(table.declare("x", Type::Int));
        assert!(table.declare("msg", Type::String));

        assert_eq!(table.lookup("x"), Some(Type::Int));
        assert_eq!(table.lookup("msg"), Some(Type::String));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_redeclaration_rejected() {
        let mut table = SymbolTable::new();
        assert!(table.declare("x", Type::Int));
        assert!(!table.declare("x", Type::Float));
        assert!(!table.declare("x", Type::Int));

        assert_eq!(table.lookup("x"), Some(Type::Int));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_unknown_name_is_absent() {
        let table = SymbolTable::new();
        assert_eq!(table.lookup("nope"), None);
        assert!(!table.contains("nope"));
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let mut table = SymbolTable::new();
        table.declare("x", Type::Char);
        assert_eq!(table.lookup("X"), None);
    }

    #[test]
    fn test_iter_sorted() {
        let mut table = SymbolTable::new();
        table.declare("y", Type::Float);
        table.declare("c", Type::Char);
        table.declare("x", Type::Int);

        let names: Vec<_> = table.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["c", "x", "y"]);
    }
}
