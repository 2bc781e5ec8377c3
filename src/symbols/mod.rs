//! Symbol table with first-writer-wins merge semantics
//!
//! Every name gets one [`Symbol`], created on its first insertion and only
//! updated in place afterwards. The first insertion fixes the symbol's
//! `index` (its position in first-seen order) and whatever attributes it
//! carried; later insertions bump `occurrences` and fill in attributes that
//! are still missing, but never overwrite one.
//!
//! `references` is a separate tally of identifier uses. It never creates a
//! symbol and never touches `occurrences`.

use rustc_hash::FxHashMap;
use std::fmt;

/// What kind of construct introduced or referenced a symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclKind {
    Function,
    Parameter,
    Variable,
    Call,
}

impl DeclKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DeclKind::Function => "func",
            DeclKind::Parameter => "param",
            DeclKind::Variable => "var",
            DeclKind::Call => "call",
        }
    }
}

impl fmt::Display for DeclKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub name: String,
    pub kind: Option<DeclKind>,
    pub declared_type: Option<String>,
    pub scope: Option<String>,
    pub first_decl_line: Option<u32>,
    pub occurrences: u32,
    /// `ID` tokens spelling this name anywhere in the source.
    pub references: u32,
    /// 1-based position in first-insertion order; never changes.
    pub index: u32,
}

/// Optional attributes passed along with an insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolAttrs {
    pub kind: Option<DeclKind>,
    pub declared_type: Option<String>,
    pub scope: Option<String>,
    pub line: Option<u32>,
}

impl SymbolAttrs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(mut self, kind: DeclKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn declared_type(mut self, ty: impl Into<String>) -> Self {
        self.declared_type = Some(ty.into());
        self
    }

    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    pub fn line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }
}

/// Name → [`Symbol`] mapping that only grows.
///
/// Symbols are stored in insertion order, so iterating the backing vector is
/// iterating by `index`.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    by_name: FxHashMap<String, usize>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence of `name`.
    ///
    /// The first call allocates the next index and stores `attrs` as given.
    /// Later calls increment `occurrences` and back-fill only the fields that
    /// are still `None`.
    pub fn add(&mut self, name: &str, attrs: SymbolAttrs) -> &Symbol {
        let slot = match self.by_name.get(name) {
            Some(&slot) => {
                let sym = &mut self.symbols[slot];
                sym.occurrences += 1;
                if sym.first_decl_line.is_none() {
                    sym.first_decl_line = attrs.line;
                }
                if sym.kind.is_none() {
                    sym.kind = attrs.kind;
                }
                if sym.declared_type.is_none() {
                    sym.declared_type = attrs.declared_type;
                }
                if sym.scope.is_none() {
                    sym.scope = attrs.scope;
                }
                slot
            }
            None => {
                let slot = self.symbols.len();
                self.symbols.push(Symbol {
                    name: name.to_string(),
                    kind: attrs.kind,
                    declared_type: attrs.declared_type,
                    scope: attrs.scope,
                    first_decl_line: attrs.line,
                    occurrences: 1,
                    references: 0,
                    index: slot as u32 + 1,
                });
                self.by_name.insert(name.to_string(), slot);
                slot
            }
        };
        &self.symbols[slot]
    }

    /// Count one use of `name`. Unknown names are ignored; returns whether
    /// the name had a symbol.
    pub fn note_reference(&mut self, name: &str) -> bool {
        match self.by_name.get(name) {
            Some(&slot) => {
                self.symbols[slot].references += 1;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.by_name.get(name).map(|&slot| &self.symbols[slot])
    }

    /// All symbols ordered by `index`.
    pub fn items(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Symbol> {
        self.symbols.iter()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl<'a> IntoIterator for &'a SymbolTable {
    type Item = &'a Symbol;
    type IntoIter = std::slice::Iter<'a, Symbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_first_insertion_allocates_index() {
        let mut table = SymbolTable::new();
        let x = table.add("x", SymbolAttrs::new().kind(DeclKind::Variable).line(3));
        assert_eq!(x.index, 1);
        assert_eq!(x.occurrences, 1);
        assert_eq!(x.first_decl_line, Some(3));

        let y = table.add("y", SymbolAttrs::new());
        assert_eq!(y.index, 2);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_first_writer_wins() {
        let mut table = SymbolTable::new();
        table.add(
            "x",
            SymbolAttrs::new()
                .kind(DeclKind::Variable)
                .declared_type("int")
                .line(1),
        );
        let x = table.add(
            "x",
            SymbolAttrs::new()
                .kind(DeclKind::Function)
                .declared_type("char")
                .scope("main")
                .line(9),
        );

        assert_eq!(x.occurrences, 2);
        assert_eq!(x.index, 1);
        assert_eq!(x.kind, Some(DeclKind::Variable));
        assert_eq!(x.declared_type.as_deref(), Some("int"));
        assert_eq!(x.first_decl_line, Some(1));
        // scope was unset, so the second insertion back-fills it
        assert_eq!(x.scope.as_deref(), Some("main"));
    }

    #[test]
    fn test_items_follow_insertion_order() {
        let mut table = SymbolTable::new();
        for name in ["c", "a", "b", "a", "c"] {
            table.add(name, SymbolAttrs::new());
        }
        let names: Vec<&str> = table.items().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["c", "a", "b"]);
        let indices: Vec<u32> = table.iter().map(|s| s.index).collect();
        assert_eq!(indices, [1, 2, 3]);
        assert_eq!(table.get("a").map(|s| s.occurrences), Some(2));
    }

    #[test]
    fn test_references_are_counted_separately() {
        let mut table = SymbolTable::new();
        table.add("x", SymbolAttrs::new().kind(DeclKind::Variable));
        assert!(table.note_reference("x"));
        assert!(table.note_reference("x"));
        assert!(!table.note_reference("y"));

        let x = table.get("x").expect("x registered");
        assert_eq!(x.references, 2);
        assert_eq!(x.occurrences, 1);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_get_is_pure() {
        let mut table = SymbolTable::new();
        table.add("x", SymbolAttrs::new());
        assert_eq!(table.get("x").map(|s| s.occurrences), Some(1));
        assert_eq!(table.get("x").map(|s| s.occurrences), Some(1));
        assert!(table.get("missing").is_none());
    }
}
