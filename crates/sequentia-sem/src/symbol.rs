//! Symbol table types (C3).
//!
//! Scoping is flat, not lexical: a name assigned inside an `if`/`for` body
//! remains visible after the block ends, mirroring the single `self.sym`
//! dict the reference analyzer threads through every `check_*` call.

use sequentia_par::PatternKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymType {
    Int,
    Array,
}

impl SymType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SymType::Int => "int",
            SymType::Array => "array",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub name: String,
    pub ty: SymType,
    /// Statically known array length, when it could be determined.
    pub length: Option<i64>,
    /// The generating pattern, for symbols assigned directly from a
    /// `pattern ...` expression.
    pub pattern: Option<PatternKind>,
}

impl Symbol {
    pub fn scalar(name: impl Into<String>) -> Self {
        Symbol {
            name: name.into(),
            ty: SymType::Int,
            length: None,
            pattern: None,
        }
    }

    pub fn array(name: impl Into<String>, length: Option<i64>) -> Self {
        Symbol {
            name: name.into(),
            ty: SymType::Array,
            length,
            pattern: None,
        }
    }
}

/// Insertion-ordered name -> symbol map. Order matters: the driver's
/// symbol-table report (C7) lists symbols in declaration order.
#[derive(Debug, Default, Clone)]
pub struct SymbolTable {
    entries: indexmap::IndexMap<String, Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, symbol: Symbol) {
        self.entries.insert(symbol.name.clone(), symbol);
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
