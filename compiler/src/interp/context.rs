//! Evaluation context and symbol table

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::common::Position;
use crate::diagnostics::{Frame, Traceback};

use super::value::Value;

/// Symbol table shared between a context and the driver that owns it
pub type SharedSymbolTable = Rc<RefCell<SymbolTable>>;

/// Variable bindings with an optional parent table
///
/// Lookups fall through to the parent; writes and removals only touch this
/// table.
#[derive(Debug, Default, Clone)]
pub struct SymbolTable {
    symbols: IndexMap<String, Value>,
    parent: Option<SharedSymbolTable>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parent(parent: SharedSymbolTable) -> Self {
        Self {
            symbols: IndexMap::new(),
            parent: Some(parent),
        }
    }

    /// Wrap this table for sharing
    pub fn shared(self) -> SharedSymbolTable {
        Rc::new(RefCell::new(self))
    }

    /// Look up a name here, then in the parent chain
    pub fn get(&self, name: &str) -> Option<Value> {
        match self.symbols.get(name) {
            Some(value) => Some(*value),
            None => self.parent.as_ref().and_then(|p| p.borrow().get(name)),
        }
    }

    /// Bind a name in this table, replacing any previous binding
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.symbols.insert(name.into(), value);
    }

    /// Remove a binding from this table
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.symbols.shift_remove(name)
    }

    /// Whether this table itself binds `name`
    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Local bindings in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Value)> {
        self.symbols.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// An evaluation frame
#[derive(Debug, Clone)]
pub struct Context {
    pub display_name: String,
    pub symbol_table: SharedSymbolTable,
    pub parent: Option<Rc<Context>>,
    /// Where the parent was when it entered this context
    pub parent_entry_pos: Option<Position>,
}

impl Context {
    /// Top-level context over `symbol_table`
    pub fn new(display_name: impl Into<String>, symbol_table: SharedSymbolTable) -> Self {
        Self {
            display_name: display_name.into(),
            symbol_table,
            parent: None,
            parent_entry_pos: None,
        }
    }

    /// Context entered from `parent` at `entry_pos`
    pub fn child(
        parent: Rc<Context>,
        display_name: impl Into<String>,
        entry_pos: Position,
        symbol_table: SharedSymbolTable,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            symbol_table,
            parent: Some(parent),
            parent_entry_pos: Some(entry_pos),
        }
    }

    /// Frames from the outermost context down to this one, with `pos` as
    /// the location inside this context
    pub fn traceback(&self, file: &str, pos: Position) -> Traceback {
        let mut frames = Vec::new();
        let mut ctx = Some(self);
        let mut pos = Some(pos);

        while let Some(c) = ctx {
            frames.push(Frame {
                file: file.to_string(),
                line: pos.map_or(0, |p| p.line),
                context: c.display_name.clone(),
            });
            pos = c.parent_entry_pos;
            ctx = c.parent.as_deref();
        }

        frames.reverse();
        Traceback { frames }
    }
}
