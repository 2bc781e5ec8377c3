//! Lexical scope stack used by the declaration scanner

use tracing::trace;

/// Name of the bottom scope, present for the whole scan.
pub const GLOBAL_SCOPE: &str = "global";

/// Nested lexical scopes, innermost last. The global scope is never popped.
#[derive(Debug, Clone)]
pub struct ScopeStack {
    scopes: Vec<String>,
    next_id: usize,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self {
            scopes: vec![GLOBAL_SCOPE.to_string()],
            next_id: 0,
        }
    }

    /// Enter a block. Function bodies pass the function's name, other blocks
    /// get an auto-numbered `scopeN` tag. The counter advances on every push.
    pub fn push(&mut self, name: Option<&str>) -> &str {
        self.next_id += 1;
        let scope = match name {
            Some(name) => name.to_string(),
            None => format!("scope{}", self.next_id),
        };
        trace!(scope = %scope, depth = self.scopes.len(), "enter scope");
        self.scopes.push(scope);
        self.current()
    }

    /// Leave the innermost block; a stray `}` at global level is ignored.
    pub fn pop(&mut self) {
        if self.scopes.len() > 1 {
            if let Some(scope) = self.scopes.pop() {
                trace!(scope = %scope, "leave scope");
            }
        }
    }

    pub fn current(&self) -> &str {
        self.scopes.last().map_or(GLOBAL_SCOPE, String::as_str)
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_global(&self) -> bool {
        self.scopes.len() == 1
    }
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}
