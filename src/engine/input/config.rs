// Input binding table and remapping

use super::action::{default_bindings, Action, InputSource};
use std::collections::HashMap;

/// Maps input sources (keys/buttons) to actions
#[derive(Debug, Clone)]
pub struct InputBindings {
    bindings: HashMap<InputSource, Action>,
}

impl InputBindings {
    /// Create an empty binding table
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Create a table from a list of bindings
    pub fn from_bindings(bindings: Vec<(InputSource, Action)>) -> Self {
        let mut table = Self::new();
        for (source, action) in bindings {
            table.bind(source, action);
        }
        table
    }

    /// Bind an input source to an action, replacing any previous binding of the source
    pub fn bind(&mut self, source: InputSource, action: Action) {
        self.bindings.insert(source, action);
    }

    /// Get the action bound to an input source
    pub fn get_action(&self, source: InputSource) -> Option<Action> {
        self.bindings.get(&source).copied()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Default for InputBindings {
    fn default() -> Self {
        Self::from_bindings(default_bindings())
    }
}
