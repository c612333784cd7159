use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::object::Object;

/// One frame of the lexical scope chain. Cloning yields another handle to
/// the same frame.
#[derive(Clone)]
pub struct Scope {
    scope_ptr: Rc<RefCell<ScopeData>>,
}

struct ScopeData {
    values: HashMap<String, Object>,
    parent: Option<Scope>,
}

impl Scope {
    pub fn new() -> Self {
        Self::from_data(None)
    }

    pub fn with_parent(parent: &Scope) -> Self {
        Self::from_data(Some(parent.clone()))
    }

    fn from_data(parent: Option<Scope>) -> Self {
        let data = ScopeData {
            values: HashMap::new(),
            parent,
        };
        Scope {
            scope_ptr: Rc::new(RefCell::new(data)),
        }
    }

    /// Looks the name up in this frame and then its ancestors.
    pub fn get(&self, name: &str) -> Option<Object> {
        let data = self.scope_ptr.borrow();
        match data.values.get(name) {
            Some(value) => Some(value.clone()),
            None => data.parent.as_ref().and_then(|parent| parent.get(name)),
        }
    }

    pub fn get_current(&self, name: &str) -> Option<Object> {
        self.scope_ptr.borrow().values.get(name).cloned()
    }

    /// Binds in this frame, shadowing any ancestor binding.
    pub fn define(&self, name: String, value: Object) {
        self.scope_ptr.borrow_mut().values.insert(name, value);
    }

    /// Overwrites the nearest existing binding. Returns false when no frame
    /// in the chain binds the name.
    pub fn reset(&self, name: &str, value: Object) -> bool {
        let mut data = self.scope_ptr.borrow_mut();
        if let Some(slot) = data.values.get_mut(name) {
            *slot = value;
            return true;
        }
        match &data.parent {
            Some(parent) => parent.reset(name, value),
            None => false,
        }
    }

    /// Removes the nearest binding of the name, returning its value.
    pub fn delete(&self, name: &str) -> Option<Object> {
        let mut data = self.scope_ptr.borrow_mut();
        if let Some(value) = data.values.remove(name) {
            return Some(value);
        }
        match &data.parent {
            Some(parent) => parent.delete(name),
            None => None,
        }
    }
}

impl Default for Scope {
    fn default() -> Self {
        Scope::new()
    }
}
