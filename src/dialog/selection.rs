//! Caller-owned selection array kept in sync with bound check boxes

use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;

/// Shared list of selected objects, deduplicated on one property
#[derive(Debug, Clone)]
pub struct Selection {
    items: Rc<RefCell<Vec<Value>>>,
    unique_property: String,
}

impl Selection {
    pub fn new(items: Rc<RefCell<Vec<Value>>>, unique_property: impl Into<String>) -> Self {
        Self {
            items,
            unique_property: unique_property.into(),
        }
    }

    pub fn unique_property(&self) -> &str {
        &self.unique_property
    }

    /// Copy of the current selection
    pub fn items(&self) -> Vec<Value> {
        self.items.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    /// Identity of an object; objects lacking the property compare whole
    fn key<'a>(&self, object: &'a Value) -> &'a Value {
        object.get(&self.unique_property).unwrap_or(object)
    }

    pub fn contains(&self, object: &Value) -> bool {
        let key = self.key(object);
        self.items.borrow().iter().any(|item| self.key(item) == key)
    }

    /// Add `object` when `enabled` and absent, drop every match otherwise
    pub fn sync(&self, object: &Value, enabled: bool) {
        let key = self.key(object).clone();
        let mut items = self.items.borrow_mut();
        if enabled {
            if !items.iter().any(|item| self.key(item) == &key) {
                log::debug!("selection: add {}={}", self.unique_property, key);
                items.push(object.clone());
            }
        } else {
            let before = items.len();
            items.retain(|item| self.key(item) != &key);
            if items.len() != before {
                log::debug!("selection: remove {}={}", self.unique_property, key);
            }
        }
    }
}
