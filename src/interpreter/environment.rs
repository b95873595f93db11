use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use std::sync::Arc;
use crate::interpreter::object::Object;

/// Scope of variable bindings.
///
/// The parent is held weakly: whoever created the enclosing scope keeps it alive, and a child
/// whose parent has been dropped simply stops seeing outer bindings.
#[derive(Debug, Default)]
pub struct Environment {
    variables: HashMap<String, Arc<Object>>,
    parent: Option<Weak<RefCell<Environment>>>,
}

impl Environment {
    pub fn new_global() -> Rc<RefCell<Environment>> {
        Rc::new(RefCell::new(Environment {
            variables: HashMap::new(),
            parent: None,
        }))
    }

    pub fn new_with_parent(parent: &Rc<RefCell<Environment>>) -> Rc<RefCell<Environment>> {
        Rc::new(RefCell::new(Environment {
            variables: HashMap::new(),
            parent: Some(Rc::downgrade(parent)),
        }))
    }

    /// Looks `name` up in this scope, then in each enclosing scope that is still alive.
    pub fn get(&self, name: &str) -> Option<Arc<Object>> {
        match self.variables.get(name) {
            Some(value) => Some(Arc::clone(value)),
            None => self.parent.as_ref()
                .and_then(Weak::upgrade)
                .and_then(|parent| parent.borrow().get(name)),
        }
    }

    /// Binds `name` in this scope only, replacing an earlier binding in the same scope.
    /// Returns the value that was previously bound here.
    pub fn put_variable(&mut self, name: &str, value: Arc<Object>) -> Option<Arc<Object>> {
        self.variables.insert(name.to_owned(), value)
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.variables.keys().cloned().collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_walks_outward() {
        let global = Environment::new_global();
        global.borrow_mut().put_variable("a", Object::integer(1));

        let child = Environment::new_with_parent(&global);
        child.borrow_mut().put_variable("b", Object::integer(2));

        assert_eq!(Some(Object::integer(1)), child.borrow().get("a"));
        assert_eq!(Some(Object::integer(2)), child.borrow().get("b"));
        assert_eq!(None, global.borrow().get("b"));
        assert_eq!(None, child.borrow().get("c"));
    }

    #[test]
    fn shadowing_leaves_outer_scope_untouched() {
        let global = Environment::new_global();
        global.borrow_mut().put_variable("x", Object::integer(1));

        let child = Environment::new_with_parent(&global);
        child.borrow_mut().put_variable("x", Object::boolean(true));

        assert_eq!(Some(Object::boolean(true)), child.borrow().get("x"));
        assert_eq!(Some(Object::integer(1)), global.borrow().get("x"));
    }

    #[test]
    fn lookup_crosses_several_scopes() {
        let global = Environment::new_global();
        global.borrow_mut().put_variable("x", Object::integer(1));

        let middle = Environment::new_with_parent(&global);
        middle.borrow_mut().put_variable("y", Object::integer(2));
        let inner = Environment::new_with_parent(&middle);

        assert_eq!(Some(Object::integer(1)), inner.borrow().get("x"));
        assert_eq!(Some(Object::integer(2)), inner.borrow().get("y"));
        assert!(middle.borrow().get("z").is_none());
        assert!(inner.borrow().names().is_empty());
    }

    #[test]
    fn rebinding_replaces_value() {
        let global = Environment::new_global();

        assert_eq!(None, global.borrow_mut().put_variable("x", Object::integer(1)));
        assert_eq!(Some(Object::integer(1)), global.borrow_mut().put_variable("x", Object::integer(2)));
        assert_eq!(Some(Object::integer(2)), global.borrow().get("x"));
        assert_eq!(vec![String::from("x")], global.borrow().names());
    }

    #[test]
    fn dropped_parent_is_not_kept_alive() {
        let global = Environment::new_global();
        global.borrow_mut().put_variable("x", Object::integer(1));

        let child = Environment::new_with_parent(&global);
        drop(global);

        assert_eq!(None, child.borrow().get("x"));
    }
}
