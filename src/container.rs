use std::collections::BTreeMap;

use crate::object::Object;

/// The namespace a specification is resolved against.
///
/// A container is anything that can look up a single attribute by name.
/// Dotted reference paths are iterated lookups: the first segment is looked
/// up here, every further segment on the previous result.
pub trait Container: Send + Sync {
    fn lookup(&self, name: &str) -> Option<Object>;
}

/// A ready-made map-backed container.
///
/// Nesting works through values: store an inner namespace with
/// [`Object::namespace`] and dotted paths will descend into it.
#[derive(Default)]
pub struct Namespace {
    entries: BTreeMap<String, Object>,
}

impl Namespace {
    pub fn new() -> Self {
        Namespace {
            entries: BTreeMap::new(),
        }
    }

    /// Adds an attribute, consuming and returning the namespace for chaining.
    pub fn with(mut self, name: impl Into<String>, value: Object) -> Self {
        self.entries.insert(name.into(), value);
        self
    }

    /// Adds or replaces an attribute in place.
    pub fn set(&mut self, name: impl Into<String>, value: Object) -> &mut Self {
        self.entries.insert(name.into(), value);
        self
    }
}

impl Container for Namespace {
    fn lookup(&self, name: &str) -> Option<Object> {
        self.entries.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_returns_stored_attributes() {
        let ns = Namespace::new().with("greeting", Object::new("hello".to_string()));
        let found = ns.lookup("greeting").unwrap();
        assert_eq!(*found.downcast::<String>().unwrap(), "hello");
        assert!(ns.lookup("missing").is_none());
    }

    #[test]
    fn nested_namespaces_are_reachable_through_values() {
        let inner = Namespace::new().with("port", Object::new(8080_u16));
        let outer = Namespace::new().with("server", Object::namespace(inner));

        let server = outer.lookup("server").unwrap();
        let port = server.lookup("port").unwrap();
        assert_eq!(*port.downcast::<u16>().unwrap(), 8080);
    }
}
