use std::{any::Any, collections::BTreeMap};

use crate::{container::Container, errors::ResolveError, object::Object};

/// A dependency definition: a value not yet known, to be resolved later
/// against a container.
///
/// The engine ships four definition types - [`Reference`], [`Value`],
/// [`List`] and [`Map`] - but anything implementing this trait can sit in a
/// specification.
///
/// Resolution never mutates the definition. A definition can be resolved any
/// number of times, against any number of containers, with independent
/// results.
pub trait Dependency: Send + Sync {
    /// Removes the indirection: produce the concrete value this definition
    /// stands for, using `container` as the source of named values.
    fn resolve(&self, container: &dyn Container) -> Result<Object, ResolveError>;
}

/// A named reference relative to the container, as a dotted path.
///
/// This is the most common definition type; every bare string in a
/// specification is converted into one during normalization.
pub struct Reference {
    path: String,
}

impl Reference {
    pub fn new(path: impl Into<String>) -> Self {
        Reference { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl Dependency for Reference {
    fn resolve(&self, container: &dyn Container) -> Result<Object, ResolveError> {
        let mut target: Option<Object> = None;
        for segment in self.path.split('.') {
            let next = match target.as_ref() {
                Some(object) => object.lookup(segment),
                None => container.lookup(segment),
            };
            match next {
                Some(object) => target = Some(object),
                None => return Err(ResolveError::not_found(&self.path, segment)),
            }
        }
        // split('.') yields at least one segment, so the loop either returned
        // an error or set the target
        target.ok_or_else(|| ResolveError::not_found(&self.path, &self.path))
    }
}

/// A fixed value, resolved as-is regardless of container.
///
/// This is the escape hatch for literal strings, which would otherwise be
/// normalized into references, and the usual way to pass configuration
/// values.
pub struct Value {
    object: Object,
}

impl Value {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Value {
            object: Object::new(value),
        }
    }

    pub fn from_object(object: Object) -> Self {
        Value { object }
    }
}

impl Dependency for Value {
    fn resolve(&self, _container: &dyn Container) -> Result<Object, ResolveError> {
        Ok(self.object.clone())
    }
}

/// A composite definition resolved into a list, entry by entry in order.
pub struct List {
    entries: Vec<Spec>,
}

impl List {
    pub fn new(entries: Vec<Spec>) -> Self {
        List { entries }
    }
}

impl Dependency for List {
    fn resolve(&self, container: &dyn Container) -> Result<Object, ResolveError> {
        let mut resolved = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            resolved.push(entry.normalize().resolve(container)?);
        }
        Ok(Object::List(resolved))
    }
}

/// A composite definition resolved into a mapping, value by value with the
/// key set unchanged.
pub struct Map {
    entries: BTreeMap<String, Spec>,
}

impl Map {
    pub fn new(entries: BTreeMap<String, Spec>) -> Self {
        Map { entries }
    }
}

impl Dependency for Map {
    fn resolve(&self, container: &dyn Container) -> Result<Object, ResolveError> {
        let mut resolved = BTreeMap::new();
        for (key, entry) in &self.entries {
            resolved.insert(key.clone(), entry.normalize().resolve(container)?);
        }
        Ok(Object::Map(resolved))
    }
}

/// A raw specification entry, as authored by the caller.
///
/// Callers rarely build these directly; the `From` conversions let a
/// specification read as plain values: `"engine.motor".into()` is a
/// reference, `Value::new(42).into()` a fixed value.
pub enum Spec {
    /// Already a definition; normalization keeps it as-is.
    Definition(Box<dyn Dependency>),
    /// A bare string; normalization turns it into a [`Reference`].
    Text(String),
    /// Anything else; normalization turns it into a [`Value`].
    Object(Object),
}

impl Spec {
    /// Wraps an arbitrary payload as a fixed value entry.
    pub fn of<T: Any + Send + Sync>(value: T) -> Self {
        Spec::Object(Object::new(value))
    }

    /// The single coercion rule of the engine: definitions pass through
    /// unchanged, bare strings become container-relative references, anything
    /// else becomes a fixed value.
    pub fn normalize(&self) -> Normalized<'_> {
        match self {
            Spec::Definition(definition) => Normalized::Definition(definition.as_ref()),
            Spec::Text(path) => Normalized::Reference(Reference::new(path.clone())),
            Spec::Object(object) => Normalized::Value(Value::from_object(object.clone())),
        }
    }
}

/// A normalized view of a [`Spec`] entry, itself resolvable.
pub enum Normalized<'a> {
    Definition(&'a dyn Dependency),
    Reference(Reference),
    Value(Value),
}

impl Dependency for Normalized<'_> {
    fn resolve(&self, container: &dyn Container) -> Result<Object, ResolveError> {
        match self {
            Normalized::Definition(definition) => definition.resolve(container),
            Normalized::Reference(reference) => reference.resolve(container),
            Normalized::Value(value) => value.resolve(container),
        }
    }
}

impl From<&str> for Spec {
    fn from(path: &str) -> Self {
        Spec::Text(path.to_string())
    }
}

impl From<String> for Spec {
    fn from(path: String) -> Self {
        Spec::Text(path)
    }
}

impl From<Object> for Spec {
    fn from(object: Object) -> Self {
        Spec::Object(object)
    }
}

impl From<Reference> for Spec {
    fn from(reference: Reference) -> Self {
        Spec::Definition(Box::new(reference))
    }
}

impl From<Value> for Spec {
    fn from(value: Value) -> Self {
        Spec::Definition(Box::new(value))
    }
}

impl From<List> for Spec {
    fn from(list: List) -> Self {
        Spec::Definition(Box::new(list))
    }
}

impl From<Map> for Spec {
    fn from(map: Map) -> Self {
        Spec::Definition(Box::new(map))
    }
}

impl From<Vec<Spec>> for Spec {
    fn from(entries: Vec<Spec>) -> Self {
        List::new(entries).into()
    }
}

impl From<BTreeMap<String, Spec>> for Spec {
    fn from(entries: BTreeMap<String, Spec>) -> Self {
        Map::new(entries).into()
    }
}
