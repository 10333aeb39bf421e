use std::{any::Any, collections::BTreeMap, fmt::Debug, sync::Arc};

use crate::{container::Container, errors::CastError};

/// All errors must be Send + Sync so they can cross the factory boundary
pub type DynError = Box<dyn std::error::Error + Send + Sync>;

/// A resolved value moving through the engine.
///
/// The engine itself is untyped: containers hand out `Object`s, definitions
/// resolve into `Object`s and factories consume them. Payloads the engine
/// never inspects travel as [`Object::Opaque`]; values that support further
/// attribute lookup (what dotted reference paths descend through) travel as
/// [`Object::Namespace`].
#[derive(Clone)]
pub enum Object {
    /// An arbitrary payload, not inspectable by the engine.
    Opaque(Payload),
    /// A namespace supporting further attribute lookup.
    Namespace(Arc<dyn Container>),
    /// A resolved composite sequence.
    List(Vec<Object>),
    /// A resolved composite mapping.
    Map(BTreeMap<String, Object>),
}

impl Object {
    /// Wraps an arbitrary payload.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Object::Opaque(Payload::new(value))
    }

    /// Wraps a container so references can descend into it.
    pub fn namespace<C: Container + 'static>(container: C) -> Self {
        Object::Namespace(Arc::new(container))
    }

    /// Attempts to get the payload back as its concrete type.
    pub fn downcast<T: Any + Send + Sync>(&self) -> Result<Arc<T>, CastError> {
        match self {
            Object::Opaque(payload) => payload.downcast(),
            other => Err(CastError {
                required: std::any::type_name::<T>(),
                actual: other.kind(),
            }),
        }
    }

    /// Looks up an attribute on this value.
    ///
    /// Only the [`Object::Namespace`] variant supports lookup; every other
    /// variant yields `None`, which a reference walk reports as a missing
    /// segment.
    pub fn lookup(&self, name: &str) -> Option<Object> {
        match self {
            Object::Namespace(container) => container.lookup(name),
            _ => None,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Object::Opaque(payload) => payload.type_name,
            Object::Namespace(_) => "namespace",
            Object::List(_) => "list",
            Object::Map(_) => "map",
        }
    }
}

impl Debug for Object {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Object::Opaque(payload) => f.debug_tuple("Opaque").field(&payload.type_name).finish(),
            Object::Namespace(_) => f.write_str("Namespace"),
            Object::List(entries) => f.debug_tuple("List").field(&entries.len()).finish(),
            Object::Map(entries) => f.debug_tuple("Map").field(&entries.len()).finish(),
        }
    }
}

/// An opaque payload together with the name of its concrete type, so a failed
/// downcast can name both sides.
#[derive(Clone)]
pub struct Payload {
    pub type_name: &'static str,
    value: Arc<dyn Any + Send + Sync>,
}

impl Payload {
    pub(crate) fn new<T: Any + Send + Sync>(value: T) -> Self {
        Payload {
            type_name: std::any::type_name::<T>(),
            value: Arc::new(value),
        }
    }

    pub fn downcast<T: Any + Send + Sync>(&self) -> Result<Arc<T>, CastError> {
        match Arc::downcast::<T>(self.value.clone()) {
            Ok(downcasted) => Ok(downcasted),
            Err(_) => Err(CastError {
                required: std::any::type_name::<T>(),
                actual: self.type_name,
            }),
        }
    }
}
