use std::collections::BTreeMap;

use crate::{
    container::Container,
    dependency::{Dependency, Spec},
    errors::{AssignError, InjectError},
    object::{DynError, Object},
};

/// An object whose attributes the engine can assign after construction.
///
/// Targets decide which names they accept and which value types fit; a
/// rejection surfaces as [`AssignError`] and aborts the enclosing inject
/// call.
pub trait Target {
    fn set_attr(&mut self, name: &str, value: Object) -> Result<(), AssignError>;
}

/// The specification for one injection: positional factory arguments plus
/// named attributes assigned after construction.
///
/// Attribute names are unique; assigning the same name twice keeps the last
/// definition. Attributes are assigned in name order, and no attribute
/// resolution can observe another attribute assigned by the same call.
#[derive(Default)]
pub struct InjectionSpec {
    pub(crate) args: Vec<Spec>,
    pub(crate) attrs: BTreeMap<String, Spec>,
}

impl InjectionSpec {
    pub fn new() -> Self {
        InjectionSpec::default()
    }

    /// Appends a positional argument definition.
    pub fn arg(mut self, spec: impl Into<Spec>) -> Self {
        self.args.push(spec.into());
        self
    }

    /// Adds a named attribute definition.
    pub fn attr(mut self, name: impl Into<String>, spec: impl Into<Spec>) -> Self {
        self.attrs.insert(name.into(), spec.into());
        self
    }
}

/// Produces a target by injecting its dependencies.
///
/// Every positional definition in `spec` is resolved against `container` in
/// order, the factory is called exactly once with the resolved arguments,
/// and every named definition is resolved and assigned as an attribute of
/// the constructed target.
///
/// Failure leaves no partial result: a resolution failure on a positional
/// argument means the factory is never called, and a factory failure means
/// no attribute is assigned. A rejected attribute assignment aborts the call
/// after earlier names may already have been written - there is no rollback.
pub fn inject<F, T>(
    factory: F,
    container: &dyn Container,
    spec: &InjectionSpec,
) -> Result<T, InjectError>
where
    F: FnOnce(Vec<Object>) -> Result<T, DynError>,
    T: Target,
{
    let mut args = Vec::with_capacity(spec.args.len());
    for entry in &spec.args {
        args.push(entry.normalize().resolve(container)?);
    }
    tracing::debug!("resolved {} positional arguments", args.len());

    let mut target = factory(args).map_err(InjectError::Factory)?;
    tracing::debug!("constructed target instance");

    for (name, entry) in &spec.attrs {
        let value = entry.normalize().resolve(container)?;
        target
            .set_attr(name, value)
            .map_err(|source| InjectError::AttributeAssign {
                name: name.clone(),
                source,
            })?;
    }

    Ok(target)
}
