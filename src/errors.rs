use thiserror::Error;

use crate::object::DynError;

/// Errors while resolving a dependency definition against a container
#[derive(Error, Debug, Clone)]
pub enum ResolveError {
    /// A reference path died at `segment`
    #[error("reference '{path}' cannot be resolved: no attribute '{segment}'")]
    ReferenceNotFound { path: String, segment: String },
}

impl ResolveError {
    pub(crate) fn not_found(path: &str, segment: &str) -> Self {
        ResolveError::ReferenceNotFound {
            path: path.to_string(),
            segment: segment.to_string(),
        }
    }
}

/// A payload could not be downcast to the requested concrete type
#[derive(Error, Debug, Clone)]
#[error("failed to downcast, required: '{required}' actual: '{actual}'")]
pub struct CastError {
    pub required: &'static str,
    pub actual: &'static str,
}

/// Errors a target may raise when an attribute is assigned to it
#[derive(Error, Debug, Clone)]
pub enum AssignError {
    /// The target has no attribute under that name
    #[error("target has no attribute '{0}'")]
    NoSuchAttribute(String),
    /// The value's type does not fit the attribute
    #[error(transparent)]
    Cast(#[from] CastError),
    /// Target-specific rejection
    #[error("{0}")]
    Other(String),
}

/// Errors surfacing from a whole [`inject`](crate::inject::inject) call
#[derive(Error, Debug)]
pub enum InjectError {
    /// A definition failed to resolve; the factory was not called if this
    /// happened on a positional argument
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    /// The target factory failed - the error is passed through untouched
    #[error("factory failed - error: {0:?}")]
    Factory(DynError),
    /// The constructed target rejected a named attribute; earlier names may
    /// already have been assigned
    #[error("could not assign attribute '{name}': {source}")]
    AttributeAssign { name: String, source: AssignError },
}
