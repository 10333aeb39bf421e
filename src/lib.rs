//! Aurora DI resolves declarative dependency specifications against a
//! container and produces fully constructed target objects.
//!
//! A specification describes what an object needs - its positional
//! constructor arguments and post-construction attributes - as a tree of
//! dependency definitions. Resolution walks that tree against a container
//! (any namespace of available values) and materializes the target, keeping
//! "what an object needs" separate from "how those needs are supplied".
//!
//! Aurora DI is split into the following parts:
//!
//! 1. Dependency definitions: [`Reference`], [`Value`], [`List`] and [`Map`],
//!    plus the [`Spec`] coercion rule that turns raw entries into definitions
//! 2. [`Container`]: the lookup contract a namespace has to satisfy, with
//!    [`Namespace`] as a ready-made implementation
//! 3. [`inject`]: resolves a whole [`InjectionSpec`] and builds the target
//! 4. [`LazyTarget`]: a per-instance memoizing accessor around one
//!    specification
//!
//! # Examples
//!
//! ```rust
//! use aurora_di::{inject, AssignError, InjectionSpec, Namespace, Object, Target};
//!
//! struct Greeter {
//!     text: String,
//! }
//!
//! impl Target for Greeter {
//!     fn set_attr(&mut self, name: &str, value: Object) -> Result<(), AssignError> {
//!         match name {
//!             "text" => self.text = value.downcast::<String>()?.as_ref().clone(),
//!             other => return Err(AssignError::NoSuchAttribute(other.to_string())),
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let container = Namespace::new().with("greeting", Object::new("hello".to_string()));
//!
//! // A bare string is a container lookup; a literal needs Value.
//! let spec = InjectionSpec::new()
//!     .attr("text", "greeting");
//!
//! let greeter: Greeter = inject(
//!     |_| Ok(Greeter { text: String::new() }),
//!     &container,
//!     &spec,
//! )
//! .unwrap();
//!
//! assert_eq!(greeter.text, "hello");
//! ```

pub mod container;
pub mod dependency;
pub mod errors;
pub mod inject;
pub mod lazy;
pub mod object;

pub use container::{Container, Namespace};
pub use dependency::{Dependency, List, Map, Normalized, Reference, Spec, Value};
pub use errors::{AssignError, CastError, InjectError, ResolveError};
pub use inject::{inject, InjectionSpec, Target};
pub use lazy::LazyTarget;
pub use object::{DynError, Object, Payload};
