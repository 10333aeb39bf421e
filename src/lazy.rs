use std::{
    collections::HashMap,
    marker::PhantomData,
    sync::{Arc, Mutex},
};

use crate::{
    container::Container,
    errors::InjectError,
    inject::{inject, InjectionSpec, Target},
    object::{DynError, Object},
};

/// A reusable accessor that builds its target on first read, once per owning
/// instance, using the owning instance itself as the container.
///
/// The accessor is bound at creation to a factory and an injection
/// specification. [`LazyTarget::get`] returns the cached target for an
/// instance it has seen before and injects a fresh one otherwise; across two
/// reads for the same instance the factory runs exactly once and both reads
/// return the identical target.
///
/// The cache is keyed by instance address and owned by the accessor. Entries
/// are never evicted, so owning instances must stay alive as long as the
/// accessor is in use - an instance dropped and another allocated at the same
/// address would be handed the stale target. The check-then-populate sequence
/// holds a lock across the first build: concurrent first reads for one
/// instance serialize and inject exactly once. A failed build caches nothing;
/// the next read retries.
pub struct LazyTarget<C, T> {
    factory: Box<dyn Fn(Vec<Object>) -> Result<T, DynError> + Send + Sync>,
    spec: InjectionSpec,
    cache: Mutex<HashMap<usize, Arc<T>>>,
    _owner: PhantomData<fn(&C)>,
}

impl<C, T> LazyTarget<C, T>
where
    C: Container,
    T: Target,
{
    pub fn new(
        factory: impl Fn(Vec<Object>) -> Result<T, DynError> + Send + Sync + 'static,
        spec: InjectionSpec,
    ) -> Self {
        LazyTarget {
            factory: Box::new(factory),
            spec,
            cache: Mutex::new(HashMap::new()),
            _owner: PhantomData,
        }
    }

    /// Returns the target for `instance`, injecting it on first read.
    pub fn get(&self, instance: &C) -> Result<Arc<T>, InjectError> {
        let key = instance as *const C as usize;

        let mut cache = self.cache.lock().unwrap();
        if let Some(existing) = cache.get(&key) {
            return Ok(existing.clone());
        }

        tracing::debug!("injecting lazy target for a new owning instance");
        let built = Arc::new(inject(|args| (self.factory)(args), instance, &self.spec)?);
        cache.insert(key, built.clone());
        Ok(built)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::{container::Namespace, errors::AssignError};

    #[derive(Debug, Default)]
    struct Session {
        greeting: String,
    }

    impl Target for Session {
        fn set_attr(&mut self, name: &str, value: Object) -> Result<(), AssignError> {
            match name {
                "greeting" => self.greeting = value.downcast::<String>()?.as_ref().clone(),
                other => return Err(AssignError::NoSuchAttribute(other.to_string())),
            }
            Ok(())
        }
    }

    #[test]
    fn repeated_reads_return_the_identical_target() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        let accessor: LazyTarget<Namespace, Session> = LazyTarget::new(
            move |_| {
                seen.fetch_add(1, Ordering::SeqCst);
                Ok(Session::default())
            },
            InjectionSpec::new().attr("greeting", "greeting"),
        );

        let instance = Namespace::new().with("greeting", Object::new("hello".to_string()));

        let first = accessor.get(&instance).unwrap();
        let second = accessor.get(&instance).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.greeting, "hello");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn distinct_instances_get_distinct_targets() {
        let accessor: LazyTarget<Namespace, Session> = LazyTarget::new(
            |_| Ok(Session::default()),
            InjectionSpec::new().attr("greeting", "greeting"),
        );

        let a = Namespace::new().with("greeting", Object::new("hi".to_string()));
        let b = Namespace::new().with("greeting", Object::new("hey".to_string()));

        let target_a = accessor.get(&a).unwrap();
        let target_b = accessor.get(&b).unwrap();

        assert!(!Arc::ptr_eq(&target_a, &target_b));
        assert_eq!(target_a.greeting, "hi");
        assert_eq!(target_b.greeting, "hey");
    }

    #[test]
    fn failed_builds_are_not_cached() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        let accessor: LazyTarget<Namespace, Session> = LazyTarget::new(
            move |_| {
                seen.fetch_add(1, Ordering::SeqCst);
                Err("not ready".into())
            },
            InjectionSpec::new(),
        );

        let instance = Namespace::new();
        assert!(accessor.get(&instance).is_err());
        assert!(accessor.get(&instance).is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
