//! `PropertySet` for pass-to-pass communication.
//!
//! Passes publish what they learned or did as typed values keyed by their
//! Rust type, and later passes (or the caller) read them back.
//!
//! ```
//! use knit_compile::PropertySet;
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct WiresVisited(usize);
//!
//! let mut props = PropertySet::new();
//! props.get_or_default::<WiresVisited>().0 += 3;
//! assert_eq!(props.get::<WiresVisited>(), Some(&WiresVisited(3)));
//! ```

use rustc_hash::FxHashMap;
use std::any::{Any, TypeId};

/// Type-keyed storage shared by all passes in a pipeline.
#[derive(Debug, Default)]
pub struct PropertySet {
    custom: FxHashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl PropertySet {
    /// Create a new empty property set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a property, replacing any previous value of the same type.
    pub fn insert<T: Any + Send + Sync>(&mut self, value: T) {
        self.custom.insert(TypeId::of::<T>(), Box::new(value));
    }

    /// Get a property.
    pub fn get<T: Any>(&self) -> Option<&T> {
        self.custom
            .get(&TypeId::of::<T>())
            .and_then(|v| v.downcast_ref())
    }

    /// Get a mutable property.
    pub fn get_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.custom
            .get_mut(&TypeId::of::<T>())
            .and_then(|v| v.downcast_mut())
    }

    /// Get a mutable property, inserting `T::default()` first if absent.
    pub fn get_or_default<T: Any + Send + Sync + Default>(&mut self) -> &mut T {
        let slot = self
            .custom
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(T::default()));
        slot.downcast_mut()
            .expect("property slot keyed by TypeId must hold that type")
    }

    /// Check whether a property of type `T` is present.
    pub fn contains<T: Any>(&self) -> bool {
        self.custom.contains_key(&TypeId::of::<T>())
    }

    /// Remove a property.
    pub fn remove<T: Any>(&mut self) -> Option<T> {
        self.custom
            .remove(&TypeId::of::<T>())
            .and_then(|v| v.downcast().ok())
            .map(|v| *v)
    }
}
