//! Typed, clonable markers attached to room plan slots.
//!
//! A slot's component set is keyed by the concrete tag type: inserting a tag
//! of a type already present replaces the old value. Tags are opaque to the
//! engine; later filters and steps use them to require or exclude slots.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;

/// A polymorphic marker stored in a [`ComponentSet`]. Implemented for free by
/// any `Clone + Debug + 'static` type.
pub trait RoomComponent: Any + fmt::Debug {
    fn clone_component(&self) -> Box<dyn RoomComponent>;
    fn as_any(&self) -> &dyn Any;
}

impl<T> RoomComponent for T
where
    T: Any + Clone + fmt::Debug,
{
    fn clone_component(&self) -> Box<dyn RoomComponent> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Tag collection with replace-by-type insertion semantics.
#[derive(Debug, Default)]
pub struct ComponentSet {
    entries: HashMap<TypeId, Box<dyn RoomComponent>>,
}

impl Clone for ComponentSet {
    fn clone(&self) -> Self {
        let entries = self
            .entries
            .iter()
            .map(|(type_id, component)| (*type_id, (**component).clone_component()))
            .collect();
        Self { entries }
    }
}

impl ComponentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `component`, replacing any existing tag of the same type.
    pub fn insert<T: RoomComponent>(&mut self, component: T) {
        self.entries.insert(TypeId::of::<T>(), Box::new(component));
    }

    /// Boxed-form insertion used when merging a configured tag list into a
    /// slot; the key is the boxed value's concrete type.
    pub fn insert_boxed(&mut self, component: Box<dyn RoomComponent>) {
        self.entries.insert(component.as_any().type_id(), component);
    }

    /// The tag of type `T`, if present.
    pub fn get<T: Any>(&self) -> Option<&T> {
        self.entries.get(&TypeId::of::<T>()).and_then(|component| (**component).as_any().downcast_ref())
    }

    pub fn contains<T: Any>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
