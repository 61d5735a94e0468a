//! Composable predicates over room plan slots.

use std::any::{Any, type_name};
use std::fmt;
use std::marker::PhantomData;

use super::plan::RoomPlanSlot;

/// A stateless predicate over a slot's tags and flags.
pub trait RoomFilter: fmt::Debug {
    fn passes(&self, slot: &RoomPlanSlot) -> bool;
}

/// Logical AND over `filters`; vacuously true for an empty list.
pub fn passes_all(slot: &RoomPlanSlot, filters: &[Box<dyn RoomFilter>]) -> bool {
    filters.iter().all(|filter| filter.passes(slot))
}

/// Passes only slots carrying a component tag of type `T`.
pub struct RequireComponent<T> {
    _tag: PhantomData<fn() -> T>,
}

impl<T> RequireComponent<T> {
    pub fn new() -> Self {
        Self { _tag: PhantomData }
    }
}

impl<T> Default for RequireComponent<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for RequireComponent<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RequireComponent<{}>", type_name::<T>())
    }
}

impl<T: Any> RoomFilter for RequireComponent<T> {
    fn passes(&self, slot: &RoomPlanSlot) -> bool {
        slot.components.contains::<T>()
    }
}

/// Rejects slots carrying a component tag of type `T`.
pub struct ExcludeComponent<T> {
    _tag: PhantomData<fn() -> T>,
}

impl<T> ExcludeComponent<T> {
    pub fn new() -> Self {
        Self { _tag: PhantomData }
    }
}

impl<T> Default for ExcludeComponent<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ExcludeComponent<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExcludeComponent<{}>", type_name::<T>())
    }
}

impl<T: Any> RoomFilter for ExcludeComponent<T> {
    fn passes(&self, slot: &RoomPlanSlot) -> bool {
        !slot.components.contains::<T>()
    }
}
