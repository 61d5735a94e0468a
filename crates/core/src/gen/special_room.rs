//! Special-room placement: assigns a randomly picked room generator to one
//! eligible slot and stamps it with component tags.

use super::components::RoomComponent;
use super::context::{PlanAccess, RandAccess, RoomGen};
use super::filters::{RoomFilter, passes_all};
use super::pickers::{Picker, WeightedPicker};
use super::steps::GenStep;

/// Selects an eligible grid slot large enough for a randomly chosen room
/// generator and assigns it, merging the configured component tags into the
/// winning slot. Mutates at most one slot per invocation; an empty candidate
/// set is a silent no-op, not an error.
pub struct SpecialRoomStep {
    room_picker: WeightedPicker<Box<dyn RoomGen>>,
    components: Vec<Box<dyn RoomComponent>>,
    filters: Vec<Box<dyn RoomFilter>>,
}

impl SpecialRoomStep {
    pub fn new(room_picker: WeightedPicker<Box<dyn RoomGen>>) -> Self {
        Self { room_picker, components: Vec::new(), filters: Vec::new() }
    }

    /// Tag stamped onto the winning slot; replaces an existing tag of the
    /// same type.
    pub fn with_component(mut self, component: impl RoomComponent) -> Self {
        self.components.push(Box::new(component));
        self
    }

    pub fn with_filter(mut self, filter: impl RoomFilter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }
}

impl<C: PlanAccess + RandAccess> GenStep<C> for SpecialRoomStep {
    fn name(&self) -> &str {
        "place special room"
    }

    fn apply(&self, context: &mut C) {
        let Some(room_gen) = self.room_picker.pick(context.rand()) else {
            return;
        };
        let proposed = room_gen.propose_size(context.rand());

        let mut candidates = Vec::new();
        for index in 0..context.plan().room_count() {
            let slot = context.plan().slot(index);
            if slot.prefer_hall || !passes_all(slot, &self.filters) {
                continue;
            }
            let available = context.plan().slot_tile_bounds(index);
            if available.x >= proposed.x && available.y >= proposed.y {
                candidates.push(index);
            }
        }

        if candidates.is_empty() {
            return;
        }

        let winner = candidates[context.rand().next_index(candidates.len())];
        let slot = context.plan_mut().slot_mut(winner);
        slot.room_gen = Some(room_gen.clone_gen());
        for component in &self.components {
            slot.components.insert_boxed((**component).clone_component());
        }
    }
}
