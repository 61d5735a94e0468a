//! Entrance/exit outlet placement across the room graph with tiered fallback.

use crate::types::Loc;

use super::context::{FreeTileQuery, ItemPlacement, PlanAccess, RandAccess};
use super::filters::{RoomFilter, passes_all};
use super::steps::GenStep;

/// Places ordered entrance and exit markers into distinct rooms on a
/// best-effort basis.
///
/// Entrances are placed first, each consuming a room from the shared `free`
/// list into `used`. Exits then run against the residual `free`/`used` state
/// left by entrance placement, so exits prefer rooms no entrance claimed.
/// That cross-call ordering dependency is deliberate: it is what spreads
/// markers across distinct rooms. Only distinctness is enforced; no
/// geometric distance between entrance and exit is computed, so identical
/// seeds keep producing identical layouts.
///
/// Fallback tiers per marker: an unconsumed eligible room, then any already
/// used room (without consuming), then the origin tile (0, 0).
pub struct FloorOutletsStep<T> {
    entrances: Vec<T>,
    exits: Vec<T>,
    filters: Vec<Box<dyn RoomFilter>>,
}

impl<T> FloorOutletsStep<T> {
    pub fn new(entrances: Vec<T>, exits: Vec<T>) -> Self {
        Self { entrances, exits, filters: Vec::new() }
    }

    pub fn with_filter(mut self, filter: impl RoomFilter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }
}

impl<C, T> GenStep<C> for FloorOutletsStep<T>
where
    C: PlanAccess + RandAccess + FreeTileQuery<T> + ItemPlacement<T>,
    T: Clone,
{
    fn name(&self) -> &str {
        "place floor outlets"
    }

    fn apply(&self, context: &mut C) {
        let mut free: Vec<usize> = (0..context.plan().room_count())
            .filter(|&index| passes_all(context.plan().slot(index), &self.filters))
            .collect();
        let mut used: Vec<usize> = Vec::new();

        for marker in self.entrances.iter().chain(self.exits.iter()) {
            let mut found = outlet::<C, T>(context, &mut free, Some(&mut used));
            if found.is_none() {
                found = outlet::<C, T>(context, &mut used, None);
            }
            let loc = found.unwrap_or(Loc::ORIGIN);
            context.place_item(loc, marker.clone());
        }
    }
}

/// Searches `candidates` for a room with a free tile. Rooms without free
/// tiles are permanently removed; a winning room moves into `consume_into`
/// when provided. Returns `None` once `candidates` is exhausted.
fn outlet<C, T>(
    context: &mut C,
    candidates: &mut Vec<usize>,
    mut consume_into: Option<&mut Vec<usize>>,
) -> Option<Loc>
where
    C: PlanAccess + RandAccess + FreeTileQuery<T>,
{
    while !candidates.is_empty() {
        let pick = context.rand().next_index(candidates.len());
        let room_index = candidates[pick];
        let area = context.room_draw_rect(room_index);
        let tiles = FreeTileQuery::<T>::free_tiles(context, area);
        if tiles.is_empty() {
            candidates.remove(pick);
            continue;
        }
        let loc = tiles[context.rand().next_index(tiles.len())];
        if let Some(consumed) = consume_into.as_deref_mut() {
            candidates.remove(pick);
            consumed.push(room_index);
        }
        return Some(loc);
    }
    None
}
