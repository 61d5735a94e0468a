//! Capability traits the engine requires from a surrounding generation context.
//!
//! A concrete context (one per generation run) implements these seams
//! separately rather than through a single monolithic interface: placement
//! steps are generic over the capability set, never over a concrete game's
//! entity types.

use std::fmt;

use crate::rng::RandSource;
use crate::types::{Loc, Rect};

use super::plan::GridPlan;

/// Read/write access to the room plan being generated.
pub trait PlanAccess {
    fn plan(&self) -> &GridPlan;

    fn plan_mut(&mut self) -> &mut GridPlan;

    fn room_count(&self) -> usize {
        self.plan().room_count()
    }

    /// The drawn tile area of room `index`, once a floor-shape step has
    /// committed it to tiles.
    fn room_draw_rect(&self, index: usize) -> Rect;
}

/// Ownership of the run's random source.
pub trait RandAccess {
    fn rand(&mut self) -> &mut RandSource;
}

/// Reports unoccupied tile positions for placeables of type `T` within an
/// area (typically a room's drawn bounds).
pub trait FreeTileQuery<T> {
    fn free_tiles(&self, area: Rect) -> Vec<Loc>;
}

/// Commits a placeable of type `T` at a tile location. Must not fail for a
/// location previously returned by [`FreeTileQuery::free_tiles`].
pub trait ItemPlacement<T> {
    fn place_item(&mut self, loc: Loc, item: T);
}

/// A room-shape generator assignable to a plan slot. Interior carving is the
/// concrete context's concern; the engine only asks for a footprint.
pub trait RoomGen: fmt::Debug {
    /// The desired footprint, drawn from the run's random source before
    /// placement.
    fn propose_size(&self, rand: &mut RandSource) -> Loc;

    fn clone_gen(&self) -> Box<dyn RoomGen>;
}

impl Clone for Box<dyn RoomGen> {
    fn clone(&self) -> Self {
        self.clone_gen()
    }
}

/// Stock generator proposing a uniformly random footprint between inclusive
/// minimum and maximum sizes.
#[derive(Clone, Debug)]
pub struct RectRoomGen {
    min: Loc,
    max: Loc,
}

impl RectRoomGen {
    /// Both axes of `min` must not exceed `max`.
    pub fn new(min: Loc, max: Loc) -> Self {
        debug_assert!(min.x <= max.x && min.y <= max.y);
        Self { min, max }
    }

    /// A fixed footprint.
    pub fn fixed(size: Loc) -> Self {
        Self { min: size, max: size }
    }
}

impl RoomGen for RectRoomGen {
    fn propose_size(&self, rand: &mut RandSource) -> Loc {
        let width = rand
            .next_int_between(self.min.x, self.max.x + 1)
            .expect("size bounds are ordered by construction");
        let height = rand
            .next_int_between(self.min.y, self.max.y + 1)
            .expect("size bounds are ordered by construction");
        Loc::new(width, height)
    }

    fn clone_gen(&self) -> Box<dyn RoomGen> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proposed_sizes_stay_inside_the_inclusive_bounds() {
        let room_gen = RectRoomGen::new(Loc::new(3, 2), Loc::new(6, 4));
        let mut rand = RandSource::new(7);
        for _ in 0..1_000 {
            let size = room_gen.propose_size(&mut rand);
            assert!((3..=6).contains(&size.x), "width out of bounds: {}", size.x);
            assert!((2..=4).contains(&size.y), "height out of bounds: {}", size.y);
        }
    }

    #[test]
    fn fixed_generator_always_proposes_the_same_footprint() {
        let room_gen = RectRoomGen::fixed(Loc::new(5, 3));
        let mut rand = RandSource::new(7);
        assert_eq!(room_gen.propose_size(&mut rand), Loc::new(5, 3));
        assert_eq!(room_gen.propose_size(&mut rand), Loc::new(5, 3));
    }

    #[test]
    fn proposing_a_size_consumes_one_draw_per_axis() {
        let room_gen = RectRoomGen::fixed(Loc::new(4, 4));
        let mut reference = RandSource::new(123);
        let mut probed = RandSource::new(123);

        room_gen.propose_size(&mut probed);
        reference.next_u64();
        reference.next_u64();
        assert_eq!(probed.next_u64(), reference.next_u64());
    }
}
