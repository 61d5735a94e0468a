//! Concrete tile-grid generation context used by the CLI, the fuzz harness,
//! and the integration tests.

use serde::{Deserialize, Serialize};
use slotmap::{SlotMap, new_key_type};
use xxhash_rust::xxh3::xxh3_64;

use crate::rng::RandSource;
use crate::types::{Loc, Rect};

use super::context::{FreeTileQuery, ItemPlacement, PlanAccess, RandAccess};
use super::plan::GridPlan;
use super::steps::GenStep;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    Wall,
    Floor,
}

/// Markers placed on the demo floor; the engine itself never inspects these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Marker {
    Entrance,
    Exit,
    Treasure,
}

/// Component tag stamped on the slot hosting the special vault room.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VaultRoom;

new_key_type! {
    pub struct MarkerId;
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedMarker {
    pub loc: Loc,
    pub marker: Marker,
}

/// A tile floor being generated: owns the run's random source and plan, and
/// supplies the placement capabilities the pipeline steps require.
pub struct TileFloor {
    rand: RandSource,
    plan: GridPlan,
    width: usize,
    height: usize,
    tiles: Vec<TileKind>,
    rooms: Vec<Rect>,
    markers: SlotMap<MarkerId, PlacedMarker>,
}

impl TileFloor {
    pub fn new(seed: u64) -> Self {
        Self {
            rand: RandSource::new(seed),
            plan: GridPlan::default(),
            width: 0,
            height: 0,
            tiles: Vec::new(),
            rooms: Vec::new(),
            markers: SlotMap::with_key(),
        }
    }

    pub fn first_seed(&self) -> u64 {
        self.rand.first_seed()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Drawn room rects, indexed like the plan's slots.
    pub fn rooms(&self) -> &[Rect] {
        &self.rooms
    }

    pub fn markers(&self) -> impl Iterator<Item = &PlacedMarker> {
        self.markers.values()
    }

    pub fn tile_at(&self, loc: Loc) -> TileKind {
        if loc.x < 0 || loc.y < 0 {
            return TileKind::Wall;
        }
        let x = loc.x as usize;
        let y = loc.y as usize;
        if x >= self.width || y >= self.height {
            return TileKind::Wall;
        }
        self.tiles[y * self.width + x]
    }

    /// Index of the room whose drawn rect contains `loc`, if any.
    pub fn room_index_at(&self, loc: Loc) -> Option<usize> {
        self.rooms.iter().position(|rect| rect.contains(loc))
    }

    /// Stable byte serialization of the generated layout, for fingerprinting
    /// and cross-run comparison.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend((self.width as u32).to_le_bytes());
        bytes.extend((self.height as u32).to_le_bytes());
        for tile in &self.tiles {
            bytes.push(match tile {
                TileKind::Wall => 0,
                TileKind::Floor => 1,
            });
        }

        bytes.extend((self.rooms.len() as u32).to_le_bytes());
        for rect in &self.rooms {
            bytes.extend(rect.origin.x.to_le_bytes());
            bytes.extend(rect.origin.y.to_le_bytes());
            bytes.extend(rect.size.x.to_le_bytes());
            bytes.extend(rect.size.y.to_le_bytes());
        }

        let mut placed: Vec<&PlacedMarker> = self.markers.values().collect();
        placed.sort_by_key(|placed| (placed.loc.y, placed.loc.x, placed.marker));
        bytes.extend((placed.len() as u32).to_le_bytes());
        for placed in placed {
            bytes.push(match placed.marker {
                Marker::Entrance => 0,
                Marker::Exit => 1,
                Marker::Treasure => 2,
            });
            bytes.extend(placed.loc.x.to_le_bytes());
            bytes.extend(placed.loc.y.to_le_bytes());
        }

        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }

    /// Commits the plan to tiles: carves one room per slot (hall-preferring
    /// and unassigned slots get a single connector tile) and joins
    /// consecutive rooms with L-shaped corridors.
    fn carve(&mut self) {
        let plan_size = self.plan.floor_tile_size();
        self.width = (plan_size.x + 2).max(0) as usize;
        self.height = (plan_size.y + 2).max(0) as usize;
        self.tiles = vec![TileKind::Wall; self.width * self.height];
        self.rooms = vec![Rect::default(); self.plan.room_count()];

        let mut centers = Vec::with_capacity(self.plan.room_count());
        for index in 0..self.plan.room_count() {
            let available = self.plan.slot_tile_bounds(index);
            let cell_origin = self.plan.slot_tile_origin(index);
            let proposed = match &self.plan.slots[index].room_gen {
                Some(room_gen) => room_gen.propose_size(&mut self.rand),
                None => Loc::new(1, 1),
            };
            let size =
                Loc::new(proposed.x.clamp(1, available.x), proposed.y.clamp(1, available.y));
            let offset = Loc::new((available.x - size.x) / 2, (available.y - size.y) / 2);
            // +1 for the outer wall border around the whole grid.
            let rect = Rect {
                origin: Loc::new(cell_origin.x + offset.x + 1, cell_origin.y + offset.y + 1),
                size,
            };
            for loc in rect.tiles() {
                self.set_floor(loc);
            }
            self.rooms[index] = rect;
            centers.push(Loc::new(
                rect.origin.x + rect.size.x / 2,
                rect.origin.y + rect.size.y / 2,
            ));
        }

        for index in 1..centers.len() {
            let horizontal_first = self.rand.next_u64() & 1 == 0;
            self.carve_l_corridor(centers[index - 1], centers[index], horizontal_first);
        }
    }

    fn carve_l_corridor(&mut self, start: Loc, end: Loc, horizontal_first: bool) {
        if horizontal_first {
            self.carve_horizontal(start.y, start.x, end.x);
            self.carve_vertical(end.x, start.y, end.y);
        } else {
            self.carve_vertical(start.x, start.y, end.y);
            self.carve_horizontal(end.y, start.x, end.x);
        }
    }

    fn carve_horizontal(&mut self, y: i32, left_x: i32, right_x: i32) {
        for x in left_x.min(right_x)..=left_x.max(right_x) {
            self.set_floor(Loc::new(x, y));
        }
    }

    fn carve_vertical(&mut self, x: i32, top_y: i32, bottom_y: i32) {
        for y in top_y.min(bottom_y)..=top_y.max(bottom_y) {
            self.set_floor(Loc::new(x, y));
        }
    }

    /// Carves inside the border only; out-of-border locations are ignored.
    fn set_floor(&mut self, loc: Loc) {
        if loc.x < 1 || loc.y < 1 {
            return;
        }
        let x = loc.x as usize;
        let y = loc.y as usize;
        if x + 1 >= self.width || y + 1 >= self.height {
            return;
        }
        self.tiles[y * self.width + x] = TileKind::Floor;
    }
}

impl PlanAccess for TileFloor {
    fn plan(&self) -> &GridPlan {
        &self.plan
    }

    fn plan_mut(&mut self) -> &mut GridPlan {
        &mut self.plan
    }

    fn room_draw_rect(&self, index: usize) -> Rect {
        self.rooms.get(index).copied().unwrap_or_default()
    }
}

impl RandAccess for TileFloor {
    fn rand(&mut self) -> &mut RandSource {
        &mut self.rand
    }
}

impl FreeTileQuery<Marker> for TileFloor {
    fn free_tiles(&self, area: Rect) -> Vec<Loc> {
        area.tiles()
            .filter(|loc| {
                self.tile_at(*loc) == TileKind::Floor
                    && !self.markers.values().any(|placed| placed.loc == *loc)
            })
            .collect()
    }
}

impl ItemPlacement<Marker> for TileFloor {
    fn place_item(&mut self, loc: Loc, item: Marker) {
        self.markers.insert(PlacedMarker { loc, marker: item });
    }
}

/// Floor-shape step: commits the grid plan to tiles on a [`TileFloor`].
#[derive(Clone, Copy, Debug, Default)]
pub struct CarveFloorStep;

impl GenStep<TileFloor> for CarveFloorStep {
    fn name(&self) -> &str {
        "carve floor tiles"
    }

    fn apply(&self, context: &mut TileFloor) {
        context.carve();
    }
}

#[cfg(test)]
mod tests {
    use crate::r#gen::context::RectRoomGen;
    use crate::r#gen::steps::{AssignRoomsStep, InitGridPlanStep};

    use super::*;

    fn carved_floor(seed: u64) -> TileFloor {
        let mut floor = TileFloor::new(seed);
        let init = InitGridPlanStep {
            cells: Loc::new(3, 2),
            cell_size: Loc::new(6, 4),
            wall_thickness: 1,
            hall_chance: 0.0,
        };
        init.apply(&mut floor);
        let assign = AssignRoomsStep::new(RectRoomGen::new(Loc::new(3, 2), Loc::new(6, 4)));
        assign.apply(&mut floor);
        CarveFloorStep.apply(&mut floor);
        floor
    }

    #[test]
    fn carving_keeps_the_outer_border_walled() {
        let floor = carved_floor(42);
        for x in 0..floor.width() as i32 {
            assert_eq!(floor.tile_at(Loc::new(x, 0)), TileKind::Wall);
            assert_eq!(floor.tile_at(Loc::new(x, floor.height() as i32 - 1)), TileKind::Wall);
        }
        for y in 0..floor.height() as i32 {
            assert_eq!(floor.tile_at(Loc::new(0, y)), TileKind::Wall);
            assert_eq!(floor.tile_at(Loc::new(floor.width() as i32 - 1, y)), TileKind::Wall);
        }
    }

    #[test]
    fn every_room_tile_is_walkable_floor() {
        let floor = carved_floor(42);
        assert_eq!(floor.rooms().len(), 6);
        for rect in floor.rooms() {
            assert!(rect.size.x >= 1 && rect.size.y >= 1);
            for loc in rect.tiles() {
                assert_eq!(floor.tile_at(loc), TileKind::Floor);
            }
        }
    }

    #[test]
    fn out_of_bounds_locations_read_as_wall() {
        let floor = carved_floor(1);
        assert_eq!(floor.tile_at(Loc::new(-1, 0)), TileKind::Wall);
        assert_eq!(floor.tile_at(Loc::new(0, -5)), TileKind::Wall);
        assert_eq!(floor.tile_at(Loc::new(10_000, 0)), TileKind::Wall);
    }

    #[test]
    fn free_tiles_exclude_occupied_locations() {
        let mut floor = carved_floor(7);
        let room = floor.rooms()[0];
        let before = FreeTileQuery::<Marker>::free_tiles(&floor, room);
        assert!(!before.is_empty());

        floor.place_item(before[0], Marker::Treasure);
        let after = FreeTileQuery::<Marker>::free_tiles(&floor, room);
        assert_eq!(after.len(), before.len() - 1);
        assert!(!after.contains(&before[0]));
    }

    #[test]
    fn fingerprint_tracks_layout_and_marker_changes() {
        let mut floor = carved_floor(99);
        let untouched = carved_floor(99);
        assert_eq!(floor.fingerprint(), untouched.fingerprint());

        let tile = FreeTileQuery::<Marker>::free_tiles(&floor, floor.rooms()[0])[0];
        floor.place_item(tile, Marker::Entrance);
        assert_ne!(floor.fingerprint(), untouched.fingerprint());
    }

    #[test]
    fn marker_sort_makes_canonical_bytes_insertion_order_independent() {
        let mut left = carved_floor(5);
        let mut right = carved_floor(5);
        let first = Loc::new(2, 2);
        let second = Loc::new(3, 2);

        left.place_item(first, Marker::Entrance);
        left.place_item(second, Marker::Exit);
        right.place_item(second, Marker::Exit);
        right.place_item(first, Marker::Entrance);

        assert_eq!(left.canonical_bytes(), right.canonical_bytes());
    }
}
