//! Grid plan of candidate room slots and cell-to-tile bounds arithmetic.

use crate::types::{Loc, Rect};

use super::components::ComponentSet;
use super::context::RoomGen;

/// A candidate room position before or after a room generator is assigned.
/// Slot indices are stable within one generation run.
#[derive(Clone, Debug, Default)]
pub struct RoomPlanSlot {
    /// Span in grid-cell units (origin cell + cell count per axis).
    pub bounds: Rect,
    pub room_gen: Option<Box<dyn RoomGen>>,
    pub prefer_hall: bool,
    pub components: ComponentSet,
}

impl RoomPlanSlot {
    pub fn new(bounds: Rect) -> Self {
        Self { bounds, room_gen: None, prefer_hall: false, components: ComponentSet::new() }
    }
}

/// Mutable grid of room slots plus the geometry needed to translate cell
/// spans into available tile bounds.
#[derive(Clone, Debug, Default)]
pub struct GridPlan {
    pub cells: Loc,
    pub cell_size: Loc,
    pub wall_thickness: i32,
    pub slots: Vec<RoomPlanSlot>,
}

impl GridPlan {
    /// A plan with one single-cell slot per grid cell, row-major.
    pub fn new(cells: Loc, cell_size: Loc, wall_thickness: i32) -> Self {
        let mut slots = Vec::with_capacity((cells.x * cells.y).max(0) as usize);
        for cell_y in 0..cells.y {
            for cell_x in 0..cells.x {
                slots.push(RoomPlanSlot::new(Rect::new(cell_x, cell_y, 1, 1)));
            }
        }
        Self { cells, cell_size, wall_thickness, slots }
    }

    pub fn room_count(&self) -> usize {
        self.slots.len()
    }

    pub fn slot(&self, index: usize) -> &RoomPlanSlot {
        &self.slots[index]
    }

    pub fn slot_mut(&mut self, index: usize) -> &mut RoomPlanSlot {
        &mut self.slots[index]
    }

    /// Available tile bounds of a slot: `span * cell_size` plus the
    /// `(span - 1)` interior wall bands the span absorbs.
    pub fn slot_tile_bounds(&self, index: usize) -> Loc {
        let span = self.slots[index].bounds.size;
        Loc::new(
            span.x * self.cell_size.x + (span.x - 1) * self.wall_thickness,
            span.y * self.cell_size.y + (span.y - 1) * self.wall_thickness,
        )
    }

    /// Tile origin of a slot's cell area, before any outer border a concrete
    /// floor adds around the whole grid.
    pub fn slot_tile_origin(&self, index: usize) -> Loc {
        let cell = self.slots[index].bounds.origin;
        Loc::new(
            cell.x * (self.cell_size.x + self.wall_thickness),
            cell.y * (self.cell_size.y + self.wall_thickness),
        )
    }

    /// Total tile size of the cell grid including interior wall bands.
    pub fn floor_tile_size(&self) -> Loc {
        Loc::new(
            self.cells.x * self.cell_size.x + (self.cells.x - 1).max(0) * self.wall_thickness,
            self.cells.y * self.cell_size.y + (self.cells.y - 1).max(0) * self.wall_thickness,
        )
    }
}
