//! Seeded floor generation: a step pipeline that shapes a grid plan, carves
//! it into tiles, and decorates the result with special rooms and outlets.

pub mod components;
pub mod context;
pub mod filters;
pub mod floor;
pub mod outlets;
pub mod pickers;
pub mod plan;
pub mod special_room;
pub mod steps;

#[cfg(test)]
pub(crate) mod test_support;

pub use components::{ComponentSet, RoomComponent};
pub use context::{
    FreeTileQuery, ItemPlacement, PlanAccess, RandAccess, RectRoomGen, RoomGen,
};
pub use filters::{ExcludeComponent, RequireComponent, RoomFilter, passes_all};
pub use floor::{
    CarveFloorStep, Marker, MarkerId, PlacedMarker, TileFloor, TileKind, VaultRoom,
};
pub use outlets::FloorOutletsStep;
pub use pickers::{Picker, PresetPicker, WeightedPicker};
pub use plan::{GridPlan, RoomPlanSlot};
pub use special_room::SpecialRoomStep;
pub use steps::{AssignRoomsStep, GenPipeline, GenStep, InitGridPlanStep};

use crate::types::Loc;

/// Shape parameters for the standard demo pipeline.
#[derive(Clone, Debug)]
pub struct FloorConfig {
    pub cells: Loc,
    pub cell_size: Loc,
    pub wall_thickness: i32,
    pub hall_chance: f64,
}

impl Default for FloorConfig {
    fn default() -> Self {
        Self {
            cells: Loc::new(4, 3),
            cell_size: Loc::new(6, 4),
            wall_thickness: 1,
            hall_chance: 0.25,
        }
    }
}

/// Runs the standard pipeline against a fresh floor. The same seed and config
/// always yield the same floor.
pub fn generate_floor(seed: u64, config: &FloorConfig) -> TileFloor {
    let mut floor = TileFloor::new(seed);

    let vault_picker = WeightedPicker::new()
        .with(Box::new(RectRoomGen::fixed(config.cell_size)) as Box<dyn RoomGen>, 3)
        .with(
            Box::new(RectRoomGen::new(
                Loc::new((config.cell_size.x - 1).max(1), (config.cell_size.y - 1).max(1)),
                config.cell_size,
            )) as Box<dyn RoomGen>,
            1,
        );

    let mut pipeline = GenPipeline::new();
    pipeline.push(InitGridPlanStep {
        cells: config.cells,
        cell_size: config.cell_size,
        wall_thickness: config.wall_thickness,
        hall_chance: config.hall_chance,
    });
    pipeline.push(AssignRoomsStep::new(RectRoomGen::new(Loc::new(2, 2), config.cell_size)));
    pipeline.push(SpecialRoomStep::new(vault_picker).with_component(VaultRoom));
    pipeline.push(CarveFloorStep);
    pipeline.push(
        FloorOutletsStep::new(vec![Marker::Entrance], vec![Marker::Exit])
            .with_filter(ExcludeComponent::<VaultRoom>::new()),
    );
    pipeline.run(&mut floor);

    floor
}
