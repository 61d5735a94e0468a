//! Shared fixtures for the generation step test suites.
//! Exists to avoid repeating plan and capability setup across many tests; it
//! owns no production generation logic.

use crate::rng::RandSource;
use crate::types::{Loc, Rect};

use super::context::{FreeTileQuery, ItemPlacement, PlanAccess, RandAccess};
use super::plan::GridPlan;

/// Minimal generation context: a plan, a random source, per-room draw rects,
/// and a `char`-typed placement sink.
pub(crate) struct PlanFixture {
    pub plan: GridPlan,
    pub rand: RandSource,
    pub draw_rects: Vec<Rect>,
    pub blocked: Vec<Loc>,
    pub placed: Vec<(Loc, char)>,
}

impl PlanFixture {
    pub fn new(rand: RandSource) -> Self {
        Self {
            plan: GridPlan::default(),
            rand,
            draw_rects: Vec::new(),
            blocked: Vec::new(),
            placed: Vec::new(),
        }
    }

    pub fn with_grid(cells: Loc, cell_size: Loc, wall_thickness: i32) -> Self {
        let mut fixture = Self::new(RandSource::new(0));
        fixture.plan = GridPlan::new(cells, cell_size, wall_thickness);
        fixture.draw_rects = vec![Rect::default(); fixture.plan.room_count()];
        fixture
    }

    /// Index of the room whose draw rect contains `loc`, if any.
    pub fn room_index_at(&self, loc: Loc) -> Option<usize> {
        self.draw_rects.iter().position(|rect| rect.contains(loc))
    }
}

impl PlanAccess for PlanFixture {
    fn plan(&self) -> &GridPlan {
        &self.plan
    }

    fn plan_mut(&mut self) -> &mut GridPlan {
        &mut self.plan
    }

    fn room_draw_rect(&self, index: usize) -> Rect {
        self.draw_rects.get(index).copied().unwrap_or_default()
    }
}

impl RandAccess for PlanFixture {
    fn rand(&mut self) -> &mut RandSource {
        &mut self.rand
    }
}

impl FreeTileQuery<char> for PlanFixture {
    fn free_tiles(&self, area: Rect) -> Vec<Loc> {
        area.tiles()
            .filter(|loc| {
                !self.blocked.contains(loc)
                    && !self.placed.iter().any(|(placed_loc, _)| placed_loc == loc)
            })
            .collect()
    }
}

impl ItemPlacement<char> for PlanFixture {
    fn place_item(&mut self, loc: Loc, item: char) {
        self.placed.push((loc, item));
    }
}
