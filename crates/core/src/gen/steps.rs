//! Generation step abstraction and the grid-shape steps of the standard
//! pipeline.

use crate::types::Loc;

use super::context::{PlanAccess, RandAccess, RoomGen};
use super::plan::GridPlan;

/// One mutation stage of a generation run. Steps are applied exactly once per
/// run; re-running the same step list against the same context and random
/// state reproduces the same mutations.
pub trait GenStep<C> {
    /// Progress-marker name emitted when the pipeline applies the step.
    fn name(&self) -> &str;

    fn apply(&self, context: &mut C);
}

/// Fixed ordered list of steps executed sequentially; no branching or
/// skipping happens at the pipeline level.
#[derive(Default)]
pub struct GenPipeline<C> {
    steps: Vec<Box<dyn GenStep<C>>>,
}

impl<C> GenPipeline<C> {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    pub fn push(&mut self, step: impl GenStep<C> + 'static) {
        self.steps.push(Box::new(step));
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn run(&self, context: &mut C) {
        for step in &self.steps {
            log::debug!("applying generation step: {}", step.name());
            step.apply(context);
        }
    }
}

/// Grid-shape step: replaces the context's plan with a fresh cell grid and
/// flags a random subset of slots as hall-preferring.
#[derive(Clone, Debug)]
pub struct InitGridPlanStep {
    pub cells: Loc,
    pub cell_size: Loc,
    pub wall_thickness: i32,
    pub hall_chance: f64,
}

impl<C: PlanAccess + RandAccess> GenStep<C> for InitGridPlanStep {
    fn name(&self) -> &str {
        "init grid plan"
    }

    fn apply(&self, context: &mut C) {
        let mut plan = GridPlan::new(self.cells, self.cell_size, self.wall_thickness);
        for slot in &mut plan.slots {
            slot.prefer_hall = context.rand().next_double() < self.hall_chance;
        }
        *context.plan_mut() = plan;
    }
}

/// Grid-shape step: assigns a default room generator to every slot that is
/// neither hall-preferring nor already assigned.
#[derive(Clone, Debug)]
pub struct AssignRoomsStep {
    room_gen: Box<dyn RoomGen>,
}

impl AssignRoomsStep {
    pub fn new(room_gen: impl RoomGen + 'static) -> Self {
        Self { room_gen: Box::new(room_gen) }
    }
}

impl<C: PlanAccess> GenStep<C> for AssignRoomsStep {
    fn name(&self) -> &str {
        "assign default rooms"
    }

    fn apply(&self, context: &mut C) {
        for slot in &mut context.plan_mut().slots {
            if !slot.prefer_hall && slot.room_gen.is_none() {
                slot.room_gen = Some(self.room_gen.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::r#gen::context::RectRoomGen;
    use crate::r#gen::test_support::PlanFixture;
    use crate::rng::RandSource;

    use super::*;

    #[test]
    fn pipeline_applies_steps_in_push_order() {
        struct RecordingStep(&'static str);

        impl GenStep<Vec<&'static str>> for RecordingStep {
            fn name(&self) -> &str {
                self.0
            }

            fn apply(&self, context: &mut Vec<&'static str>) {
                context.push(self.0);
            }
        }

        let mut pipeline = GenPipeline::new();
        pipeline.push(RecordingStep("first"));
        pipeline.push(RecordingStep("second"));
        pipeline.push(RecordingStep("third"));

        let mut applied = Vec::new();
        pipeline.run(&mut applied);
        assert_eq!(applied, vec!["first", "second", "third"]);
    }

    #[test]
    fn init_grid_plan_builds_the_full_cell_grid() {
        let mut fixture = PlanFixture::new(RandSource::new(42));
        let step = InitGridPlanStep {
            cells: Loc::new(4, 3),
            cell_size: Loc::new(6, 4),
            wall_thickness: 1,
            hall_chance: 0.0,
        };
        step.apply(&mut fixture);

        assert_eq!(fixture.plan.room_count(), 12);
        assert!(fixture.plan.slots.iter().all(|slot| !slot.prefer_hall));
    }

    #[test]
    fn hall_chance_one_flags_every_slot() {
        let mut fixture = PlanFixture::new(RandSource::new(42));
        let step = InitGridPlanStep {
            cells: Loc::new(3, 3),
            cell_size: Loc::new(5, 5),
            wall_thickness: 1,
            hall_chance: 1.0,
        };
        step.apply(&mut fixture);
        assert!(fixture.plan.slots.iter().all(|slot| slot.prefer_hall));
    }

    #[test]
    fn assign_rooms_skips_hall_slots_and_existing_assignments() {
        let mut fixture = PlanFixture::with_grid(Loc::new(2, 2), Loc::new(6, 4), 1);
        fixture.plan.slot_mut(1).prefer_hall = true;
        fixture.plan.slot_mut(2).room_gen =
            Some(Box::new(RectRoomGen::fixed(Loc::new(2, 2))));

        let step = AssignRoomsStep::new(RectRoomGen::fixed(Loc::new(3, 3)));
        GenStep::<PlanFixture>::apply(&step, &mut fixture);

        assert!(fixture.plan.slot(0).room_gen.is_some());
        assert!(fixture.plan.slot(1).room_gen.is_none());
        assert!(fixture.plan.slot(3).room_gen.is_some());
    }
}
