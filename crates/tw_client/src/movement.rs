use glam::Vec2;

use tw_core::animation::seconds_to_us;
use tw_core::Direction;
use tw_world::{resolve_move, WorldGrid};

use crate::entity::Entity;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    pub position: Vec2,
    pub direction: Direction,
    pub blocked: bool,
}

/// What one tick did to an entity; `changed` drives network emission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionChange {
    pub outcome: StepOutcome,
    pub frame_index: usize,
    pub changed: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct MovementEngine {
    pub tile_size: f32,
}

impl MovementEngine {
    pub fn new(tile_size: f32) -> Self {
        Self { tile_size }
    }

    /// Pure position/facing resolution for one tick.
    ///
    /// `intent` is a velocity already scaled by speed (and zoom). With no
    /// grid every move commits; with a grid the destination tile decides.
    pub fn step(&self, intent: Vec2, dt: f64, grid: Option<&WorldGrid>, entity: &Entity) -> StepOutcome {
        let direction = Direction::from_vector(intent.x, intent.y).unwrap_or(entity.direction);
        let from = entity.position;
        let to = from + intent * dt as f32;

        // Standing still never re-snaps onto a door line.
        if to == from {
            return StepOutcome {
                position: from,
                direction,
                blocked: false,
            };
        }

        let Some(grid) = grid else {
            return StepOutcome {
                position: to,
                direction,
                blocked: false,
            };
        };

        let decision = resolve_move(grid, self.tile_size, from, to);
        StepOutcome {
            position: decision.position(from),
            direction,
            blocked: decision.is_blocked(),
        }
    }

    /// Apply a step and advance the walk cycle in place.
    pub fn advance(
        &self,
        intent: Vec2,
        dt: f64,
        grid: Option<&WorldGrid>,
        entity: &mut Entity,
    ) -> MotionChange {
        let before_position = entity.position;
        let before_frame = entity.frame_index();

        let outcome = self.step(intent, dt, grid, entity);
        entity.position = outcome.position;
        entity.direction = outcome.direction;
        entity.moving = intent != Vec2::ZERO;
        let frame_index = entity.walk.tick(seconds_to_us(dt), entity.moving);

        MotionChange {
            outcome,
            frame_index,
            changed: entity.position != before_position || frame_index != before_frame,
        }
    }
}
