//! Tile collision as pure decisions.
//!
//! [`resolve_move`] looks only at the destination tile of a tentative move
//! and says whether to commit it, reject it, or commit it after snapping onto
//! a door's centre line. Rejection is all-or-nothing: there is no partial
//! slide along walls, so a blocked entity stays exactly where it was.

use glam::Vec2;

use crate::grid::{Tile, WorldGrid};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveDecision {
    Allowed(Vec2),
    Blocked,
    SnapTo(Vec2),
}

impl MoveDecision {
    /// Final position given where the entity started.
    pub fn position(self, from: Vec2) -> Vec2 {
        match self {
            MoveDecision::Allowed(p) | MoveDecision::SnapTo(p) => p,
            MoveDecision::Blocked => from,
        }
    }

    pub fn is_blocked(self) -> bool {
        matches!(self, MoveDecision::Blocked)
    }
}

pub fn world_to_tile(position: Vec2, tile_size: f32) -> (i32, i32) {
    (
        (position.x / tile_size).floor() as i32,
        (position.y / tile_size).floor() as i32,
    )
}

pub fn tile_center(tile_x: i32, tile_y: i32, tile_size: f32) -> Vec2 {
    Vec2::new(
        tile_x as f32 * tile_size + tile_size / 2.0,
        tile_y as f32 * tile_size + tile_size / 2.0,
    )
}

pub fn resolve_move(grid: &WorldGrid, tile_size: f32, from: Vec2, to: Vec2) -> MoveDecision {
    let (tile_x, tile_y) = world_to_tile(to, tile_size);
    match grid.tile_at(tile_x, tile_y) {
        Tile::Wall => MoveDecision::Blocked,
        Tile::Floor => MoveDecision::Allowed(to),
        Tile::Door => {
            let center = tile_center(tile_x, tile_y, tile_size);
            let delta = to - from;
            // Snap the axis perpendicular to the dominant motion.
            if delta.x.abs() >= delta.y.abs() {
                MoveDecision::SnapTo(Vec2::new(to.x, center.y))
            } else {
                MoveDecision::SnapTo(Vec2::new(center.x, to.y))
            }
        }
    }
}
