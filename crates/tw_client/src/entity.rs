use glam::Vec2;

use tw_core::{Direction, WalkCycle};
use tw_net::EntitySnapshot;

/// A rendered character, local or remote.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// `None` for the local player until the server has acknowledged it.
    pub id: Option<String>,
    pub position: Vec2,
    pub direction: Direction,
    pub moving: bool,
    pub walk: WalkCycle,
    pub name: String,
    /// Key of the sprite sheet image this entity is drawn from.
    pub sprite: String,
}

impl Entity {
    pub fn new(position: Vec2, walk: WalkCycle, sprite: &str) -> Self {
        Self {
            id: None,
            position,
            direction: Direction::default(),
            moving: false,
            walk,
            name: String::new(),
            sprite: sprite.to_string(),
        }
    }

    pub fn from_snapshot(id: &str, snapshot: &EntitySnapshot, walk: WalkCycle, sprite: &str) -> Self {
        let mut entity = Self::new(Vec2::new(snapshot.x, snapshot.y), walk, sprite);
        entity.id = Some(id.to_string());
        entity.name = snapshot.name.clone();
        entity.direction = snapshot.direction;
        entity.walk.set_frame(snapshot.frame_index);
        entity
    }

    pub fn frame_index(&self) -> usize {
        self.walk.frame_index
    }

    /// Overwrite the authoritative motion fields, leaving sprite and name alone.
    pub fn apply_motion(&mut self, position: Vec2, direction: Direction, frame_index: usize) {
        self.position = position;
        self.direction = direction;
        self.walk.set_frame(frame_index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_snapshot_clamps_frame() {
        let snapshot = EntitySnapshot {
            id: None,
            x: 3.0,
            y: 4.0,
            direction: Direction::Left,
            frame_index: 99,
            name: "Zed".to_string(),
        };
        let entity = Entity::from_snapshot("z", &snapshot, WalkCycle::new(8, 100_000), "sheet");
        assert_eq!(entity.id.as_deref(), Some("z"));
        assert_eq!(entity.position, Vec2::new(3.0, 4.0));
        assert_eq!(entity.frame_index(), 7);
        assert_eq!(entity.sprite, "sheet");
    }

    #[test]
    fn apply_motion_keeps_sprite_and_name() {
        let mut entity = Entity::new(Vec2::ZERO, WalkCycle::default(), "sheet");
        entity.name = "me".to_string();
        entity.apply_motion(Vec2::new(1.0, 2.0), Direction::UpLeft, 3);
        assert_eq!(entity.sprite, "sheet");
        assert_eq!(entity.name, "me");
        assert_eq!(entity.direction, Direction::UpLeft);
        assert_eq!(entity.frame_index(), 3);
    }
}
