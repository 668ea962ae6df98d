//! Room and corridor layout that the world grid is carved from.
//!
//! The built-in layout reproduces the reference dungeon on a 200x200 grid.
//! Custom layouts can be authored as JSON and loaded with
//! [`load_layout_from_path`].

use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WallSide {
    #[default]
    Left,
    Right,
    Top,
    Bottom,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct RoomSpec {
    #[serde(default)]
    pub id: String,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    #[serde(default)]
    pub door: WallSide,
}

impl RoomSpec {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            id: String::new(),
            x,
            y,
            width,
            height,
            door: WallSide::Left,
        }
    }

    pub fn with_door(mut self, door: WallSide) -> Self {
        self.door = door;
        self
    }

    /// Door cell: the midpoint of the chosen wall.
    pub fn door_cell(&self) -> (i32, i32) {
        match self.door {
            WallSide::Left => (self.x, self.y + self.height / 2),
            WallSide::Right => (self.x + self.width - 1, self.y + self.height / 2),
            WallSide::Top => (self.x + self.width / 2, self.y),
            WallSide::Bottom => (self.x + self.width / 2, self.y + self.height - 1),
        }
    }

    pub fn is_perimeter(&self, x: i32, y: i32) -> bool {
        let inside = x >= self.x
            && x < self.x + self.width
            && y >= self.y
            && y < self.y + self.height;
        inside
            && (x == self.x
                || x == self.x + self.width - 1
                || y == self.y
                || y == self.y + self.height - 1)
    }

    /// Every cell on the wall ring, each visited once.
    pub fn perimeter(&self) -> Vec<(i32, i32)> {
        let mut cells = Vec::new();
        for y in self.y..self.y + self.height {
            for x in self.x..self.x + self.width {
                if self.is_perimeter(x, y) {
                    cells.push((x, y));
                }
            }
        }
        cells
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct CorridorSpec {
    pub from: (i32, i32),
    pub to: (i32, i32),
}

impl CorridorSpec {
    pub fn new(from: (i32, i32), to: (i32, i32)) -> Self {
        Self { from, to }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct WorldLayout {
    #[serde(default)]
    pub rooms: Vec<RoomSpec>,
    #[serde(default)]
    pub corridors: Vec<CorridorSpec>,
}

impl WorldLayout {
    pub fn empty() -> Self {
        Self {
            rooms: Vec::new(),
            corridors: Vec::new(),
        }
    }
}

impl Default for WorldLayout {
    fn default() -> Self {
        Self {
            rooms: vec![
                RoomSpec::new(20, 20, 40, 40),
                RoomSpec::new(80, 80, 60, 60),
                RoomSpec::new(20, 120, 50, 50),
                RoomSpec::new(120, 20, 60, 40),
            ],
            corridors: vec![
                CorridorSpec::new((50, 30), (80, 30)),
                CorridorSpec::new((30, 50), (30, 120)),
                CorridorSpec::new((130, 50), (130, 80)),
                CorridorSpec::new((70, 110), (120, 110)),
            ],
        }
    }
}

pub fn load_layout_from_path(path: &Path) -> Result<WorldLayout, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let layout: WorldLayout = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse layout JSON {}: {e}", path.display()))?;
    validate_layout(&layout)?;
    Ok(layout)
}

fn validate_layout(layout: &WorldLayout) -> Result<(), String> {
    let mut seen = HashSet::new();
    for room in &layout.rooms {
        if room.width < 3 || room.height < 3 {
            return Err(format!(
                "Layout validation failed: room at ({}, {}) must be at least 3x3",
                room.x, room.y
            ));
        }
        if room.x < 0 || room.y < 0 {
            return Err(format!(
                "Layout validation failed: room '{}' at ({}, {}) has a negative origin",
                room.id, room.x, room.y
            ));
        }
        if room.x.checked_add(room.width).is_none() || room.y.checked_add(room.height).is_none() {
            return Err(format!(
                "Layout validation failed: room '{}' at ({}, {}) size {}x{} extends past integer range",
                room.id, room.x, room.y, room.width, room.height
            ));
        }
        if !room.id.is_empty() && !seen.insert(room.id.as_str()) {
            return Err(format!(
                "Layout validation failed: duplicate room id '{}'",
                room.id
            ));
        }
    }
    Ok(())
}
