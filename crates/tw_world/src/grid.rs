//! Tile world: a fixed-size grid generated once and read-only afterwards.
//!
//! Generation is deterministic. It lays a wall ring around the border, then
//! carves each room of the layout (wall perimeter, floor interior, one door),
//! then carves the corridors. Pieces that would break the border ring are
//! skipped with a warning instead of failing, so generation always succeeds.

use crate::layout::{CorridorSpec, RoomSpec, WorldLayout};

/// Largest world side in tiles. Larger requests are clamped.
pub const MAX_WORLD_SIDE: i32 = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tile {
    Floor = 0,
    Wall = 1,
    Door = 2,
}

impl Tile {
    pub const ALL: [Tile; 3] = [Tile::Floor, Tile::Wall, Tile::Door];

    /// Index used for tile image names (`tile_0.png` ...).
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_passable(self) -> bool {
        !matches!(self, Tile::Wall)
    }
}

#[derive(Debug, Clone)]
pub struct WorldGrid {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
    rooms: Vec<RoomSpec>,
    corridors: Vec<CorridorSpec>,
}

impl WorldGrid {
    /// Generate the built-in dungeon at the given size.
    pub fn generate(width: i32, height: i32) -> Self {
        Self::generate_with_layout(width, height, &WorldLayout::default())
    }

    pub fn generate_with_layout(width: i32, height: i32, layout: &WorldLayout) -> Self {
        if width > MAX_WORLD_SIDE || height > MAX_WORLD_SIDE {
            log::warn!(
                "Clamping {}x{} world to at most {} tiles per side",
                width,
                height,
                MAX_WORLD_SIDE
            );
        }
        let width = width.clamp(0, MAX_WORLD_SIDE);
        let height = height.clamp(0, MAX_WORLD_SIDE);
        let mut grid = Self {
            width,
            height,
            tiles: vec![Tile::Floor; width as usize * height as usize],
            rooms: Vec::new(),
            corridors: Vec::new(),
        };

        for y in 0..height {
            for x in 0..width {
                if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
                    grid.set(x, y, Tile::Wall);
                }
            }
        }

        for room in &layout.rooms {
            if grid.fits_room(room) {
                grid.carve_room(room);
                grid.rooms.push(room.clone());
            } else {
                log::warn!(
                    "Skipping room '{}' at ({}, {}) size {}x{}: does not fit inside {}x{} world",
                    room.id,
                    room.x,
                    room.y,
                    room.width,
                    room.height,
                    width,
                    height
                );
            }
        }

        for corridor in &layout.corridors {
            if grid.is_interior(corridor.from.0, corridor.from.1)
                && grid.is_interior(corridor.to.0, corridor.to.1)
            {
                grid.carve_corridor(corridor);
                grid.corridors.push(*corridor);
            } else {
                log::warn!(
                    "Skipping corridor {:?} -> {:?}: endpoint outside world interior",
                    corridor.from,
                    corridor.to
                );
            }
        }

        log::debug!(
            "Generated {}x{} world with {} rooms and {} corridors",
            width,
            height,
            grid.rooms.len(),
            grid.corridors.len()
        );
        grid
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Rooms that were actually carved.
    pub fn rooms(&self) -> &[RoomSpec] {
        &self.rooms
    }

    pub fn corridors(&self) -> &[CorridorSpec] {
        &self.corridors
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Out-of-bounds queries read as Wall.
    pub fn tile_at(&self, x: i32, y: i32) -> Tile {
        if !self.in_bounds(x, y) {
            return Tile::Wall;
        }
        self.tiles[(y * self.width + x) as usize]
    }

    fn set(&mut self, x: i32, y: i32, tile: Tile) {
        if self.in_bounds(x, y) {
            self.tiles[(y * self.width + x) as usize] = tile;
        }
    }

    fn is_interior(&self, x: i32, y: i32) -> bool {
        x > 0 && y > 0 && x < self.width - 1 && y < self.height - 1
    }

    fn fits_room(&self, room: &RoomSpec) -> bool {
        if room.width < 3 || room.height < 3 || !self.is_interior(room.x, room.y) {
            return false;
        }
        // Far corner in i64 so huge extents are rejected instead of wrapping.
        let right = i64::from(room.x) + i64::from(room.width) - 1;
        let bottom = i64::from(room.y) + i64::from(room.height) - 1;
        right < i64::from(self.width) - 1 && bottom < i64::from(self.height) - 1
    }

    fn carve_room(&mut self, room: &RoomSpec) {
        for y in room.y..room.y + room.height {
            for x in room.x..room.x + room.width {
                let tile = if room.is_perimeter(x, y) {
                    Tile::Wall
                } else {
                    Tile::Floor
                };
                self.set(x, y, tile);
            }
        }
        let (door_x, door_y) = room.door_cell();
        self.set(door_x, door_y, Tile::Door);
    }

    fn carve_corridor(&mut self, corridor: &CorridorSpec) {
        for (x, y) in corridor_cells(corridor.from, corridor.to) {
            // Corridors open walls but keep doors they pass through.
            if self.tile_at(x, y) != Tile::Door {
                self.set(x, y, Tile::Floor);
            }
        }
    }
}

/// Cells on the straight line from `from` to `to`, inclusive. The line is
/// sampled once per unit of the longer axis, so consecutive cells are always
/// grid-adjacent (8-neighbourhood) whatever the slope.
pub fn corridor_cells(from: (i32, i32), to: (i32, i32)) -> Vec<(i32, i32)> {
    let dx = to.0 - from.0;
    let dy = to.1 - from.1;
    let length = dx.abs().max(dy.abs());
    if length == 0 {
        return vec![from];
    }
    (0..=length)
        .map(|i| {
            let x = from.0 + round_half_up(i as f64 * dx as f64 / length as f64);
            let y = from.1 + round_half_up(i as f64 * dy as f64 / length as f64);
            (x, y)
        })
        .collect()
}

fn round_half_up(v: f64) -> i32 {
    (v + 0.5).floor() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::WallSide;

    fn isolated_layout() -> WorldLayout {
        WorldLayout {
            rooms: vec![
                RoomSpec::new(2, 2, 6, 5),
                RoomSpec::new(12, 3, 5, 7).with_door(WallSide::Top),
                RoomSpec::new(3, 12, 9, 4).with_door(WallSide::Bottom),
            ],
            corridors: vec![
                CorridorSpec::new((1, 18), (18, 18)),
                CorridorSpec::new((18, 1), (18, 17)),
                CorridorSpec::new((9, 1), (10, 10)),
            ],
        }
    }

    #[test]
    fn out_of_bounds_reads_as_wall() {
        let grid = WorldGrid::generate(50, 40);
        for &(x, y) in &[(-1, 0), (0, -1), (50, 5), (5, 40), (i32::MIN, i32::MAX), (-7, -7)] {
            assert_eq!(grid.tile_at(x, y), Tile::Wall, "({x}, {y})");
        }
    }

    #[test]
    fn border_is_always_wall() {
        let grid = WorldGrid::generate(200, 200);
        for i in 0..200 {
            assert_eq!(grid.tile_at(i, 0), Tile::Wall);
            assert_eq!(grid.tile_at(i, 199), Tile::Wall);
            assert_eq!(grid.tile_at(0, i), Tile::Wall);
            assert_eq!(grid.tile_at(199, i), Tile::Wall);
        }
    }

    #[test]
    fn isolated_rooms_have_exactly_one_door() {
        let grid = WorldGrid::generate_with_layout(20, 20, &isolated_layout());
        assert_eq!(grid.rooms().len(), 3);
        for room in grid.rooms() {
            let perimeter = room.perimeter();
            let doors: Vec<_> = perimeter
                .iter()
                .filter(|&&(x, y)| grid.tile_at(x, y) == Tile::Door)
                .collect();
            assert_eq!(doors, vec![&room.door_cell()]);
            for &(x, y) in &perimeter {
                if (x, y) != room.door_cell() {
                    assert_eq!(grid.tile_at(x, y), Tile::Wall, "room {:?} at ({x}, {y})", room);
                }
            }
        }
    }

    #[test]
    fn room_interiors_are_floor() {
        let grid = WorldGrid::generate_with_layout(20, 20, &isolated_layout());
        let room = &grid.rooms()[0];
        for y in room.y + 1..room.y + room.height - 1 {
            for x in room.x + 1..room.x + room.width - 1 {
                assert_eq!(grid.tile_at(x, y), Tile::Floor);
            }
        }
    }

    #[test]
    fn default_world_rooms_keep_single_door() {
        let grid = WorldGrid::generate(200, 200);
        assert_eq!(grid.rooms().len(), 4);
        for room in grid.rooms() {
            let door_count = room
                .perimeter()
                .iter()
                .filter(|&&(x, y)| grid.tile_at(x, y) == Tile::Door)
                .count();
            assert_eq!(door_count, 1);
            assert_eq!(grid.tile_at(room.door_cell().0, room.door_cell().1), Tile::Door);
        }
    }

    #[test]
    fn corridor_cells_are_floor_and_adjacent() {
        let grid = WorldGrid::generate_with_layout(20, 20, &isolated_layout());
        for corridor in grid.corridors() {
            let cells = corridor_cells(corridor.from, corridor.to);
            assert_eq!(cells.first(), Some(&corridor.from));
            assert_eq!(cells.last(), Some(&corridor.to));
            for &(x, y) in &cells {
                assert_eq!(grid.tile_at(x, y), Tile::Floor, "corridor cell ({x}, {y})");
            }
            for pair in cells.windows(2) {
                let (ax, ay) = pair[0];
                let (bx, by) = pair[1];
                assert!((ax - bx).abs() <= 1 && (ay - by).abs() <= 1);
                assert_ne!(pair[0], pair[1]);
            }
        }
    }

    #[test]
    fn corridor_lines_have_no_gaps_for_any_slope() {
        let origin = (50, 50);
        for dx in -13..=13 {
            for dy in -13..=13 {
                let to = (origin.0 + dx, origin.1 + dy);
                let cells = corridor_cells(origin, to);
                assert_eq!(cells.len() as i32, dx.abs().max(dy.abs()) + 1);
                assert_eq!(*cells.last().unwrap(), to);
                for pair in cells.windows(2) {
                    assert!((pair[0].0 - pair[1].0).abs() <= 1);
                    assert!((pair[0].1 - pair[1].1).abs() <= 1);
                }
            }
        }
    }

    #[test]
    fn corridor_opens_room_wall_but_keeps_doors() {
        let layout = WorldLayout {
            rooms: vec![RoomSpec::new(4, 4, 6, 7)],
            corridors: vec![CorridorSpec::new((1, 7), (12, 7))],
        };
        let grid = WorldGrid::generate_with_layout(16, 16, &layout);
        // Door is (4, 7), right on the corridor.
        assert_eq!(grid.tile_at(4, 7), Tile::Door);
        assert_eq!(grid.tile_at(9, 7), Tile::Floor);
    }

    #[test]
    fn oversized_pieces_are_skipped() {
        let layout = WorldLayout {
            rooms: vec![RoomSpec::new(0, 0, 5, 5), RoomSpec::new(5, 5, 30, 3)],
            corridors: vec![CorridorSpec::new((0, 3), (5, 3))],
        };
        let grid = WorldGrid::generate_with_layout(12, 12, &layout);
        assert!(grid.rooms().is_empty());
        assert!(grid.corridors().is_empty());
        assert_eq!(grid.tile_at(0, 3), Tile::Wall);
    }

    #[test]
    fn room_extent_past_integer_range_is_skipped() {
        let layout = WorldLayout {
            rooms: vec![
                RoomSpec::new(5, 5, i32::MAX, 5),
                RoomSpec::new(5, 5, 5, i32::MAX),
                RoomSpec::new(2, 2, 4, 4),
            ],
            corridors: Vec::new(),
        };
        let grid = WorldGrid::generate_with_layout(20, 20, &layout);
        assert_eq!(grid.rooms().len(), 1);
        assert_eq!(grid.rooms()[0].x, 2);
        assert_eq!(grid.tile_at(10, 5), Tile::Floor);
    }

    #[test]
    fn huge_world_request_is_clamped() {
        let grid = WorldGrid::generate_with_layout(i32::MAX, 3, &WorldLayout::empty());
        assert_eq!(grid.width(), MAX_WORLD_SIDE);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.tile_at(MAX_WORLD_SIDE - 1, 1), Tile::Wall);
    }

    #[test]
    fn generation_is_deterministic() {
        let a = WorldGrid::generate(200, 200);
        let b = WorldGrid::generate(200, 200);
        assert_eq!(a.tiles, b.tiles);
    }

    #[test]
    fn empty_world_is_all_wall() {
        let grid = WorldGrid::generate(0, 0);
        assert_eq!(grid.tile_at(0, 0), Tile::Wall);
    }
}
