pub mod collision;
pub mod grid;
pub mod layout;

pub use collision::{resolve_move, tile_center, world_to_tile, MoveDecision};
pub use grid::{corridor_cells, Tile, WorldGrid, MAX_WORLD_SIDE};
pub use layout::{load_layout_from_path, CorridorSpec, RoomSpec, WallSide, WorldLayout};
