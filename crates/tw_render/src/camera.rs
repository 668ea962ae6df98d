use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CameraMode {
    /// Exponential approach toward the player, a fixed fraction per tick.
    Eased { factor: f32 },
    /// Recomputed every tick from the player, scaled by `zoom`.
    ZoomedSnap { zoom: f32 },
}

impl Default for CameraMode {
    fn default() -> Self {
        CameraMode::Eased { factor: 0.05 }
    }
}

/// Visible slice of a tile grid: first column/row and the pixel offset the
/// first tile starts at, already rounded to whole pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileWindow {
    pub start_col: i32,
    pub start_row: i32,
    pub cols: i32,
    pub rows: i32,
    pub offset_x: f32,
    pub offset_y: f32,
    pub tile_px: f32,
}

impl TileWindow {
    /// Screen position of the tile at `(col, row)`.
    pub fn tile_origin(&self, col: i32, row: i32) -> Vec2 {
        Vec2::new(
            ((col - self.start_col) as f32 * self.tile_px + self.offset_x).round(),
            ((row - self.start_row) as f32 * self.tile_px + self.offset_y).round(),
        )
    }
}

pub struct Camera2D {
    /// World position shown at the top-left corner of the viewport.
    pub position: Vec2,
    pub mode: CameraMode,
    pub viewport: (u32, u32),
}

impl Camera2D {
    pub fn new(mode: CameraMode, viewport_width: u32, viewport_height: u32) -> Self {
        Self {
            position: Vec2::ZERO,
            mode,
            viewport: (viewport_width, viewport_height),
        }
    }

    pub fn zoom(&self) -> f32 {
        match self.mode {
            CameraMode::Eased { .. } => 1.0,
            CameraMode::ZoomedSnap { zoom } => zoom,
        }
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
    }

    /// Half the viewport, in world units.
    pub fn viewport_center(&self) -> Vec2 {
        Vec2::new(self.viewport.0 as f32, self.viewport.1 as f32) / (2.0 * self.zoom())
    }

    /// Camera position that puts `target` in the middle of the viewport.
    pub fn desired(&self, target: Vec2) -> Vec2 {
        target - self.viewport_center()
    }

    pub fn center_on(&mut self, target: Vec2) {
        self.position = self.desired(target);
    }

    /// Advance one tick toward `player`. The easing is per tick, so `_dt` is
    /// accepted for interface symmetry but does not scale the step.
    pub fn update(&mut self, player: Vec2, _dt: f64) -> Vec2 {
        let desired = self.desired(player);
        match self.mode {
            CameraMode::Eased { factor } => {
                self.position += (desired - self.position) * factor;
            }
            CameraMode::ZoomedSnap { .. } => {
                self.position = desired;
            }
        }
        self.position
    }

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        (world - self.position) * self.zoom()
    }

    pub fn tile_window(&self, tile_size: f32) -> TileWindow {
        let zoom = self.zoom();
        let tile_px = tile_size * zoom;
        let cam_px = self.position * zoom;
        TileWindow {
            start_col: (cam_px.x / tile_px).floor() as i32,
            start_row: (cam_px.y / tile_px).floor() as i32,
            cols: (self.viewport.0 as f32 / tile_px).ceil() as i32,
            rows: (self.viewport.1 as f32 / tile_px).ceil() as i32,
            offset_x: -cam_px.x.rem_euclid(tile_px).round(),
            offset_y: -cam_px.y.rem_euclid(tile_px).round(),
            tile_px,
        }
    }
}
