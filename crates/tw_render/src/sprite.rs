use glam::Vec2;

use crate::surface::Rect;

/// Fixed-size cell grid over a sprite sheet: columns are animation frames,
/// rows are facings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteSheet {
    pub cell_w: f32,
    pub cell_h: f32,
}

impl SpriteSheet {
    pub fn new(cell_w: f32, cell_h: f32) -> Self {
        Self { cell_w, cell_h }
    }

    pub fn cell(&self, frame_index: usize, row: usize) -> Rect {
        Rect::new(
            frame_index as f32 * self.cell_w,
            row as f32 * self.cell_h,
            self.cell_w,
            self.cell_h,
        )
    }

    /// Destination rectangle with the cell centred on `screen`.
    pub fn centered_at(&self, screen: Vec2, scale: f32) -> Rect {
        let w = self.cell_w * scale;
        let h = self.cell_h * scale;
        Rect::new(screen.x - w / 2.0, screen.y - h / 2.0, w, h)
    }
}
