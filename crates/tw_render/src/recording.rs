//! Headless surface that records every primitive instead of rasterising.
//! Used by the demo binary and by render-loop tests.

use crate::surface::{Color, DrawSurface, ImageResource, Rect, TextStyle};

#[derive(Debug, Clone, PartialEq)]
pub struct StaticImage {
    pub name: String,
    pub ready: bool,
}

impl StaticImage {
    pub fn ready(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ready: true,
        }
    }

    pub fn pending(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ready: false,
        }
    }
}

impl ImageResource for StaticImage {
    fn is_ready(&self) -> bool {
        self.ready
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear,
    Image { name: String, src: Rect, dst: Rect },
    Fill { rect: Rect, color: Color },
    Text { text: String, x: f32, y: f32, color: Color },
}

pub struct RecordingSurface {
    pub width: u32,
    pub height: u32,
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }

    /// Operations recorded since the most recent clear.
    pub fn last_frame(&self) -> &[DrawOp] {
        let start = self
            .ops
            .iter()
            .rposition(|op| *op == DrawOp::Clear)
            .map_or(0, |i| i + 1);
        &self.ops[start..]
    }

    pub fn texts(&self) -> Vec<&str> {
        self.last_frame()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn images_named(&self, name: &str) -> Vec<(Rect, Rect)> {
        self.last_frame()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Image { name: n, src, dst } if n == name => Some((*src, *dst)),
                _ => None,
            })
            .collect()
    }
}

impl DrawSurface for RecordingSurface {
    type Image = StaticImage;

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.ops.push(DrawOp::Clear);
    }

    fn draw_image(&mut self, image: &StaticImage, src: Rect, dst: Rect) {
        self.ops.push(DrawOp::Image {
            name: image.name.clone(),
            src,
            dst,
        });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ops.push(DrawOp::Fill { rect, color });
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            x,
            y,
            color: style.color,
        });
    }
}
