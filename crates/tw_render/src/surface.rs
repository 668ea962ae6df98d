//! Drawing-surface abstraction the render loop paints through.
//!
//! The host owns the real canvas and bitmaps; the core only needs these few
//! primitives. Dimensions are queried every frame because the host may
//! resize the surface at any time.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color {
        r: 255,
        g: 255,
        b: 255,
    };
    pub const YELLOW: Color = Color {
        r: 255,
        g: 255,
        b: 0,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    Left,
    #[default]
    Center,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub color: Color,
    pub size_px: u32,
    pub align: TextAlign,
}

impl TextStyle {
    pub fn label(color: Color) -> Self {
        Self {
            color,
            size_px: 16,
            align: TextAlign::Center,
        }
    }
}

/// Asynchronously loaded bitmap.
pub trait ImageResource {
    fn is_ready(&self) -> bool;
}

pub trait DrawSurface {
    type Image: ImageResource;

    /// Current size in pixels.
    fn size(&self) -> (u32, u32);
    fn clear(&mut self);
    fn draw_image(&mut self, image: &Self::Image, src: Rect, dst: Rect);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn fill_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle);
}
