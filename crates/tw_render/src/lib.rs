pub mod camera;
pub mod recording;
pub mod sprite;
pub mod surface;

pub use camera::{Camera2D, CameraMode, TileWindow};
pub use recording::{DrawOp, RecordingSurface, StaticImage};
pub use sprite::SpriteSheet;
pub use surface::{Color, DrawSurface, ImageResource, Rect, TextAlign, TextStyle};
