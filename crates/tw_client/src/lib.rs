//! Tilewalk client core: entity store, movement, network sync and the
//! per-frame render loop, driven by a host that supplies a transport, a
//! drawing surface and image loading.

pub mod assets;
pub mod chat;
pub mod client;
pub mod config;
pub mod entity;
pub mod movement;
#[cfg(test)]
mod replay;
pub mod store;
pub mod sync;

pub use assets::{ImageSet, LoadState};
pub use chat::{ChatBoard, ChatBubble};
pub use client::{FrameReport, GameClient, Phase};
pub use config::{load_config_from_path, AssetPaths, ClientConfig};
pub use entity::Entity;
pub use movement::{MotionChange, MovementEngine, StepOutcome};
pub use store::EntityStore;
pub use sync::NetworkSync;
