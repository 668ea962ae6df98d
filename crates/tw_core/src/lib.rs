pub mod animation;
pub mod direction;
pub mod input;
pub mod profile;
pub mod time;

pub use animation::WalkCycle;
pub use direction::Direction;
pub use input::{InputState, Key};
pub use profile::WorldProfile;
pub use time::FrameClock;
