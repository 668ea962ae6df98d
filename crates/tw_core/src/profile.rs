use serde::{Deserialize, Serialize};

/// Deployment profile: which of the two world variants the client runs.
/// Both share the same movement, animation and sync code; the profile only
/// selects collision, background and camera defaults.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorldProfile {
    /// Generated tile dungeon with wall/door collision and eased camera.
    #[default]
    TileGrid,
    /// Open background image, no collision, zoomed camera.
    FreeRoam,
}

impl WorldProfile {
    pub const ALL: &'static [WorldProfile] = &[WorldProfile::TileGrid, WorldProfile::FreeRoam];

    pub fn label(self) -> &'static str {
        match self {
            Self::TileGrid => "tile grid",
            Self::FreeRoam => "free roam",
        }
    }

    pub fn uses_collision(self) -> bool {
        matches!(self, Self::TileGrid)
    }
}

impl std::fmt::Display for WorldProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
