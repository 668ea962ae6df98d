use glam::Vec2;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use tw_core::WorldProfile;
use tw_render::CameraMode;
use tw_world::{load_layout_from_path, WorldGrid, WorldLayout, MAX_WORLD_SIDE};

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ClientConfig {
    #[serde(default)]
    pub profile: WorldProfile,
    #[serde(default = "default_tile_size")]
    pub tile_size: f32,
    #[serde(default = "default_world_tiles")]
    pub world_width: i32,
    #[serde(default = "default_world_tiles")]
    pub world_height: i32,
    #[serde(default)]
    pub layout_path: Option<PathBuf>,
    #[serde(default = "default_spawn")]
    pub spawn: [f32; 2],
    #[serde(default = "default_movement_speed")]
    pub movement_speed: f32,
    #[serde(default = "default_animation_frame_ms")]
    pub animation_frame_ms: u64,
    #[serde(default = "default_frame_count")]
    pub frame_count: usize,
    #[serde(default = "default_sprite_cell")]
    pub sprite_width: f32,
    #[serde(default = "default_sprite_cell")]
    pub sprite_height: f32,
    /// Falls back to the profile's camera when absent.
    #[serde(default)]
    pub camera: Option<CameraMode>,
    #[serde(default = "default_chat_ttl_ms")]
    pub chat_ttl_ms: u64,
    #[serde(default = "default_max_frame_dt")]
    pub max_frame_dt: f64,
    #[serde(default)]
    pub assets: AssetPaths,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AssetPaths {
    #[serde(default = "default_player_sprite")]
    pub player_sprite: String,
    /// Indexed by tile kind: floor, wall, door.
    #[serde(default = "default_tile_images")]
    pub tile_images: [String; 3],
    #[serde(default = "default_background")]
    pub background: String,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            player_sprite: default_player_sprite(),
            tile_images: default_tile_images(),
            background: default_background(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            profile: WorldProfile::default(),
            tile_size: default_tile_size(),
            world_width: default_world_tiles(),
            world_height: default_world_tiles(),
            layout_path: None,
            spawn: default_spawn(),
            movement_speed: default_movement_speed(),
            animation_frame_ms: default_animation_frame_ms(),
            frame_count: default_frame_count(),
            sprite_width: default_sprite_cell(),
            sprite_height: default_sprite_cell(),
            camera: None,
            chat_ttl_ms: default_chat_ttl_ms(),
            max_frame_dt: default_max_frame_dt(),
            assets: AssetPaths::default(),
        }
    }
}

impl ClientConfig {
    pub fn free_roam() -> Self {
        Self {
            profile: WorldProfile::FreeRoam,
            ..Self::default()
        }
    }

    pub fn camera_mode(&self) -> CameraMode {
        match (self.camera, self.profile) {
            (Some(mode), _) => mode,
            (None, WorldProfile::TileGrid) => CameraMode::Eased { factor: 0.05 },
            (None, WorldProfile::FreeRoam) => CameraMode::ZoomedSnap { zoom: 2.0 },
        }
    }

    pub fn spawn_position(&self) -> Vec2 {
        Vec2::new(self.spawn[0], self.spawn[1])
    }

    pub fn frame_period_us(&self) -> u64 {
        self.animation_frame_ms.saturating_mul(1000)
    }

    /// Images that must settle before the render loop starts.
    pub fn required_images(&self) -> Vec<String> {
        let mut keys = vec![self.assets.player_sprite.clone()];
        match self.profile {
            WorldProfile::TileGrid => keys.extend(self.assets.tile_images.iter().cloned()),
            WorldProfile::FreeRoam => keys.push(self.assets.background.clone()),
        }
        keys
    }

    /// Generate the world, using `layout_path` when one is configured.
    /// A layout that fails to load is reported and the built-in one is used.
    pub fn build_world(&self) -> WorldGrid {
        let layout = match &self.layout_path {
            Some(path) => load_layout_from_path(path).unwrap_or_else(|err| {
                log::error!("{err}; using built-in layout");
                WorldLayout::default()
            }),
            None => WorldLayout::default(),
        };
        WorldGrid::generate_with_layout(self.world_width, self.world_height, &layout)
    }
}

pub fn load_config_from_path(path: &Path) -> Result<ClientConfig, String> {
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config file {}: {e}", path.display()))?;
    let config: ClientConfig = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse config JSON {}: {e}", path.display()))?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &ClientConfig) -> Result<(), String> {
    if config.tile_size <= 0.0 {
        return Err("Config validation failed: tile_size must be > 0".to_string());
    }
    if config.world_width <= 0 || config.world_height <= 0 {
        return Err("Config validation failed: world_width and world_height must be > 0".to_string());
    }
    if config.world_width > MAX_WORLD_SIDE || config.world_height > MAX_WORLD_SIDE {
        return Err(format!(
            "Config validation failed: world_width and world_height must be <= {MAX_WORLD_SIDE}"
        ));
    }
    if config.movement_speed < 0.0 {
        return Err("Config validation failed: movement_speed must be >= 0".to_string());
    }
    if config.frame_count == 0 || config.animation_frame_ms == 0 {
        return Err(
            "Config validation failed: frame_count and animation_frame_ms must be > 0".to_string(),
        );
    }
    if config.sprite_width <= 0.0 || config.sprite_height <= 0.0 {
        return Err("Config validation failed: sprite size must be > 0".to_string());
    }
    if config.chat_ttl_ms == 0 || config.max_frame_dt <= 0.0 {
        return Err("Config validation failed: chat_ttl_ms and max_frame_dt must be > 0".to_string());
    }
    match config.camera_mode() {
        CameraMode::Eased { factor } if !(factor > 0.0 && factor <= 1.0) => Err(format!(
            "Config validation failed: easing factor {factor} must be in (0, 1]"
        )),
        CameraMode::ZoomedSnap { zoom } if zoom <= 0.0 => Err(format!(
            "Config validation failed: zoom {zoom} must be > 0"
        )),
        _ => Ok(()),
    }
}

const fn default_tile_size() -> f32 {
    64.0
}

const fn default_world_tiles() -> i32 {
    200
}

const fn default_spawn() -> [f32; 2] {
    [100.0, 100.0]
}

const fn default_movement_speed() -> f32 {
    200.0
}

const fn default_animation_frame_ms() -> u64 {
    100
}

const fn default_frame_count() -> usize {
    8
}

const fn default_sprite_cell() -> f32 {
    64.0
}

const fn default_chat_ttl_ms() -> u64 {
    5000
}

const fn default_max_frame_dt() -> f64 {
    0.25
}

fn default_player_sprite() -> String {
    "Images/player_sprite_frames.png".to_string()
}

fn default_tile_images() -> [String; 3] {
    [
        "Images/tile_0.png".to_string(),
        "Images/tile_1.png".to_string(),
        "Images/tile_2.png".to_string(),
    ]
}

fn default_background() -> String {
    "Images/background.png".to_string()
}
