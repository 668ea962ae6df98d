use serde::Deserialize;
use std::fs;
use std::path::Path;

use glam::Vec2;
use tw_core::{InputState, Key, WalkCycle};
use tw_world::WorldGrid;

use crate::entity::Entity;
use crate::movement::MovementEngine;

#[derive(Debug, Deserialize, Clone)]
pub struct ReplaySequence {
    #[serde(default = "default_dt")]
    pub fixed_dt: f64,
    #[serde(default = "default_speed")]
    pub speed: f32,
    pub frames: Vec<ReplayFrame>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReplayFrame {
    /// Symbolic names of the keys held during this frame.
    #[serde(default)]
    pub keys: Vec<String>,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReplayResult {
    pub position: Vec2,
    pub frame_index: usize,
    pub emitted: usize,
    pub blocked: usize,
}

impl ReplaySequence {
    pub fn expanded_keys(&self) -> Vec<&[String]> {
        let mut out = Vec::new();
        for frame in &self.frames {
            for _ in 0..frame.repeat.max(1) {
                out.push(frame.keys.as_slice());
            }
        }
        out
    }

    /// Drive one entity through every frame. `emitted` counts the ticks that
    /// would have sent a movement message.
    pub fn run(&self, engine: &MovementEngine, grid: Option<&WorldGrid>, start: Vec2) -> ReplayResult {
        let mut entity = Entity::new(start, WalkCycle::default(), "replay");
        let mut input = InputState::new();
        let mut emitted = 0;
        let mut blocked = 0;
        for keys in self.expanded_keys() {
            input.blur();
            for key in keys {
                input.key_down(key);
            }
            let change = engine.advance(input.intent(self.speed), self.fixed_dt, grid, &mut entity);
            emitted += usize::from(change.changed);
            blocked += usize::from(change.outcome.blocked);
        }
        ReplayResult {
            position: entity.position,
            frame_index: entity.frame_index(),
            emitted,
            blocked,
        }
    }
}

pub fn load_replay_from_path(path: &Path) -> Result<ReplaySequence, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let replay: ReplaySequence = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse replay JSON {}: {e}", path.display()))?;
    validate_replay(&replay)?;
    Ok(replay)
}

fn validate_replay(replay: &ReplaySequence) -> Result<(), String> {
    if replay.fixed_dt <= 0.0 {
        return Err("Replay validation failed: fixed_dt must be > 0".to_string());
    }
    if replay.frames.is_empty() {
        return Err("Replay validation failed: frames list is empty".to_string());
    }
    if replay.speed < 0.0 {
        return Err("Replay validation failed: speed must be >= 0".to_string());
    }
    let unknown = replay
        .frames
        .iter()
        .flat_map(|frame| frame.keys.iter())
        .find(|name| Key::from_name(name).is_none());
    match unknown {
        Some(name) => Err(format!("Replay validation failed: unknown key '{name}'")),
        None => Ok(()),
    }
}

const fn default_dt() -> f64 {
    1.0 / 60.0
}

const fn default_speed() -> f32 {
    200.0
}

const fn default_repeat() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};
    use tw_world::{RoomSpec, WorldLayout};

    const TS: f32 = 64.0;

    fn temp_file_path(name_hint: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "tw_replay_test_{}_{}_{}.json",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    fn sample_grid() -> WorldGrid {
        let layout = WorldLayout {
            rooms: vec![RoomSpec::new(4, 2, 6, 6)],
            corridors: Vec::new(),
        };
        WorldGrid::generate_with_layout(16, 12, &layout)
    }

    #[test]
    fn replay_file_parses_and_expands() {
        let path = temp_file_path("parse");
        fs::write(
            &path,
            r#"{
              "fixed_dt": 0.016666667,
              "frames": [
                { "keys": ["d"], "repeat": 3 },
                { "keys": ["w", "ArrowLeft"] }
              ]
            }"#,
        )
        .expect("write replay file");

        let replay = load_replay_from_path(&path).expect("replay should load");
        let expanded = replay.expanded_keys();
        assert_eq!(expanded.len(), 4);
        assert_eq!(expanded[3], ["w".to_string(), "ArrowLeft".to_string()]);
        assert_eq!(replay.speed, 200.0);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn empty_replay_is_rejected() {
        let path = temp_file_path("empty");
        fs::write(&path, r#"{ "frames": [] }"#).expect("write replay file");
        let err = load_replay_from_path(&path).expect_err("empty replay should fail");
        assert!(err.contains("frames list is empty"));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn unknown_key_names_are_rejected() {
        let path = temp_file_path("keys");
        fs::write(&path, r#"{ "frames": [{ "keys": ["d", "Space"] }] }"#)
            .expect("write replay file");
        let err = load_replay_from_path(&path).expect_err("unknown key should fail");
        assert!(err.contains("'Space'"));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn replay_run_is_deterministic() {
        let path = temp_file_path("deterministic");
        fs::write(
            &path,
            r#"{
              "fixed_dt": 0.016666667,
              "frames": [
                { "keys": ["d"], "repeat": 60 },
                { "keys": ["d", "s"], "repeat": 40 },
                { "keys": [], "repeat": 5 },
                { "keys": ["ArrowUp", "ArrowLeft"], "repeat": 45 }
              ]
            }"#,
        )
        .expect("write replay file");

        let replay = load_replay_from_path(&path).expect("replay should load");
        let grid = sample_grid();
        let engine = MovementEngine::new(TS);
        let start = Vec2::new(1.5 * TS, 1.5 * TS);

        let run_a = replay.run(&engine, Some(&grid), start);
        let run_b = replay.run(&engine, Some(&grid), start);
        assert_eq!(run_a, run_b);
        assert!(run_a.emitted > 0);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn replay_into_room_wall_stops_at_wall() {
        let replay = ReplaySequence {
            fixed_dt: 0.05,
            speed: 200.0,
            frames: vec![ReplayFrame {
                keys: vec!["d".to_string()],
                repeat: 40,
            }],
        };
        let grid = sample_grid();
        let engine = MovementEngine::new(TS);
        // Row 3 hits the room's left wall at column 4; the door is at row 5.
        let result = replay.run(&engine, Some(&grid), Vec2::new(1.5 * TS, 3.5 * TS));
        assert!(result.blocked > 0);
        assert!(result.position.x < 4.0 * TS);
        assert_eq!(result.position.y, 3.5 * TS);
        // 15 ticks of real movement, then the walk cycle still steps every
        // other tick while pushing against the wall.
        assert_eq!(result.position.x, 246.0);
        assert_eq!(result.emitted, 15 + 13);
    }
}
