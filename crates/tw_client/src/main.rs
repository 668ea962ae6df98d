//! Headless demo: runs the client against an in-memory server and a
//! recording surface, then logs what happened.
//!
//! The loopback transport plays the server. It acknowledges the local player,
//! introduces two others, relays a chat line and a move, and disconnects
//! one of them, while the local player holds "d" and walks right.

use std::path::Path;

use serde_json::json;
use tw_client::{load_config_from_path, ClientConfig, GameClient, Phase};
use tw_net::{event, LoopbackTransport};
use tw_render::{RecordingSurface, StaticImage};

const CONFIG_PATH: &str = "assets/config/client.json";
const LOCAL_ID: &str = "local-1";
const DEMO_TICKS: u32 = 120;
const FRAME_MS: f64 = 1000.0 / 60.0;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Tilewalk headless demo starting...");

    let config = load_config_from_path(Path::new(CONFIG_PATH)).unwrap_or_else(|err| {
        log::warn!("{err}; using default config");
        ClientConfig::default()
    });

    let grid = config.build_world();
    let server = LoopbackTransport::new(Some(LOCAL_ID));
    let mut client: GameClient<LoopbackTransport, StaticImage> =
        GameClient::new(config.clone(), grid, server.clone());
    for key in config.required_images() {
        client.register_image(&key, StaticImage::ready(&key));
    }

    let spawn = config.spawn_position();
    server.deliver(
        event::CURRENT_PLAYERS,
        json!({
            LOCAL_ID: { "id": LOCAL_ID, "x": spawn.x, "y": spawn.y, "name": "You" },
            "npc-7": { "id": "npc-7", "x": spawn.x + 96.0, "y": spawn.y, "direction": 1, "name": "Wren" }
        }),
    );
    server.deliver(
        event::NEW_PLAYER,
        json!({ "id": "npc-9", "x": spawn.x, "y": spawn.y + 64.0, "name": "Moss" }),
    );

    let mut surface = RecordingSurface::new(800, 600);
    let mut emitted = 0;
    let mut drawn = 0;
    client.key_down("d");

    for i in 0..DEMO_TICKS {
        match i {
            30 => {
                server.deliver(
                    event::CHAT_MESSAGE,
                    json!({ "playerId": "npc-7", "message": "mind the walls" }),
                );
            }
            60 => {
                client.submit_chat("  on my way  ");
            }
            90 => {
                server.deliver(
                    event::PLAYER_MOVED,
                    json!({ "playerId": "npc-7", "x": spawn.x + 128.0, "y": spawn.y, "direction": 2, "frameIndex": 3 }),
                );
            }
            100 => {
                server.deliver(event::PLAYER_DISCONNECTED, json!("npc-9"));
            }
            _ => {}
        }

        let report = client.tick(f64::from(i) * FRAME_MS, &mut surface);
        if report.movement_emitted {
            emitted += 1;
        }
        drawn = report.entities_drawn;
        if report.phase == Phase::Loading {
            log::debug!("Tick {i}: still loading");
        }
    }
    client.key_up("d");

    let local = client.store().local();
    log::info!(
        "Demo finished after {} ticks: player '{}' at ({:.1}, {:.1}) facing {:?}",
        DEMO_TICKS,
        local.name,
        local.position.x,
        local.position.y,
        local.direction
    );
    log::info!(
        "{} movement messages sent, {} chat messages sent, {} remote players, {} entities in last frame",
        emitted,
        server.sent_count(event::CHAT_MESSAGE),
        client.store().remote_count(),
        drawn
    );
    log::info!(
        "Recorded {} draw ops; last frame has {} ops; {:.1} fps average",
        surface.ops.len(),
        surface.last_frame().len(),
        client.clock().smoothed_fps
    );
}
