//! Network sync adapter between the transport and the entity store.
//!
//! Transport callbacks can fire at any moment between ticks. They never touch
//! the store. Each one decodes its payload and queues an [`InboundEvent`],
//! and the render loop drains the queue at the start of the next tick. Every
//! tick therefore sees a consistent store, whatever order the host delivers
//! callbacks in.

use std::sync::mpsc::{self, Receiver};

use glam::Vec2;
use tw_core::Direction;
use tw_net::{
    decode_inbound, event, ChatSubmit, EntitySnapshot, InboundEvent, OutboundEvent,
    PlayerMovement, Transport,
};

use crate::entity::Entity;
use crate::store::EntityStore;

pub struct NetworkSync<T: Transport> {
    transport: T,
    inbox: Receiver<InboundEvent>,
}

impl<T: Transport> NetworkSync<T> {
    /// Subscribe to every inbound event on `transport`.
    pub fn attach(mut transport: T) -> Self {
        let (tx, inbox) = mpsc::channel();
        for name in event::INBOUND {
            let tx = tx.clone();
            transport.on(
                name,
                Box::new(move |payload| match decode_inbound(name, payload) {
                    Ok(ev) => {
                        if tx.send(ev).is_err() {
                            log::debug!("Dropping '{name}': client is gone");
                        }
                    }
                    Err(err) => log::warn!("{err}"),
                }),
            );
        }
        Self { transport, inbox }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn connection_id(&self) -> Option<String> {
        self.transport.connection_id()
    }

    /// Apply every queued inbound event to `store`. Returns how many were applied.
    pub fn drain(&mut self, store: &mut EntityStore, now_ms: f64) -> usize {
        let mut applied = 0;
        while let Ok(ev) = self.inbox.try_recv() {
            self.apply(store, ev, now_ms);
            applied += 1;
        }
        applied
    }

    fn apply(&self, store: &mut EntityStore, ev: InboundEvent, now_ms: f64) {
        match ev {
            InboundEvent::Snapshot(players) => {
                let local_id = self.connection_id();
                store.replace_remotes(&players, local_id.as_deref());
                if let Some(id) = local_id {
                    if let Some(data) = players.get(&id) {
                        if store.local_id().is_none() {
                            log::info!("Server acknowledged local player as '{id}'");
                        }
                        store.set_local_from_snapshot(&id, data);
                    }
                }
                log::debug!("Snapshot applied: {} remote players", store.remote_count());
            }
            InboundEvent::Joined { id, entity } => {
                if self.connection_id().as_deref() == Some(id.as_str()) {
                    log::debug!("Ignoring join echo for local player '{id}'");
                    return;
                }
                let fresh = EntitySnapshot {
                    direction: Direction::default(),
                    frame_index: 0,
                    ..entity
                };
                store.upsert_remote(&id, &fresh);
                log::info!("Player '{id}' joined");
            }
            InboundEvent::Moved(moved) => {
                let applied = store.update_remote_motion(
                    &moved.player_id,
                    Vec2::new(moved.x, moved.y),
                    moved.direction,
                    moved.frame_index,
                );
                if !applied {
                    log::trace!("Ignoring movement for unknown player '{}'", moved.player_id);
                }
            }
            InboundEvent::Left { id } => {
                if store.remove_remote(&id) {
                    log::info!("Player '{id}' left");
                } else {
                    log::debug!("Ignoring disconnect for unknown player '{id}'");
                }
            }
            InboundEvent::Chat(chat) => {
                if store.is_known(&chat.player_id) {
                    store.post_chat(&chat.player_id, &chat.message, now_ms);
                } else {
                    log::debug!("Ignoring chat from unknown player '{}'", chat.player_id);
                }
            }
        }
    }

    pub fn emit_movement(&mut self, entity: &Entity) {
        self.send(OutboundEvent::Movement(PlayerMovement {
            x: entity.position.x,
            y: entity.position.y,
            direction: entity.direction,
            frame_index: entity.frame_index(),
        }));
    }

    /// Trim and send a chat line. Blank input is rejected without emitting.
    pub fn submit_chat(&mut self, text: &str) -> bool {
        let message = text.trim();
        if message.is_empty() {
            return false;
        }
        self.send(OutboundEvent::Chat(ChatSubmit {
            message: message.to_string(),
        }));
        true
    }

    fn send(&mut self, ev: OutboundEvent) {
        match ev.payload() {
            Ok(payload) => self.transport.emit(ev.name(), payload),
            Err(err) => log::error!("{err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tw_core::WalkCycle;
    use tw_net::LoopbackTransport;

    fn setup(conn: Option<&str>) -> (LoopbackTransport, NetworkSync<LoopbackTransport>, EntityStore) {
        let server = LoopbackTransport::new(conn);
        let sync = NetworkSync::attach(server.clone());
        let store = EntityStore::new(
            Entity::new(Vec2::new(100.0, 100.0), WalkCycle::new(8, 100_000), "hero.png"),
            5000,
        );
        (server, sync, store)
    }

    #[test]
    fn events_wait_in_queue_until_drained() {
        let (server, mut sync, mut store) = setup(Some("me"));
        server.deliver(event::NEW_PLAYER, json!({ "id": "p2", "x": 1.0, "y": 2.0, "name": "Bo" }));
        assert_eq!(store.remote_count(), 0);
        assert_eq!(sync.drain(&mut store, 0.0), 1);
        assert_eq!(store.remote_count(), 1);
        assert_eq!(sync.drain(&mut store, 0.0), 0);
    }

    #[test]
    fn snapshot_with_local_id_merges_into_local_player() {
        let (server, mut sync, mut store) = setup(Some("me"));
        server.deliver(
            event::CURRENT_PLAYERS,
            json!({
                "me": { "id": "me", "x": 640.0, "y": 480.0, "direction": 5, "frameIndex": 3, "name": "Me" },
                "p2": { "id": "p2", "x": 10.0, "y": 10.0 }
            }),
        );
        sync.drain(&mut store, 0.0);
        let local = store.local();
        assert_eq!(local.id.as_deref(), Some("me"));
        assert_eq!(local.position, Vec2::new(640.0, 480.0));
        assert_eq!(local.direction, Direction::DownRight);
        assert_eq!(local.frame_index(), 3);
        assert_eq!(local.sprite, "hero.png");
        assert_eq!(store.remote_count(), 1);
    }

    #[test]
    fn snapshot_without_local_id_leaves_local_unassigned() {
        let (server, mut sync, mut store) = setup(Some("me"));
        server.deliver(event::CURRENT_PLAYERS, json!({ "p2": { "x": 1.0, "y": 1.0 } }));
        sync.drain(&mut store, 0.0);
        assert!(store.local_id().is_none());
        assert_eq!(store.local().position, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn join_uses_default_facing_and_frame() {
        let (server, mut sync, mut store) = setup(Some("me"));
        server.deliver(
            event::NEW_PLAYER,
            json!({ "id": "p2", "x": 1.0, "y": 2.0, "direction": 6, "frameIndex": 5 }),
        );
        sync.drain(&mut store, 0.0);
        let p2 = store.remote("p2").expect("joined");
        assert_eq!(p2.direction, Direction::Down);
        assert_eq!(p2.frame_index(), 0);
    }

    #[test]
    fn join_echo_for_local_id_is_ignored() {
        let (server, mut sync, mut store) = setup(Some("me"));
        server.deliver(
            event::NEW_PLAYER,
            json!({ "id": "me", "x": 900.0, "y": 900.0, "name": "Echo" }),
        );
        sync.drain(&mut store, 0.0);
        assert_eq!(store.remote_count(), 0);
        assert!(store.remote("me").is_none());
        assert_eq!(store.local().position, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn moved_after_left_does_not_resurrect() {
        let (server, mut sync, mut store) = setup(Some("me"));
        server.deliver(event::NEW_PLAYER, json!({ "id": "p2", "x": 1.0, "y": 2.0 }));
        server.deliver(event::PLAYER_DISCONNECTED, json!("p2"));
        server.deliver(
            event::PLAYER_MOVED,
            json!({ "playerId": "p2", "x": 9.0, "y": 9.0, "direction": 1, "frameIndex": 1 }),
        );
        assert_eq!(sync.drain(&mut store, 0.0), 3);
        assert_eq!(store.remote_count(), 0);
    }

    #[test]
    fn disconnect_for_unknown_id_is_no_op() {
        let (server, mut sync, mut store) = setup(Some("me"));
        server.deliver(event::NEW_PLAYER, json!({ "id": "p2", "x": 1.0, "y": 2.0 }));
        sync.drain(&mut store, 0.0);
        server.deliver(event::PLAYER_DISCONNECTED, json!({ "id": "nobody" }));
        sync.drain(&mut store, 0.0);
        assert_eq!(store.remote_count(), 1);
    }

    #[test]
    fn malformed_payload_is_dropped() {
        let (server, mut sync, mut store) = setup(Some("me"));
        server.deliver(event::PLAYER_MOVED, json!({ "bogus": true }));
        assert_eq!(sync.drain(&mut store, 0.0), 0);
    }

    #[test]
    fn chat_from_known_players_only() {
        let (server, mut sync, mut store) = setup(Some("me"));
        server.deliver(event::CURRENT_PLAYERS, json!({ "me": { "x": 0.0, "y": 0.0 } }));
        server.deliver(event::CHAT_MESSAGE, json!({ "playerId": "me", "message": "hi all" }));
        server.deliver(event::CHAT_MESSAGE, json!({ "playerId": "ghost", "message": "boo" }));
        sync.drain(&mut store, 1000.0);
        assert_eq!(store.chat_for("me", 1000.0).map(|b| b.text.as_str()), Some("hi all"));
        assert!(store.chat_for("ghost", 1000.0).is_none());
    }

    #[test]
    fn submit_chat_trims_and_rejects_blank() {
        let (server, mut sync, _store) = setup(Some("me"));
        assert!(!sync.submit_chat("   \t "));
        assert!(!sync.submit_chat(""));
        assert_eq!(server.sent_count(event::CHAT_MESSAGE), 0);
        assert!(sync.submit_chat("  hello  "));
        assert_eq!(
            server.sent(),
            vec![(event::CHAT_MESSAGE.to_string(), json!({ "message": "hello" }))]
        );
    }

    #[test]
    fn emit_movement_sends_current_state() {
        let (server, mut sync, store) = setup(Some("me"));
        sync.emit_movement(store.local());
        assert_eq!(
            server.sent(),
            vec![(
                event::PLAYER_MOVEMENT.to_string(),
                json!({ "x": 100.0, "y": 100.0, "direction": 0, "frameIndex": 0 })
            )]
        );
    }
}
