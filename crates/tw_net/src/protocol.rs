//! Wire protocol: event names and the JSON payload of each event.
//!
//! Field names are camelCase on the wire. Inbound payloads are decoded into
//! [`InboundEvent`] values. A payload that does not match its event's schema
//! becomes an `Err`, and the caller drops it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tw_core::Direction;

pub mod event {
    pub const PLAYER_MOVEMENT: &str = "playerMovement";
    pub const CHAT_MESSAGE: &str = "chatMessage";
    pub const CURRENT_PLAYERS: &str = "currentPlayers";
    pub const NEW_PLAYER: &str = "newPlayer";
    pub const PLAYER_MOVED: &str = "playerMoved";
    pub const PLAYER_DISCONNECTED: &str = "playerDisconnected";

    /// Every event the client subscribes to.
    pub const INBOUND: [&str; 5] = [
        CURRENT_PLAYERS,
        NEW_PLAYER,
        PLAYER_MOVED,
        PLAYER_DISCONNECTED,
        CHAT_MESSAGE,
    ];
}

/// One entity as the server describes it in snapshots and join events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitySnapshot {
    #[serde(default, alias = "playerId", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub direction: Direction,
    #[serde(default)]
    pub frame_index: usize,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerMovement {
    pub x: f32,
    pub y: f32,
    pub direction: Direction,
    pub frame_index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerMoved {
    pub player_id: String,
    pub x: f32,
    pub y: f32,
    pub direction: Direction,
    pub frame_index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSubmit {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatBroadcast {
    pub player_id: String,
    pub message: String,
}

/// Servers send either the bare id or `{ "id": ... }`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
enum DisconnectPayload {
    Bare(String),
    Wrapped { id: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    Snapshot(BTreeMap<String, EntitySnapshot>),
    Joined { id: String, entity: EntitySnapshot },
    Moved(PlayerMoved),
    Left { id: String },
    Chat(ChatBroadcast),
}

impl InboundEvent {
    pub fn name(&self) -> &'static str {
        match self {
            InboundEvent::Snapshot(_) => event::CURRENT_PLAYERS,
            InboundEvent::Joined { .. } => event::NEW_PLAYER,
            InboundEvent::Moved(_) => event::PLAYER_MOVED,
            InboundEvent::Left { .. } => event::PLAYER_DISCONNECTED,
            InboundEvent::Chat(_) => event::CHAT_MESSAGE,
        }
    }
}

pub fn decode_inbound(name: &str, payload: Value) -> Result<InboundEvent, String> {
    let bad = |e: serde_json::Error| format!("Malformed '{name}' payload: {e}");
    match name {
        event::CURRENT_PLAYERS => {
            let players: BTreeMap<String, EntitySnapshot> =
                serde_json::from_value(payload).map_err(bad)?;
            Ok(InboundEvent::Snapshot(players))
        }
        event::NEW_PLAYER => {
            let entity: EntitySnapshot = serde_json::from_value(payload).map_err(bad)?;
            match entity.id.clone() {
                Some(id) if !id.is_empty() => Ok(InboundEvent::Joined { id, entity }),
                _ => Err(format!("Malformed '{name}' payload: missing id")),
            }
        }
        event::PLAYER_MOVED => Ok(InboundEvent::Moved(
            serde_json::from_value(payload).map_err(bad)?,
        )),
        event::PLAYER_DISCONNECTED => {
            let parsed: DisconnectPayload = serde_json::from_value(payload).map_err(bad)?;
            let id = match parsed {
                DisconnectPayload::Bare(id) | DisconnectPayload::Wrapped { id } => id,
            };
            Ok(InboundEvent::Left { id })
        }
        event::CHAT_MESSAGE => Ok(InboundEvent::Chat(
            serde_json::from_value(payload).map_err(bad)?,
        )),
        other => Err(format!("Unknown inbound event '{other}'")),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum OutboundEvent {
    Movement(PlayerMovement),
    Chat(ChatSubmit),
}

impl OutboundEvent {
    pub fn name(&self) -> &'static str {
        match self {
            OutboundEvent::Movement(_) => event::PLAYER_MOVEMENT,
            OutboundEvent::Chat(_) => event::CHAT_MESSAGE,
        }
    }

    pub fn payload(&self) -> Result<Value, String> {
        let encoded = match self {
            OutboundEvent::Movement(m) => serde_json::to_value(m),
            OutboundEvent::Chat(c) => serde_json::to_value(c),
        };
        encoded.map_err(|e| format!("Failed to encode '{}' payload: {e}", self.name()))
    }
}
