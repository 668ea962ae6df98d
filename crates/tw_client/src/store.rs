//! Owner of every entity and chat bubble the client knows about.
//!
//! Remote entities are only ever created, changed or deleted through the
//! methods below, which the network sync adapter calls while draining
//! inbound events. The local player is mutated by the movement engine and,
//! for authoritative fields only, by server snapshots.

use std::collections::BTreeMap;

use glam::Vec2;
use tw_core::{Direction, WalkCycle};
use tw_net::EntitySnapshot;

use crate::chat::{ChatBoard, ChatBubble};
use crate::entity::Entity;

pub struct EntityStore {
    local: Entity,
    remotes: BTreeMap<String, Entity>,
    chat: ChatBoard,
}

impl EntityStore {
    pub fn new(local: Entity, chat_ttl_ms: u64) -> Self {
        Self {
            local,
            remotes: BTreeMap::new(),
            chat: ChatBoard::new(chat_ttl_ms),
        }
    }

    pub fn local(&self) -> &Entity {
        &self.local
    }

    pub fn local_mut(&mut self) -> &mut Entity {
        &mut self.local
    }

    pub fn local_id(&self) -> Option<&str> {
        self.local.id.as_deref()
    }

    pub fn remote(&self, id: &str) -> Option<&Entity> {
        self.remotes.get(id)
    }

    /// Remote entities in stable id order.
    pub fn remotes(&self) -> impl Iterator<Item = &Entity> {
        self.remotes.values()
    }

    pub fn remote_count(&self) -> usize {
        self.remotes.len()
    }

    /// New remotes share the local player's sheet and walk-cycle timing.
    fn remote_template(&self) -> WalkCycle {
        WalkCycle::new(self.local.walk.frame_count, self.local.walk.frame_period_us)
    }

    /// Throw away every remote and rebuild the map from a full snapshot.
    /// The entry for `local_id` is not mirrored as a remote.
    pub fn replace_remotes(
        &mut self,
        snapshot: &BTreeMap<String, EntitySnapshot>,
        local_id: Option<&str>,
    ) {
        let template = self.remote_template();
        let sprite = self.local.sprite.clone();
        self.remotes = snapshot
            .iter()
            .filter(|(id, _)| Some(id.as_str()) != local_id)
            .map(|(id, data)| {
                (
                    id.clone(),
                    Entity::from_snapshot(id, data, template.clone(), &sprite),
                )
            })
            .collect();
    }

    pub fn upsert_remote(&mut self, id: &str, data: &EntitySnapshot) {
        let template = self.remote_template();
        let entity = Entity::from_snapshot(id, data, template, &self.local.sprite);
        self.remotes.insert(id.to_string(), entity);
    }

    /// Update an existing remote. Returns false (and changes nothing) for an
    /// unknown id; entities that left are never resurrected by late updates.
    pub fn update_remote_motion(
        &mut self,
        id: &str,
        position: Vec2,
        direction: Direction,
        frame_index: usize,
    ) -> bool {
        match self.remotes.get_mut(id) {
            Some(entity) => {
                entity.apply_motion(position, direction, frame_index);
                true
            }
            None => false,
        }
    }

    pub fn remove_remote(&mut self, id: &str) -> bool {
        self.remotes.remove(id).is_some()
    }

    /// Adopt the server's view of the local player: id, position, facing and
    /// frame. The loaded sprite sheet is kept.
    pub fn set_local_from_snapshot(&mut self, id: &str, data: &EntitySnapshot) {
        self.local.id = Some(id.to_string());
        self.local
            .apply_motion(Vec2::new(data.x, data.y), data.direction, data.frame_index);
        if !data.name.is_empty() {
            self.local.name = data.name.clone();
        }
    }

    pub fn is_known(&self, id: &str) -> bool {
        self.local_id() == Some(id) || self.remotes.contains_key(id)
    }

    pub fn post_chat(&mut self, id: &str, text: &str, now_ms: f64) {
        self.chat.post(id, text, now_ms);
    }

    pub fn expire_chat(&mut self, now_ms: f64) -> usize {
        self.chat.fire_due(now_ms)
    }

    pub fn chat_for(&self, id: &str, now_ms: f64) -> Option<&ChatBubble> {
        self.chat.active(id, now_ms)
    }
}
