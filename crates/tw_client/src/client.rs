//! The per-frame client loop.
//!
//! `GameClient` owns every subsystem. The host calls [`GameClient::tick`] once
//! per display refresh with its timestamp and drawing surface. Input, image
//! and transport callbacks only record state, which the next tick consumes.
//!
//! Tick order:
//!   1. frame clock, drain inbound network events, fire chat timers
//!   2. Loading gate (nothing is drawn until every required image settles)
//!   3. movement and animation for the local player, emit on change
//!   4. camera follow
//!   5. clear, background, remote entities, local player last

use std::iter;

use glam::Vec2;
use tw_core::{FrameClock, InputState, WalkCycle, WorldProfile};
use tw_net::Transport;
use tw_render::{Camera2D, Color, DrawSurface, ImageResource, Rect, SpriteSheet, TextStyle};
use tw_world::WorldGrid;

use crate::assets::ImageSet;
use crate::config::ClientConfig;
use crate::entity::Entity;
use crate::movement::MovementEngine;
use crate::store::EntityStore;
use crate::sync::NetworkSync;

const NAME_LIFT_PX: f32 = 20.0;
const CHAT_LIFT_PX: f32 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Running,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    pub phase: Phase,
    pub dt: f64,
    pub movement_emitted: bool,
    pub entities_drawn: usize,
    pub inbound_applied: usize,
}

pub struct GameClient<T: Transport, I: ImageResource> {
    config: ClientConfig,
    grid: WorldGrid,
    clock: FrameClock,
    input: InputState,
    camera: Camera2D,
    movement: MovementEngine,
    sheet: SpriteSheet,
    store: EntityStore,
    sync: NetworkSync<T>,
    images: ImageSet<I>,
    required: Vec<String>,
    phase: Phase,
}

impl<T: Transport, I: ImageResource> GameClient<T, I> {
    pub fn new(config: ClientConfig, grid: WorldGrid, transport: T) -> Self {
        let walk = WalkCycle::new(config.frame_count, config.frame_period_us());
        let local = Entity::new(config.spawn_position(), walk, &config.assets.player_sprite);
        let mut camera = Camera2D::new(config.camera_mode(), 0, 0);
        camera.center_on(local.position);

        log::info!(
            "Client starting: profile={}, world {}x{} tiles",
            config.profile,
            grid.width(),
            grid.height()
        );

        Self {
            clock: FrameClock::new(config.max_frame_dt),
            input: InputState::new(),
            camera,
            movement: MovementEngine::new(config.tile_size),
            sheet: SpriteSheet::new(config.sprite_width, config.sprite_height),
            store: EntityStore::new(local, config.chat_ttl_ms),
            sync: NetworkSync::attach(transport),
            images: ImageSet::new(),
            required: config.required_images(),
            phase: Phase::Loading,
            grid,
            config,
        }
    }

    /// Hand over an image the host has started loading.
    pub fn register_image(&mut self, key: &str, image: I) {
        let required = self.required.iter().any(|k| k == key);
        self.images.insert(key, image, required);
    }

    pub fn on_image_loaded(&mut self, key: &str) {
        self.images.mark_loaded(key);
    }

    pub fn on_image_failed(&mut self, key: &str) {
        self.images.mark_failed(key);
    }

    pub fn key_down(&mut self, name: &str) -> bool {
        self.input.key_down(name)
    }

    pub fn key_up(&mut self, name: &str) -> bool {
        self.input.key_up(name)
    }

    pub fn blur(&mut self) {
        self.input.blur();
    }

    pub fn submit_chat(&mut self, text: &str) -> bool {
        self.sync.submit_chat(text)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn camera(&self) -> &Camera2D {
        &self.camera
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn grid(&self) -> &WorldGrid {
        &self.grid
    }

    pub fn transport(&self) -> &T {
        self.sync.transport()
    }

    pub fn tick<S: DrawSurface<Image = I>>(&mut self, timestamp_ms: f64, surface: &mut S) -> FrameReport {
        let dt = self.clock.begin_frame(timestamp_ms);
        let now_ms = self.clock.now_ms;
        let inbound_applied = self.sync.drain(&mut self.store, now_ms);
        let expired = self.store.expire_chat(now_ms);
        if expired > 0 {
            log::trace!("Expired {expired} chat bubbles");
        }

        let (width, height) = surface.size();
        self.camera.set_viewport(width, height);

        let mut report = FrameReport {
            phase: self.phase,
            dt,
            movement_emitted: false,
            entities_drawn: 0,
            inbound_applied,
        };

        if self.phase == Phase::Loading {
            if !self.images.all_settled() {
                return report;
            }
            self.phase = Phase::Running;
            report.phase = Phase::Running;
            // Resources may have taken a while; start from where the player is now.
            self.camera.center_on(self.store.local().position);
            log::info!("All required images settled, entering render loop");
        }

        if self.store.local_id().is_some() {
            let intent = self.input.intent(self.config.movement_speed) / self.camera.zoom();
            let grid = self.config.profile.uses_collision().then_some(&self.grid);
            let change = self.movement.advance(intent, dt, grid, self.store.local_mut());
            if change.changed {
                self.sync.emit_movement(self.store.local());
                report.movement_emitted = true;
            }
            self.camera.update(self.store.local().position, dt);
        }

        surface.clear();
        match self.config.profile {
            WorldProfile::TileGrid => self.draw_tiles(surface),
            WorldProfile::FreeRoam => self.draw_backdrop(surface),
        }
        report.entities_drawn = self.draw_entities(surface, now_ms);
        report
    }

    fn draw_tiles<S: DrawSurface<Image = I>>(&self, surface: &mut S) {
        let window = self.camera.tile_window(self.config.tile_size);
        let src = Rect::new(0.0, 0.0, self.config.tile_size, self.config.tile_size);
        // One extra row and column covers the partially visible edge tiles.
        for row in window.start_row..=window.start_row + window.rows {
            for col in window.start_col..=window.start_col + window.cols {
                let origin = window.tile_origin(col, row);
                let dst = Rect::new(origin.x, origin.y, window.tile_px, window.tile_px);
                if !self.grid.in_bounds(col, row) {
                    surface.fill_rect(dst, Color::BLACK);
                    continue;
                }
                let key = &self.config.assets.tile_images[self.grid.tile_at(col, row).index()];
                if let Some(image) = self.images.get(key) {
                    surface.draw_image(image, src, dst);
                }
            }
        }
    }

    fn draw_backdrop<S: DrawSurface<Image = I>>(&self, surface: &mut S) {
        let (width, height) = surface.size();
        surface.fill_rect(Rect::new(0.0, 0.0, width as f32, height as f32), Color::BLACK);
        let Some(image) = self.images.get(&self.config.assets.background) else {
            return;
        };
        let world_px = Vec2::new(
            self.grid.width() as f32 * self.config.tile_size,
            self.grid.height() as f32 * self.config.tile_size,
        );
        let origin = self.camera.world_to_screen(Vec2::ZERO);
        let zoom = self.camera.zoom();
        surface.draw_image(
            image,
            Rect::new(0.0, 0.0, world_px.x, world_px.y),
            Rect::new(origin.x, origin.y, world_px.x * zoom, world_px.y * zoom),
        );
    }

    /// Remote entities in id order, then the local player on top.
    fn draw_entities<S: DrawSurface<Image = I>>(&self, surface: &mut S, now_ms: f64) -> usize {
        self.store
            .remotes()
            .chain(iter::once(self.store.local()))
            .filter(|entity| self.draw_entity(surface, entity, now_ms))
            .count()
    }

    fn draw_entity<S: DrawSurface<Image = I>>(&self, surface: &mut S, entity: &Entity, now_ms: f64) -> bool {
        let Some(image) = self.images.get(&entity.sprite) else {
            return false;
        };
        let screen = self.camera.world_to_screen(entity.position);
        let src = self.sheet.cell(entity.frame_index(), entity.direction.row());
        let dst = self.sheet.centered_at(screen, self.camera.zoom());
        surface.draw_image(image, src, dst);

        surface.fill_text(
            &entity.name,
            screen.x,
            dst.y - NAME_LIFT_PX,
            &TextStyle::label(Color::WHITE),
        );
        let bubble = entity
            .id
            .as_deref()
            .and_then(|id| self.store.chat_for(id, now_ms));
        if let Some(bubble) = bubble {
            surface.fill_text(
                &bubble.text,
                screen.x,
                dst.y - CHAT_LIFT_PX,
                &TextStyle::label(Color::YELLOW),
            );
        }
        true
    }
}
