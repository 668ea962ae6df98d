//! Image bookkeeping for the loading gate.
//!
//! The host starts every load and reports back through `mark_loaded` or
//! `mark_failed`. A failed image still counts as settled: the client starts
//! anyway and skips whatever that image would have drawn.

use std::collections::HashMap;

use tw_render::ImageResource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Pending,
    Loaded,
    Failed,
}

struct Slot<I> {
    image: I,
    state: LoadState,
    required: bool,
}

pub struct ImageSet<I: ImageResource> {
    slots: HashMap<String, Slot<I>>,
}

impl<I: ImageResource> Default for ImageSet<I> {
    fn default() -> Self {
        Self {
            slots: HashMap::new(),
        }
    }
}

impl<I: ImageResource> ImageSet<I> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `image` under `key`. An image that reports ready on
    /// insertion is considered loaded straight away.
    pub fn insert(&mut self, key: &str, image: I, required: bool) {
        let state = if image.is_ready() {
            LoadState::Loaded
        } else {
            LoadState::Pending
        };
        self.slots.insert(
            key.to_string(),
            Slot {
                image,
                state,
                required,
            },
        );
    }

    pub fn mark_loaded(&mut self, key: &str) -> bool {
        self.set_state(key, LoadState::Loaded)
    }

    pub fn mark_failed(&mut self, key: &str) -> bool {
        log::error!("Failed to load image '{key}'");
        self.set_state(key, LoadState::Failed)
    }

    fn set_state(&mut self, key: &str, state: LoadState) -> bool {
        match self.slots.get_mut(key) {
            Some(slot) => {
                slot.state = state;
                true
            }
            None => {
                log::warn!("Load notification for unregistered image '{key}'");
                false
            }
        }
    }

    pub fn state(&self, key: &str) -> Option<LoadState> {
        self.slots.get(key).map(|slot| slot.state)
    }

    /// The image, but only once it can actually be drawn.
    pub fn get(&self, key: &str) -> Option<&I> {
        self.slots
            .get(key)
            .filter(|slot| slot.state == LoadState::Loaded && slot.image.is_ready())
            .map(|slot| &slot.image)
    }

    pub fn all_settled(&self) -> bool {
        self.pending().is_empty()
    }

    /// Required images still waiting on the host, sorted by key.
    pub fn pending(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .slots
            .iter()
            .filter(|(_, slot)| slot.required && slot.state == LoadState::Pending)
            .map(|(key, _)| key.as_str())
            .collect();
        keys.sort_unstable();
        keys
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
