//! Chat bubbles with timer-driven expiry.
//!
//! Posting a bubble schedules a timer. [`ChatBoard::fire_due`] runs at the
//! start of every tick and deletes the bubbles whose timers have come due.
//! Each timer carries the generation of the bubble it was scheduled for, so
//! the timer of an overwritten message cannot delete its replacement early.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

#[derive(Debug, Clone, PartialEq)]
pub struct ChatBubble {
    pub owner_id: String,
    pub text: String,
    pub expires_at_ms: f64,
}

#[derive(Debug)]
struct ExpiryTimer {
    due_ms: f64,
    owner_id: String,
    generation: u64,
}

impl PartialEq for ExpiryTimer {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ExpiryTimer {}

impl PartialOrd for ExpiryTimer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ExpiryTimer {
    // Reversed so the max-heap pops the earliest deadline first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due_ms
            .total_cmp(&self.due_ms)
            .then_with(|| other.generation.cmp(&self.generation))
    }
}

pub struct ChatBoard {
    ttl_ms: f64,
    bubbles: HashMap<String, (ChatBubble, u64)>,
    timers: BinaryHeap<ExpiryTimer>,
    next_generation: u64,
}

impl ChatBoard {
    pub fn new(ttl_ms: u64) -> Self {
        Self {
            ttl_ms: ttl_ms as f64,
            bubbles: HashMap::new(),
            timers: BinaryHeap::new(),
            next_generation: 0,
        }
    }

    /// Create or overwrite the bubble for `owner_id`.
    pub fn post(&mut self, owner_id: &str, text: &str, now_ms: f64) {
        let generation = self.next_generation;
        self.next_generation += 1;
        let expires_at_ms = now_ms + self.ttl_ms;
        self.bubbles.insert(
            owner_id.to_string(),
            (
                ChatBubble {
                    owner_id: owner_id.to_string(),
                    text: text.to_string(),
                    expires_at_ms,
                },
                generation,
            ),
        );
        self.timers.push(ExpiryTimer {
            due_ms: expires_at_ms,
            owner_id: owner_id.to_string(),
            generation,
        });
    }

    /// Fire every timer due at or before `now_ms`. Returns how many bubbles
    /// were deleted.
    pub fn fire_due(&mut self, now_ms: f64) -> usize {
        let mut removed = 0;
        while self.timers.peek().is_some_and(|t| t.due_ms <= now_ms) {
            let Some(timer) = self.timers.pop() else {
                break;
            };
            let current = self
                .bubbles
                .get(&timer.owner_id)
                .is_some_and(|(_, generation)| *generation == timer.generation);
            if current {
                self.bubbles.remove(&timer.owner_id);
                removed += 1;
            }
        }
        removed
    }

    /// Active bubble for `owner_id` at `now_ms`. A bubble is visible strictly
    /// before its expiry time.
    pub fn active(&self, owner_id: &str, now_ms: f64) -> Option<&ChatBubble> {
        self.bubbles
            .get(owner_id)
            .map(|(bubble, _)| bubble)
            .filter(|bubble| now_ms < bubble.expires_at_ms)
    }

    pub fn len(&self) -> usize {
        self.bubbles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bubbles.is_empty()
    }
}
