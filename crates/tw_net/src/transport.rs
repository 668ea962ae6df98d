//! Bidirectional event channel the client talks through.
//!
//! The real transport (socket library, reconnects, backoff) lives outside
//! this workspace. [`LoopbackTransport`] is an in-memory stand-in whose
//! clones share one connection. A test or the demo binary holds one clone as
//! "the server", injecting events and inspecting what the client emitted.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde_json::Value;

pub type Handler = Box<dyn FnMut(Value)>;

pub trait Transport {
    fn emit(&mut self, event: &str, payload: Value);
    fn on(&mut self, event: &str, handler: Handler);
    /// Opaque id the server knows this connection by, once connected.
    fn connection_id(&self) -> Option<String>;
}

#[derive(Default)]
struct LoopbackState {
    connection_id: Option<String>,
    handlers: HashMap<String, Vec<Handler>>,
    sent: Vec<(String, Value)>,
}

#[derive(Clone, Default)]
pub struct LoopbackTransport {
    state: Rc<RefCell<LoopbackState>>,
}

impl LoopbackTransport {
    pub fn new(connection_id: Option<&str>) -> Self {
        let transport = Self::default();
        transport.set_connection_id(connection_id);
        transport
    }

    pub fn set_connection_id(&self, connection_id: Option<&str>) {
        self.state.borrow_mut().connection_id = connection_id.map(str::to_string);
    }

    /// Invoke every handler registered for `event`. Returns how many ran.
    pub fn deliver(&self, event: &str, payload: Value) -> usize {
        // Handlers are taken out while they run so a handler may register
        // further handlers without a double borrow.
        let mut running = self
            .state
            .borrow_mut()
            .handlers
            .remove(event)
            .unwrap_or_default();
        for handler in running.iter_mut() {
            handler(payload.clone());
        }
        let count = running.len();
        let mut state = self.state.borrow_mut();
        let added = state.handlers.remove(event).unwrap_or_default();
        running.extend(added);
        if !running.is_empty() {
            state.handlers.insert(event.to_string(), running);
        }
        count
    }

    pub fn sent(&self) -> Vec<(String, Value)> {
        self.state.borrow().sent.clone()
    }

    pub fn take_sent(&self) -> Vec<(String, Value)> {
        std::mem::take(&mut self.state.borrow_mut().sent)
    }

    pub fn sent_count(&self, event: &str) -> usize {
        self.state
            .borrow()
            .sent
            .iter()
            .filter(|(name, _)| name == event)
            .count()
    }
}

impl Transport for LoopbackTransport {
    fn emit(&mut self, event: &str, payload: Value) {
        log::trace!("emit {event}: {payload}");
        self.state
            .borrow_mut()
            .sent
            .push((event.to_string(), payload));
    }

    fn on(&mut self, event: &str, handler: Handler) {
        self.state
            .borrow_mut()
            .handlers
            .entry(event.to_string())
            .or_default()
            .push(handler);
    }

    fn connection_id(&self) -> Option<String> {
        self.state.borrow().connection_id.clone()
    }
}
