pub mod protocol;
pub mod transport;

pub use protocol::{
    decode_inbound, event, ChatBroadcast, ChatSubmit, EntitySnapshot, InboundEvent,
    OutboundEvent, PlayerMoved, PlayerMovement,
};
pub use transport::{Handler, LoopbackTransport, Transport};
