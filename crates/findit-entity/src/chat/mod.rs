//! Chat room and message entities.

pub mod message;
pub mod room;

pub use message::{Message, MessageWithSender};
pub use room::{ChatRoom, OpportunityRef, RoomPair, RoomView, UserRoom};
