//! Wire format for socket events.

pub mod types;
pub mod validator;

pub use types::{InboundEvent, OutboundEvent};
