//! Inbound frame validation.

use findit_core::error::AppError;

use super::types::InboundEvent;

pub(crate) const JOIN_FAILED: &str = "Cannot join room";
pub(crate) const SEND_FAILED: &str = "Failed to send message";

/// Check size and parse a raw text frame.
pub fn parse_inbound(raw: &str, max_size: usize) -> Result<InboundEvent, AppError> {
    if raw.len() > max_size {
        return Err(AppError::validation(format!(
            "Message exceeds maximum size of {max_size} bytes"
        )));
    }
    if raw.trim().is_empty() {
        return Err(AppError::validation("Empty message"));
    }
    serde_json::from_str(raw).map_err(|e| {
        tracing::debug!(error = %e, "Unparseable frame");
        AppError::validation(rejection_for(raw))
    })
}

/// A known event with a bad payload gets that event's failure text.
fn rejection_for(raw: &str) -> &'static str {
    let event = serde_json::from_str::<serde_json::Value>(raw)
        .ok()
        .and_then(|v| v.get("event").and_then(|e| e.as_str()).map(str::to_owned));
    match event.as_deref() {
        Some("joinRoom") => JOIN_FAILED,
        Some("sendMessage") => SEND_FAILED,
        _ => "Invalid message",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limits() {
        assert!(parse_inbound("", 100).is_err());
        assert_eq!(parse_inbound("{}", 100).unwrap_err().message, "Invalid message");
        let frame = format!(r#"{{"event":"leaveRoom","data":"{}"}}"#, uuid::Uuid::new_v4());
        assert!(parse_inbound(&frame, 1024).is_ok());
        assert!(parse_inbound(&frame, 10).is_err());
    }

    #[test]
    fn test_bad_room_id_uses_event_failure_text() {
        let join = r#"{"event":"joinRoom","data":"room-42"}"#;
        assert_eq!(parse_inbound(join, 1024).unwrap_err().message, JOIN_FAILED);

        let send = r#"{"event":"sendMessage","data":{"roomId":"nope","content":"hi"}}"#;
        assert_eq!(parse_inbound(send, 1024).unwrap_err().message, SEND_FAILED);

        let unknown = r#"{"event":"shout","data":"x"}"#;
        assert_eq!(parse_inbound(unknown, 1024).unwrap_err().message, "Invalid message");
    }
}
