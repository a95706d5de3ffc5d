//! Messages exchanged between peers.
//!
//! Both kinds carry the sender's identity tag so receivers can drop their own
//! echoes and anything from peers they have not selected. On the wire an
//! [`Envelope`] is a JSON object tagged with `"kind"`.

use crate::SyncError;
use chrono::{DateTime, Utc};
use derive_new::new;
use peer_tictactoe::Marker;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Broadcast topic an envelope travels on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
pub enum Topic {
    /// Move commands.
    #[strum(serialize = "tic_tac_toe/command")]
    Command,
    /// Pointer positions.
    #[strum(serialize = "tic_tac_toe/cursor_pos")]
    CursorPos,
}

/// A marker placed by the sender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct MoveEnvelope {
    /// Sender identity tag.
    pub origin: String,
    /// Board row.
    pub row: usize,
    /// Board column.
    pub col: usize,
    /// Marker the sender placed (the mover's own marker).
    pub marker: Marker,
    /// When the move was sent.
    pub timestamp: DateTime<Utc>,
}

impl MoveEnvelope {
    /// Creates a move stamped with the current time.
    pub fn now(origin: impl Into<String>, row: usize, col: usize, marker: Marker) -> Self {
        Self::new(origin.into(), row, col, marker, Utc::now())
    }
}

/// The sender's pointer, as fractions of board width and height.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, new)]
pub struct CursorEnvelope {
    /// Sender identity tag.
    pub origin: String,
    /// Horizontal position in [0, 1].
    pub x: f64,
    /// Vertical position in [0, 1].
    pub y: f64,
    /// When the position was sampled.
    pub timestamp: DateTime<Utc>,
}

impl CursorEnvelope {
    /// Creates a cursor sample stamped with the current time.
    pub fn now(origin: impl Into<String>, x: f64, y: f64) -> Self {
        Self::new(origin.into(), x, y, Utc::now())
    }
}

/// Any message on the bus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_more::From)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Envelope {
    /// A move.
    Move(MoveEnvelope),
    /// A cursor sample.
    Cursor(CursorEnvelope),
}

impl Envelope {
    /// Topic this envelope belongs on.
    pub fn topic(&self) -> Topic {
        match self {
            Envelope::Move(_) => Topic::Command,
            Envelope::Cursor(_) => Topic::CursorPos,
        }
    }

    /// Sender identity tag.
    pub fn origin(&self) -> &str {
        match self {
            Envelope::Move(m) => &m.origin,
            Envelope::Cursor(c) => &c.origin,
        }
    }

    /// Encodes the envelope as JSON text.
    #[instrument(skip(self), fields(topic = %self.topic()))]
    pub fn encode(&self) -> Result<String, SyncError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decodes JSON text into an envelope.
    #[instrument(skip(text))]
    pub fn decode(text: &str) -> Result<Self, SyncError> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_names() {
        assert_eq!(Topic::Command.to_string(), "tic_tac_toe/command");
        let name: &'static str = Topic::CursorPos.into();
        assert_eq!(name, "tic_tac_toe/cursor_pos");
    }

    #[test]
    fn test_move_wire_shape() {
        let env = Envelope::from(MoveEnvelope::now("A", 0, 2, Marker::O));
        let json: serde_json::Value = serde_json::from_str(&env.encode().unwrap()).unwrap();
        assert_eq!(json["kind"], "move");
        assert_eq!(json["origin"], "A");
        assert_eq!(json["row"], 0);
        assert_eq!(json["col"], 2);
        assert_eq!(json["marker"], "O");
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn test_decode_cursor() {
        let text = r#"{"kind":"cursor","origin":"B","x":0.25,"y":1.0,"timestamp":"2023-05-01T12:00:00Z"}"#;
        match Envelope::decode(text).unwrap() {
            Envelope::Cursor(c) => {
                assert_eq!(c.origin, "B");
                assert_eq!(c.x, 0.25);
                assert_eq!(c.y, 1.0);
            }
            other => panic!("unexpected envelope {other:?}"),
        }
    }

    #[test]
    fn test_decode_rejects_negative_coordinates() {
        let text = r#"{"kind":"move","origin":"B","row":-1,"col":0,"marker":"X","timestamp":"2023-05-01T12:00:00Z"}"#;
        let err = Envelope::decode(text).unwrap_err();
        assert!(err.message.contains("codec"));
    }

    #[test]
    fn test_decode_rejects_unknown_marker() {
        let text = r#"{"kind":"move","origin":"B","row":0,"col":0,"marker":"Z","timestamp":"2023-05-01T12:00:00Z"}"#;
        assert!(Envelope::decode(text).is_err());
    }
}
