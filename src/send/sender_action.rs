//! Typing indicators and read receipts sent instead of a message body.

use crate::error::Error;
use serde::Serialize;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SenderAction {
    MarkSeen,
    TypingOn,
    TypingOff,
}

impl SenderAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MarkSeen => "mark_seen",
            Self::TypingOn => "typing_on",
            Self::TypingOff => "typing_off",
        }
    }
}

impl FromStr for SenderAction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "mark_seen" => Ok(Self::MarkSeen),
            "typing_on" => Ok(Self::TypingOn),
            "typing_off" => Ok(Self::TypingOff),
            _ => Err(Error::InvalidValue {
                field: "sender_action",
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_to_the_wire_string() {
        assert_eq!(serde_json::to_value(SenderAction::TypingOn).unwrap(), json!("typing_on"));
        assert_eq!(SenderAction::MarkSeen.as_str(), "mark_seen");
    }

    #[test]
    fn parse_rejects_unknown_actions() {
        assert_eq!("typing_off".parse::<SenderAction>().unwrap(), SenderAction::TypingOff);
        let err = "wave".parse::<SenderAction>().unwrap_err();
        assert_eq!(err.to_string(), "invalid sender_action provided: wave");
    }
}
