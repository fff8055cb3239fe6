//! Reaction and emoji payloads

use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Emoji reference inside reaction payloads
///
/// Custom emoji always carry an id; Unicode emoji only have a name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct EmojiPayload {
    #[serde(default)]
    pub id: Option<Snowflake>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub animated: bool,
}

impl EmojiPayload {
    /// Unicode emoji (no id)
    #[must_use]
    pub fn unicode(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
            animated: false,
        }
    }

    /// Custom emoji
    #[must_use]
    pub fn custom(id: Snowflake, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: Some(name.into()),
            animated: false,
        }
    }

    /// Cache key for the emoji: the id when present, otherwise the name
    pub fn identifier(&self) -> Option<String> {
        self.id
            .map(|id| id.to_string())
            .or_else(|| self.name.clone())
    }
}

/// Reaction entry as found in a message's `reactions` list
///
/// Gateway events carry no `count`; such reactions are partial until reconciled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionPayload {
    pub emoji: EmojiPayload,
    #[serde(default)]
    pub count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub me: Option<bool>,
}

impl ReactionPayload {
    #[must_use]
    pub fn new(emoji: EmojiPayload, count: u32) -> Self {
        Self {
            emoji,
            count: Some(count),
            me: None,
        }
    }

    /// A reaction known only by its emoji
    #[must_use]
    pub fn partial(emoji: EmojiPayload) -> Self {
        Self {
            emoji,
            count: None,
            me: None,
        }
    }

    #[must_use]
    pub fn with_me(mut self, me: bool) -> Self {
        self.me = Some(me);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_prefers_id() {
        let emoji = EmojiPayload::custom(Snowflake::new(123), "pepe");
        assert_eq!(emoji.identifier().as_deref(), Some("123"));
    }

    #[test]
    fn test_identifier_falls_back_to_name() {
        let emoji = EmojiPayload::unicode("😀");
        assert_eq!(emoji.identifier().as_deref(), Some("😀"));
    }

    #[test]
    fn test_identifier_missing() {
        assert!(EmojiPayload::default().identifier().is_none());
    }

    #[test]
    fn test_deserialize_null_id() {
        let emoji: EmojiPayload = serde_json::from_str(r#"{"id":null,"name":"😀"}"#).unwrap();
        assert_eq!(emoji, EmojiPayload::unicode("😀"));
    }
}
