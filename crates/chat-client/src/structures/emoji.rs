//! Emoji attached to a reaction

use std::fmt;

use chat_core::{DomainError, EmojiPayload, Snowflake};

/// Emoji of a [`MessageReaction`](super::MessageReaction)
///
/// Custom emoji are identified by id, Unicode emoji by their text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReactionEmoji {
    id: Option<Snowflake>,
    name: Option<String>,
    animated: bool,
}

impl ReactionEmoji {
    /// Build from a payload already known to carry an id or a name
    pub(crate) fn from_payload(payload: &EmojiPayload) -> Self {
        Self {
            id: payload.id,
            name: payload.name.clone(),
            animated: payload.animated,
        }
    }

    pub fn id(&self) -> Option<Snowflake> {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn animated(&self) -> bool {
        self.animated
    }

    /// Whether this is a custom (uploaded) emoji
    pub fn is_custom(&self) -> bool {
        self.id.is_some()
    }

    /// Key of the reaction in its store: the id, or the name for Unicode emoji
    pub fn identifier(&self) -> String {
        match self.id {
            Some(id) => id.to_string(),
            None => self.name.clone().unwrap_or_default(),
        }
    }

    /// Path segment used by the reaction routes (`name:id` or the name)
    pub fn url_identifier(&self) -> String {
        let name = self.name.as_deref().unwrap_or("_");
        match self.id {
            Some(id) => format!("{name}:{id}"),
            None => name.to_string(),
        }
    }

    /// Payload form, as sent back to the reaction store
    pub fn to_payload(&self) -> EmojiPayload {
        EmojiPayload {
            id: self.id,
            name: self.name.clone(),
            animated: self.animated,
        }
    }
}

impl TryFrom<&EmojiPayload> for ReactionEmoji {
    type Error = DomainError;

    fn try_from(payload: &EmojiPayload) -> Result<Self, Self::Error> {
        if payload.id.is_none() && payload.name.is_none() {
            return Err(DomainError::EmojiWithoutIdentifier);
        }
        Ok(Self::from_payload(payload))
    }
}

impl fmt::Display for ReactionEmoji {
    // `<:name:id>` for custom emoji, the text otherwise
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => {
                let prefix = if self.animated { "a" } else { "" };
                write!(f, "<{prefix}:{}:{id}>", self.name.as_deref().unwrap_or("_"))
            }
            None => f.write_str(self.name.as_deref().unwrap_or_default()),
        }
    }
}
