//! Channel kinds as reported by the remote API

use serde::{Deserialize, Serialize};

/// Channel type enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "i16", into = "i16")]
pub enum ChannelType {
    /// Guild text channel
    #[default]
    GuildText,
    /// Direct message between users
    Dm,
    /// Guild voice channel (no message history)
    GuildVoice,
    /// Direct message between several users
    GroupDm,
    /// Guild category for organizing channels
    GuildCategory,
    /// Guild announcement channel
    GuildNews,
    /// Kind the client does not model (stage, forum, threads, ...)
    Unknown(i16),
}

impl ChannelType {
    /// Get the numeric value
    #[inline]
    #[must_use]
    pub fn as_i16(self) -> i16 {
        match self {
            Self::GuildText => 0,
            Self::Dm => 1,
            Self::GuildVoice => 2,
            Self::GroupDm => 3,
            Self::GuildCategory => 4,
            Self::GuildNews => 5,
            Self::Unknown(value) => value,
        }
    }

    /// Voice channels carry no messages, so no message or reaction events apply
    #[inline]
    #[must_use]
    pub fn is_voice(self) -> bool {
        matches!(self, Self::GuildVoice)
    }

    /// Check if channels of this type hold messages
    #[inline]
    #[must_use]
    pub fn is_text_based(self) -> bool {
        matches!(
            self,
            Self::GuildText | Self::Dm | Self::GroupDm | Self::GuildNews
        )
    }
}

impl From<i16> for ChannelType {
    fn from(value: i16) -> Self {
        match value {
            0 => Self::GuildText,
            1 => Self::Dm,
            2 => Self::GuildVoice,
            3 => Self::GroupDm,
            4 => Self::GuildCategory,
            5 => Self::GuildNews,
            other => Self::Unknown(other),
        }
    }
}

impl From<ChannelType> for i16 {
    fn from(ct: ChannelType) -> Self {
        ct.as_i16()
    }
}
