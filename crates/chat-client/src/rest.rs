//! Remote API port
//!
//! The client only consumes the handful of REST routes the stores need.
//! Transport, authentication and rate limiting live behind this trait.

use async_trait::async_trait;

use chat_common::ClientResult;
use chat_core::{MessagePayload, Snowflake};

use crate::structures::ReactionEmoji;

#[async_trait]
pub trait RestApi: Send + Sync {
    /// `GET /channels/{channel_id}/messages/{message_id}`
    async fn get_message(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
    ) -> ClientResult<MessagePayload>;

    /// `DELETE /channels/{channel_id}/messages/{message_id}/reactions`
    async fn delete_all_reactions(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
    ) -> ClientResult<()>;

    /// `DELETE /channels/{channel_id}/messages/{message_id}/reactions/{emoji}`
    async fn delete_emoji_reactions(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
        emoji: &ReactionEmoji,
    ) -> ClientResult<()>;
}
