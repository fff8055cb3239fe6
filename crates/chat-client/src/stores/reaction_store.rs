//! Reaction store
//!
//! Reactions are keyed by emoji (id for custom emoji, text for Unicode) and
//! scoped to one message. Gateway events can only tell the client that a
//! reaction exists, not how many users share it, so such entries are partial
//! until [`ReactionStore::fetch_reaction`] reconciles them with the message
//! returned by the remote API.

use std::fmt;
use std::sync::Arc;

use chat_cache::{AddOptions, Entity, EntityCache, Patch, Resolvable};
use chat_common::ClientResult;
use chat_core::{DomainError, DomainResult, ReactionPayload};
use tracing::{debug, info, instrument};

use crate::rest::RestApi;
use crate::structures::{Message, MessageHandle, MessageReaction, ReactionEmoji};

/// Reactions of a single message
pub struct ReactionStore {
    cache: EntityCache<MessageReaction, MessageHandle>,
    message: MessageHandle,
    rest: Arc<dyn RestApi>,
}

impl ReactionStore {
    pub(crate) fn new(message: MessageHandle, rest: Arc<dyn RestApi>) -> Self {
        Self {
            cache: EntityCache::new("reactions", MessageReaction::new),
            message,
            rest,
        }
    }

    /// Handle of the owning message
    pub fn message(&self) -> &MessageHandle {
        &self.message
    }

    /// The underlying cache, keyed by emoji identifier
    pub fn cache(&self) -> &EntityCache<MessageReaction, MessageHandle> {
        &self.cache
    }

    /// Insert or patch a reaction
    ///
    /// The entry is stored under the emoji id, or the emoji name when the
    /// emoji has no id.
    pub fn add(&self, data: ReactionPayload, cache: bool) -> DomainResult<Arc<MessageReaction>> {
        let key = data
            .emoji
            .identifier()
            .ok_or(DomainError::EmojiWithoutIdentifier)?;
        let options = AddOptions::new(self.message.clone()).key(key);
        Ok(self.cache.add_with(data, cache, options))
    }

    /// Cached reaction for an emoji
    pub fn get(&self, emoji: &ReactionEmoji) -> Option<Arc<MessageReaction>> {
        self.cache.get(&emoji.identifier())
    }

    /// Record a gateway write to the reaction for `emoji`
    ///
    /// A reconciliation already in flight then keeps the entry instead of
    /// evicting it, whether or not its count is known.
    pub fn touch(&self, emoji: &ReactionEmoji) -> bool {
        self.cache.touch(&emoji.identifier())
    }

    pub fn resolve(
        &self,
        reaction: impl Into<Resolvable<MessageReaction>>,
    ) -> Option<Arc<MessageReaction>> {
        self.cache.resolve(reaction)
    }

    pub fn resolve_id(&self, reaction: impl Into<Resolvable<MessageReaction>>) -> String {
        self.cache.resolve_id(reaction)
    }

    /// Remove every reaction from the message remotely
    ///
    /// The local cache is left alone; the gateway's remove-all event clears
    /// it.
    #[instrument(skip(self), fields(message_id = %self.message.id()))]
    pub async fn remove_all(&self) -> ClientResult<Arc<Message>> {
        self.rest
            .delete_all_reactions(self.message.channel_id(), self.message.id())
            .await?;

        info!(
            channel_id = %self.message.channel_id(),
            message_id = %self.message.id(),
            "Removed all reactions"
        );

        Ok(self.owner()?)
    }

    /// Remove every reaction of one emoji from the message remotely
    #[instrument(skip(self), fields(message_id = %self.message.id()))]
    pub async fn remove_emoji(&self, emoji: &ReactionEmoji) -> ClientResult<Arc<Message>> {
        self.rest
            .delete_emoji_reactions(self.message.channel_id(), self.message.id(), emoji)
            .await?;

        info!(
            message_id = %self.message.id(),
            emoji = %emoji.identifier(),
            "Removed emoji reactions"
        );

        Ok(self.owner()?)
    }

    /// Whether the reaction for `emoji` is missing or partial
    pub fn is_partial(&self, emoji: &ReactionEmoji) -> bool {
        self.cache
            .get(&emoji.identifier())
            .is_none_or(|reaction| reaction.is_partial())
    }

    /// Reaction for `emoji`, reconciled with the remote message if needed
    ///
    /// A complete cached entry is returned without a remote call. Otherwise
    /// the message is fetched:
    /// - emoji gone: the cached entry is zeroed and evicted, unless it was
    ///   written while the fetch was in flight
    /// - emoji present: every partial reaction on the message is refreshed
    #[instrument(
        skip(self, emoji),
        fields(message_id = %self.message.id(), emoji = %emoji.identifier())
    )]
    pub async fn fetch_reaction(
        &self,
        emoji: &ReactionEmoji,
        cache: bool,
    ) -> ClientResult<Option<Arc<MessageReaction>>> {
        let key = emoji.identifier();
        let observed = self.cache.get_with_revision(&key);

        if let Some((existing, _)) = &observed {
            if !existing.is_partial() {
                return Ok(Some(Arc::clone(existing)));
            }
        }

        let data = self
            .rest
            .get_message(self.message.channel_id(), self.message.id())
            .await?;
        let reactions = data.reactions.unwrap_or_default();

        let present = reactions
            .iter()
            .any(|reaction| reaction.emoji.identifier().as_deref() == Some(key.as_str()));

        if !present {
            let Some((_, revision)) = observed else {
                return Ok(self.cache.get(&key));
            };

            let zero = ReactionPayload::new(emoji.to_payload(), 0);
            let evicted = self
                .cache
                .evict_if_unchanged(&key, revision, |reaction| reaction.patch(&zero));

            return match evicted {
                Some(reaction) => {
                    debug!("Reaction no longer on message, evicted");
                    Ok(Some(reaction))
                }
                // Re-added during the fetch; the newer write wins
                None => Ok(self.cache.get(&key)),
            };
        }

        let mut requested = None;
        for reaction in reactions {
            let Ok(sibling) = ReactionEmoji::try_from(&reaction.emoji) else {
                continue;
            };
            if !self.is_partial(&sibling) {
                continue;
            }

            let refreshed = self.add(reaction, cache)?;
            if sibling.identifier() == key {
                requested = Some(refreshed);
            }
        }

        debug!("Reconciled partial reactions");
        Ok(self.cache.get(&key).or(requested))
    }

    fn owner(&self) -> DomainResult<Arc<Message>> {
        self.message
            .upgrade()
            .ok_or(DomainError::MessageUnavailable(self.message.id()))
    }
}

impl fmt::Debug for ReactionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReactionStore")
            .field("message", &self.message)
            .field("cache", &self.cache)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{message_with_reactions, MockRest, CHANNEL_ID, MESSAGE_ID};
    use chat_core::{EmojiPayload, MessagePayload, Snowflake};

    fn emoji(payload: &EmojiPayload) -> ReactionEmoji {
        ReactionEmoji::try_from(payload).unwrap()
    }

    fn remote_message(reactions: Vec<ReactionPayload>) -> MessagePayload {
        MessagePayload::new(MESSAGE_ID, CHANNEL_ID, "hello").with_reactions(reactions)
    }

    #[test]
    fn test_composite_keys() {
        let rest = Arc::new(MockRest::new());
        let message = message_with_reactions(
            &rest,
            vec![
                ReactionPayload::new(EmojiPayload::custom(Snowflake::new(123), "pepe"), 1),
                ReactionPayload::new(EmojiPayload::unicode("😀"), 1),
            ],
        );

        let mut keys = message.reactions().cache().keys();
        keys.sort();
        assert_eq!(keys, vec!["123".to_string(), "😀".to_string()]);
    }

    #[test]
    fn test_add_without_identifier_fails() {
        let rest = Arc::new(MockRest::new());
        let message = message_with_reactions(&rest, Vec::new());
        let err = message
            .reactions()
            .add(ReactionPayload::partial(EmojiPayload::default()), true)
            .unwrap_err();
        assert!(matches!(err, DomainError::EmojiWithoutIdentifier));
    }

    #[test]
    fn test_upsert_returns_same_reaction() {
        let rest = Arc::new(MockRest::new());
        let message = message_with_reactions(&rest, Vec::new());
        let store = message.reactions();

        let first = store.add(ReactionPayload::partial(EmojiPayload::unicode("🔥")), true).unwrap();
        let second = store.add(ReactionPayload::new(EmojiPayload::unicode("🔥"), 3), true).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.count(), Some(3));
        assert_eq!(store.cache().len(), 1);
        assert_eq!(store.resolve_id(&first), "🔥");
        assert!(Arc::ptr_eq(
            &store.resolve(Resolvable::Id("🔥".to_string())).unwrap(),
            &first
        ));
    }

    #[test]
    fn test_partiality_gate() {
        let rest = Arc::new(MockRest::new());
        let message = message_with_reactions(
            &rest,
            vec![ReactionPayload::new(EmojiPayload::unicode("✅"), 2)],
        );
        let store = message.reactions();
        store.add(ReactionPayload::partial(EmojiPayload::unicode("❓")), true).unwrap();

        assert!(!store.is_partial(&emoji(&EmojiPayload::unicode("✅"))));
        assert!(store.is_partial(&emoji(&EmojiPayload::unicode("❓"))));
        assert!(store.is_partial(&emoji(&EmojiPayload::unicode("❌"))));
    }

    #[tokio::test]
    async fn test_fetch_fast_path() {
        let rest = Arc::new(MockRest::new());
        let message = message_with_reactions(
            &rest,
            vec![ReactionPayload::new(EmojiPayload::unicode("✅"), 2)],
        );

        let reaction = message
            .reactions()
            .fetch_reaction(&emoji(&EmojiPayload::unicode("✅")), true)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(reaction.count(), Some(2));
        assert_eq!(rest.get_message_calls(), 0);
    }

    #[tokio::test]
    async fn test_fetch_evicts_absent_reaction() {
        let rest = Arc::new(MockRest::new());
        rest.set_message(remote_message(vec![ReactionPayload::new(
            EmojiPayload::unicode("✅"),
            1,
        )]));
        let message = message_with_reactions(&rest, Vec::new());
        let held = message
            .reactions()
            .add(ReactionPayload::partial(EmojiPayload::unicode("❓")), true)
            .unwrap();

        let result = message
            .reactions()
            .fetch_reaction(held.emoji(), true)
            .await
            .unwrap()
            .unwrap();

        assert!(Arc::ptr_eq(&result, &held));
        assert_eq!(held.count(), Some(0));
        assert!(!message.reactions().cache().contains(&"❓".to_string()));
        assert_eq!(rest.get_message_calls(), 1);
    }

    #[tokio::test]
    async fn test_fetch_absent_and_uncached() {
        let rest = Arc::new(MockRest::new());
        rest.set_message(remote_message(Vec::new()));
        let message = message_with_reactions(&rest, Vec::new());

        let result = message
            .reactions()
            .fetch_reaction(&emoji(&EmojiPayload::unicode("❓")), true)
            .await
            .unwrap();

        assert!(result.is_none());
        assert!(message.reactions().cache().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_refreshes_partial_siblings() {
        let rest = Arc::new(MockRest::new());
        rest.set_message(remote_message(vec![
            ReactionPayload::new(EmojiPayload::unicode("🔥"), 5),
            ReactionPayload::new(EmojiPayload::unicode("👀"), 2),
            ReactionPayload::new(EmojiPayload::unicode("✅"), 9),
        ]));
        let message = message_with_reactions(
            &rest,
            vec![ReactionPayload::new(EmojiPayload::unicode("✅"), 1)],
        );
        let store = message.reactions();
        let fire = store.add(ReactionPayload::partial(EmojiPayload::unicode("🔥")), true).unwrap();
        let eyes = store.add(ReactionPayload::partial(EmojiPayload::unicode("👀")), true).unwrap();

        let result = store.fetch_reaction(fire.emoji(), true).await.unwrap().unwrap();

        assert!(Arc::ptr_eq(&result, &fire));
        assert_eq!(fire.count(), Some(5));
        assert_eq!(eyes.count(), Some(2));
        // Complete entries are not touched
        assert_eq!(store.get(&emoji(&EmojiPayload::unicode("✅"))).unwrap().count(), Some(1));
    }

    #[tokio::test]
    async fn test_fetch_without_caching() {
        let rest = Arc::new(MockRest::new());
        rest.set_message(remote_message(vec![ReactionPayload::new(
            EmojiPayload::unicode("🔥"),
            5,
        )]));
        let message = message_with_reactions(&rest, Vec::new());

        let result = message
            .reactions()
            .fetch_reaction(&emoji(&EmojiPayload::unicode("🔥")), false)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(result.count(), Some(5));
        assert!(message.reactions().cache().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_failure_propagates() {
        let rest = Arc::new(MockRest::new());
        rest.fail_with_status(503, "Service Unavailable");
        let message = message_with_reactions(&rest, Vec::new());
        let held = message
            .reactions()
            .add(ReactionPayload::partial(EmojiPayload::unicode("❓")), true)
            .unwrap();

        let err = message
            .reactions()
            .fetch_reaction(held.emoji(), true)
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), Some(503));
        assert!(held.is_partial());
        assert!(message.reactions().cache().contains(&"❓".to_string()));
    }

    #[tokio::test]
    async fn test_readd_during_fetch_survives() {
        let rest = Arc::new(MockRest::new());
        rest.set_message(remote_message(Vec::new()));
        let gate = rest.hold_fetches();
        let message = message_with_reactions(&rest, Vec::new());
        let store = message.reactions();
        let held = store.add(ReactionPayload::partial(EmojiPayload::unicode("❓")), true).unwrap();

        let (result, ()) = tokio::join!(store.fetch_reaction(held.emoji(), true), async {
            gate.entered().await;
            store
                .add(ReactionPayload::new(EmojiPayload::unicode("❓"), 4), true)
                .unwrap();
            gate.release();
        });

        let result = result.unwrap().unwrap();
        assert!(Arc::ptr_eq(&result, &held));
        assert_eq!(held.count(), Some(4));
        assert!(store.cache().contains(&"❓".to_string()));
    }

    #[tokio::test]
    async fn test_remove_all_keeps_cache() {
        let rest = Arc::new(MockRest::new());
        let message = message_with_reactions(
            &rest,
            vec![ReactionPayload::new(EmojiPayload::unicode("✅"), 2)],
        );

        let returned = message.reactions().remove_all().await.unwrap();

        assert!(Arc::ptr_eq(&returned, &message));
        assert_eq!(rest.delete_all_calls(), 1);
        assert_eq!(message.reactions().cache().len(), 1);
    }

    #[tokio::test]
    async fn test_remove_all_failure_propagates() {
        let rest = Arc::new(MockRest::new());
        rest.fail_with_status(403, "Missing Permissions");
        let message = message_with_reactions(&rest, Vec::new());

        let err = message.reactions().remove_all().await.unwrap_err();
        assert_eq!(err.error_code(), "MISSING_ACCESS");
    }

    #[tokio::test]
    async fn test_reaction_remove_uses_emoji_route() {
        let rest = Arc::new(MockRest::new());
        let message = message_with_reactions(
            &rest,
            vec![ReactionPayload::new(
                EmojiPayload::custom(Snowflake::new(123), "pepe"),
                2,
            )],
        );
        let reaction = message.reactions().cache().get(&"123".to_string()).unwrap();

        let returned = reaction.remove().await.unwrap();

        assert!(Arc::ptr_eq(&returned, &message));
        assert_eq!(rest.deleted_emojis(), vec!["pepe:123".to_string()]);
    }
}
