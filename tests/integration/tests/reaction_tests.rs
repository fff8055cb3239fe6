//! Reaction Integration Tests
//!
//! Drive a client through raw gateway dispatches and reconcile partial
//! reactions against a scripted remote API.
//!
//! Run with: cargo test -p integration-tests --test reaction_tests

use std::sync::Arc;

use chat_client::{ClientEvent, DispatchOutcome};
use chat_core::{EmojiPayload, Partials, ReactionPayload, Snowflake};
use integration_tests::{fixtures::*, TestClient, SELF_USER};

// ============================================================================
// Setup
// ============================================================================

fn cached_message(tc: &TestClient, reactions: &[ReactionPayload]) -> anyhow::Result<MessageRef> {
    let msg = MessageRef::unique();
    tc.dispatch("CHANNEL_CREATE", channel_create(msg.channel_id, 0))?;
    tc.dispatch("MESSAGE_CREATE", message_create(msg, reactions))?;
    Ok(msg)
}

// ============================================================================
// Relay Tests
// ============================================================================

#[tokio::test]
async fn test_relay_emits_for_cached_reaction() -> anyhow::Result<()> {
    let tc = TestClient::new();
    let emoji = custom_emoji("pepe");
    let msg = cached_message(&tc, &[ReactionPayload::new(emoji.clone(), 3)])?;

    let outcome = tc.dispatch("MESSAGE_REACTION_REMOVE_EMOJI", remove_emoji_event(msg, &emoji))?;

    assert_eq!(outcome, DispatchOutcome::Handled);
    assert_eq!(tc.sink.names(), vec!["messageReactionRemoveEmoji"]);
    Ok(())
}

#[tokio::test]
async fn test_relay_short_circuits() -> anyhow::Result<()> {
    let tc = TestClient::with_partials(Partials::ALL);
    let emoji = EmojiPayload::unicode("😀");

    // Voice channel
    let voice = MessageRef::unique();
    tc.dispatch("CHANNEL_CREATE", channel_create(voice.channel_id, 2))?;
    let outcome = tc.dispatch("MESSAGE_REACTION_REMOVE_EMOJI", remove_emoji_event(voice, &emoji))?;
    assert_eq!(outcome, DispatchOutcome::Ignored);

    // Uncached message
    let uncached = MessageRef::unique();
    tc.dispatch("CHANNEL_CREATE", channel_create(uncached.channel_id, 0))?;
    let outcome =
        tc.dispatch("MESSAGE_REACTION_REMOVE_EMOJI", remove_emoji_event(uncached, &emoji))?;
    assert_eq!(outcome, DispatchOutcome::Ignored);

    // Uncached reaction
    let msg = cached_message(&tc, &[])?;
    let outcome = tc.dispatch("MESSAGE_REACTION_REMOVE_EMOJI", remove_emoji_event(msg, &emoji))?;
    assert_eq!(outcome, DispatchOutcome::Ignored);

    assert!(tc.sink.is_empty());
    Ok(())
}

// ============================================================================
// Reconciliation Tests
// ============================================================================

#[tokio::test]
async fn test_partial_reaction_reconciled_by_fetch() -> anyhow::Result<()> {
    let tc = TestClient::with_partials(Partials::ALL);
    let msg = MessageRef::unique();
    let emoji = EmojiPayload::unicode("🔥");
    tc.dispatch("CHANNEL_CREATE", channel_create(msg.channel_id, 0))?;

    // Reaction on an uncached message materializes partial structures
    let outcome = tc.dispatch(
        "MESSAGE_REACTION_ADD",
        reaction_event(msg, Snowflake::new(7), &emoji),
    )?;
    assert_eq!(outcome, DispatchOutcome::Handled);

    let message = tc.message(msg)?;
    let reaction = message.reactions().cache().get(&"🔥".to_string()).unwrap();
    assert_eq!(reaction.count(), None);

    tc.rest.set_message(msg.payload(vec![
        ReactionPayload::new(emoji.clone(), 6).with_me(true),
    ]));
    let fetched = reaction.fetch().await?.unwrap();

    assert!(Arc::ptr_eq(&fetched, &reaction));
    assert_eq!(reaction.count(), Some(6));
    assert!(reaction.me());
    assert_eq!(tc.rest.get_message_calls(), 1);

    // Complete now: no further remote calls
    reaction.fetch().await?;
    assert_eq!(tc.rest.get_message_calls(), 1);
    Ok(())
}

#[tokio::test]
async fn test_stale_partial_reaction_is_evicted() -> anyhow::Result<()> {
    let tc = TestClient::with_partials(Partials::ALL);
    let msg = MessageRef::unique();
    let emoji = EmojiPayload::unicode("👻");
    tc.dispatch("CHANNEL_CREATE", channel_create(msg.channel_id, 0))?;
    tc.dispatch("MESSAGE_REACTION_ADD", reaction_event(msg, Snowflake::new(7), &emoji))?;

    let message = tc.message(msg)?;
    let reaction = message.reactions().cache().get(&"👻".to_string()).unwrap();
    tc.rest.set_message(msg.payload(Vec::new()));

    let fetched = message.reactions().fetch_reaction(reaction.emoji(), true).await?;

    assert!(Arc::ptr_eq(&fetched.unwrap(), &reaction));
    assert_eq!(reaction.count(), Some(0));
    assert!(message.reactions().cache().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_reaction_added_during_fetch_wins() -> anyhow::Result<()> {
    let tc = TestClient::with_partials(Partials::ALL);
    let msg = MessageRef::unique();
    let emoji = EmojiPayload::unicode("⏳");
    tc.dispatch("CHANNEL_CREATE", channel_create(msg.channel_id, 0))?;
    tc.dispatch("MESSAGE_REACTION_ADD", reaction_event(msg, Snowflake::new(7), &emoji))?;

    let message = tc.message(msg)?;
    let reaction = message.reactions().cache().get(&"⏳".to_string()).unwrap();
    tc.rest.set_message(msg.payload(Vec::new()));
    let gate = tc.rest.hold_fetches();

    let (fetched, added) = tokio::join!(
        message.reactions().fetch_reaction(reaction.emoji(), true),
        async {
            gate.entered().await;
            let added = message.reactions().add(ReactionPayload::new(emoji.clone(), 2), true);
            gate.release();
            added
        }
    );

    let added = added?;
    let fetched = fetched?.unwrap();
    assert!(Arc::ptr_eq(&fetched, &added));
    assert_eq!(fetched.count(), Some(2));
    assert!(message.reactions().cache().contains(&"⏳".to_string()));
    Ok(())
}

#[tokio::test]
async fn test_gateway_add_during_fetch_keeps_reaction() -> anyhow::Result<()> {
    let tc = TestClient::with_partials(Partials::ALL);
    let msg = MessageRef::unique();
    let emoji = EmojiPayload::unicode("⌛");
    tc.dispatch("CHANNEL_CREATE", channel_create(msg.channel_id, 0))?;
    tc.dispatch("MESSAGE_REACTION_ADD", reaction_event(msg, Snowflake::new(7), &emoji))?;

    let message = tc.message(msg)?;
    let reaction = message.reactions().cache().get(&"⌛".to_string()).unwrap();
    assert!(reaction.count().is_none());
    tc.rest.set_message(msg.payload(Vec::new()));
    let gate = tc.rest.hold_fetches();

    let (fetched, readd) = tokio::join!(
        message.reactions().fetch_reaction(reaction.emoji(), true),
        async {
            gate.entered().await;
            let outcome = tc.dispatch(
                "MESSAGE_REACTION_ADD",
                reaction_event(msg, Snowflake::new(8), &emoji),
            );
            gate.release();
            outcome
        }
    );

    assert_eq!(readd?, DispatchOutcome::Handled);
    let fetched = fetched?.unwrap();
    assert!(Arc::ptr_eq(&fetched, &reaction));
    assert_ne!(fetched.count(), Some(0));
    assert!(message.reactions().cache().contains(&"⌛".to_string()));
    assert_eq!(tc.sink.names(), vec!["messageReactionAdd", "messageReactionAdd"]);
    Ok(())
}

#[tokio::test]
async fn test_remote_failure_propagates() -> anyhow::Result<()> {
    let tc = TestClient::new();
    let msg = cached_message(&tc, &[ReactionPayload::new(EmojiPayload::unicode("✅"), 1)])?;
    let message = tc.message(msg)?;
    tc.rest.fail_with_status(500, "Internal Server Error");

    let err = message.reactions().remove_all().await.unwrap_err();
    assert!(err.is_retryable());
    assert_eq!(message.reactions().cache().len(), 1);

    tc.rest.clear_failure();
    let returned = message.reactions().remove_all().await?;
    assert!(Arc::ptr_eq(&returned, &message));
    assert_eq!(tc.rest.delete_all_calls(), 2);
    Ok(())
}

// ============================================================================
// Reaction Lifecycle Tests
// ============================================================================

#[tokio::test]
async fn test_add_remove_lifecycle() -> anyhow::Result<()> {
    let tc = TestClient::new();
    let emoji = EmojiPayload::unicode("👍");
    let msg = cached_message(&tc, &[])?;

    tc.dispatch("MESSAGE_REACTION_ADD", reaction_event(msg, SELF_USER, &emoji))?;
    tc.dispatch("MESSAGE_REACTION_ADD", reaction_event(msg, Snowflake::new(8), &emoji))?;

    let message = tc.message(msg)?;
    let reaction = message.reactions().cache().get(&"👍".to_string()).unwrap();
    assert_eq!(reaction.count(), Some(2));
    assert!(reaction.me());

    tc.dispatch("MESSAGE_REACTION_REMOVE", reaction_event(msg, SELF_USER, &emoji))?;
    assert!(!reaction.me());
    assert_eq!(message.reactions().cache().len(), 1);

    tc.dispatch("MESSAGE_REACTION_REMOVE", reaction_event(msg, Snowflake::new(8), &emoji))?;
    assert!(message.reactions().cache().is_empty());

    assert_eq!(
        tc.sink.names(),
        vec![
            "messageReactionAdd",
            "messageReactionAdd",
            "messageReactionRemove",
            "messageReactionRemove",
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_remove_all_event_clears_cache() -> anyhow::Result<()> {
    let tc = TestClient::new();
    let msg = cached_message(
        &tc,
        &[
            ReactionPayload::new(EmojiPayload::unicode("🍎"), 1),
            ReactionPayload::new(EmojiPayload::unicode("🍐"), 2),
        ],
    )?;

    let outcome = tc.dispatch("MESSAGE_REACTION_REMOVE_ALL", remove_all_event(msg))?;

    assert_eq!(outcome, DispatchOutcome::Handled);
    assert!(tc.message(msg)?.reactions().cache().is_empty());
    match tc.sink.events().as_slice() {
        [ClientEvent::MessageReactionRemoveAll { message }] => {
            assert_eq!(message.id(), msg.message_id);
        }
        other => panic!("unexpected events {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn test_malformed_dispatch_is_rejected() {
    let tc = TestClient::new();
    let err = tc
        .client
        .handle_dispatch("MESSAGE_REACTION_REMOVE_EMOJI", serde_json::json!({"emoji": 5}))
        .unwrap_err();
    assert_eq!(err.error_code(), "INVALID_PAYLOAD");
    assert!(tc.sink.is_empty());
}
