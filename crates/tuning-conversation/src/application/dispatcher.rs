//! Per-event orchestration: parse, decide, compose, deliver.
//!
//! The dispatcher holds no per-user state. Everything it references is
//! built once at startup and only read afterwards.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};
use tuning_catalog::Catalog;
use tuning_core::delivery::{ReplyPlan, ReplySender};
use tuning_core::entitlement::EntitlementClient;
use tuning_core::event::{InboundEvent, UserIdentity};
use uuid::Uuid;

use crate::domain::command::{CommandParser, InboundCommand};
use crate::domain::policy::{AccessDecision, AccessPolicy};
use crate::domain::reply::{DEFAULT_UPSELL_URL, Outcome, ReplyComposer};

/// Tunables of the conversation engine.
#[derive(Debug, Clone)]
pub struct ConversationSettings {
    /// Text that unlocks premium episodes.
    pub unlock_phrase: String,
    /// Highest free episode number.
    pub free_threshold: u32,
    /// Highest published episode; the catalog's highest number if `None`.
    pub max_episode: Option<u32>,
    /// Link sent in the premium upsell.
    pub upsell_url: String,
}

impl Default for ConversationSettings {
    fn default() -> Self {
        Self {
            unlock_phrase: "tuning_2025_unlock".to_owned(),
            free_threshold: 5,
            max_episode: None,
            upsell_url: DEFAULT_UPSELL_URL.to_owned(),
        }
    }
}

/// Turns inbound events into delivered reply plans.
pub struct Dispatcher {
    parser: CommandParser,
    policy: AccessPolicy,
    composer: ReplyComposer,
    catalog: Arc<Catalog>,
    entitlements: EntitlementClient,
    sender: Arc<dyn ReplySender>,
}

impl Dispatcher {
    /// Wires the engine over a loaded catalog and its two collaborators.
    #[must_use]
    pub fn new(
        catalog: Arc<Catalog>,
        settings: &ConversationSettings,
        entitlements: EntitlementClient,
        sender: Arc<dyn ReplySender>,
    ) -> Self {
        let policy = AccessPolicy::for_catalog(&catalog, settings.free_threshold, settings.max_episode);
        let composer = ReplyComposer::new(
            policy.free_threshold(),
            policy.max_episode(),
            settings.upsell_url.clone(),
        );
        Self {
            parser: CommandParser::new(settings.unlock_phrase.clone()),
            policy,
            composer,
            catalog,
            entitlements,
            sender,
        }
    }

    /// The access policy in force.
    #[must_use]
    pub fn policy(&self) -> &AccessPolicy {
        &self.policy
    }

    /// Handles one event: builds its reply plan and hands it to the reply
    /// sender in a single call. Delivery failures are logged, not returned.
    #[instrument(
        skip(self, event),
        fields(correlation_id = %Uuid::new_v4(), user = %event.user)
    )]
    pub async fn dispatch(&self, event: &InboundEvent) -> ReplyPlan {
        let plan = self.plan(&event.user, &event.text).await;

        match self.sender.send(&event.reply_token, &plan).await {
            Ok(()) => info!(messages = plan.len(), "reply delivered"),
            Err(err) => warn!(error = %err, messages = plan.len(), "reply delivery failed"),
        }
        plan
    }

    /// Builds the reply plan for `text` sent by `user`, consulting the
    /// entitlement store as needed. Never fails.
    pub async fn plan(&self, user: &UserIdentity, text: &str) -> ReplyPlan {
        let command = self.parser.parse(text);
        debug!(?command, "command parsed");

        match command {
            InboundCommand::UnlockRequest => {
                self.entitlements
                    .register(user, Some(self.parser.unlock_phrase()))
                    .await;
                self.composer.compose(Outcome::Unlocked)
            }
            InboundCommand::EpisodeRequest(number) => {
                let entitled = if self.policy.requires_entitlement(number) {
                    self.entitlements.check(user).await
                } else {
                    false
                };
                let outcome = match self.policy.decide(number, entitled) {
                    AccessDecision::Allowed => self
                        .catalog
                        .get(number)
                        .map_or(Outcome::OutOfRange, Outcome::Released),
                    AccessDecision::OutOfRange => Outcome::OutOfRange,
                    AccessDecision::PremiumRequired => Outcome::PremiumRequired(number),
                };
                self.composer.compose(outcome)
            }
            InboundCommand::Unrecognized(_) => self.composer.compose(Outcome::Unrecognized),
        }
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("policy", &self.policy)
            .field("episodes", &self.catalog.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tuning_core::entitlement::EntitlementStore;
    use tuning_core::event::ReplyToken;
    use tuning_test_support::{
        FailingEntitlementStore, FailingReplySender, RecordingEntitlementStore,
        RecordingReplySender, sample_catalog,
    };

    use super::*;

    struct Harness {
        dispatcher: Dispatcher,
        sender: Arc<RecordingReplySender>,
    }

    fn harness(store: Arc<dyn EntitlementStore>) -> Harness {
        let sender = Arc::new(RecordingReplySender::new());
        let settings = ConversationSettings {
            upsell_url: "https://example.com/unlock".to_owned(),
            ..ConversationSettings::default()
        };
        let dispatcher = Dispatcher::new(
            Arc::new(sample_catalog()),
            &settings,
            EntitlementClient::new(store, Duration::from_secs(1)),
            Arc::clone(&sender) as Arc<dyn ReplySender>,
        );
        Harness { dispatcher, sender }
    }

    fn event(text: &str) -> InboundEvent {
        InboundEvent::new(UserIdentity::new("U-reader"), text, ReplyToken::new("token-1"))
    }

    #[tokio::test]
    async fn test_free_episode_is_subtitle_then_lines() {
        let store = Arc::new(RecordingEntitlementStore::new(false));
        let h = harness(Arc::clone(&store) as Arc<dyn EntitlementStore>);

        let plan = h.dispatcher.dispatch(&event("3")).await;

        assert_eq!(plan.messages(), ["第3話", "3-1", "3-2"]);
        assert!(store.lookups().is_empty(), "free episodes skip the store");
        let sent = h.sender.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0.as_str(), "token-1");
        assert_eq!(sent[0].1, plan.messages());
    }

    #[tokio::test]
    async fn test_free_episode_without_subtitle_is_only_lines() {
        let h = harness(Arc::new(RecordingEntitlementStore::new(false)));

        let plan = h.dispatcher.dispatch(&event("4")).await;

        assert_eq!(plan.messages(), ["4-1", "4-2"]);
    }

    #[tokio::test]
    async fn test_premium_episode_without_entitlement_is_upsell() {
        let store = Arc::new(RecordingEntitlementStore::new(false));
        let h = harness(Arc::clone(&store) as Arc<dyn EntitlementStore>);

        let plan = h.dispatcher.dispatch(&event("7")).await;

        assert_eq!(
            plan.messages(),
            [
                "第7話はプレミアム限定です。",
                "続きを読むにはこちら👇",
                "https://example.com/unlock",
            ]
        );
        assert_eq!(store.lookups(), vec![UserIdentity::new("U-reader")]);
    }

    #[tokio::test]
    async fn test_premium_episode_with_entitlement_is_released() {
        let h = harness(Arc::new(RecordingEntitlementStore::new(true)));

        let plan = h.dispatcher.dispatch(&event("7")).await;

        assert_eq!(plan.messages(), ["第7話", "7-1", "7-2"]);
    }

    #[tokio::test]
    async fn test_premium_episode_with_store_outage_fails_closed() {
        let h = harness(Arc::new(FailingEntitlementStore));

        let plan = h.dispatcher.dispatch(&event("12")).await;

        assert_eq!(plan.len(), 3);
        assert_eq!(plan.messages()[0], "第12話はプレミアム限定です。");
    }

    #[tokio::test]
    async fn test_unlock_registers_and_confirms() {
        let store = Arc::new(RecordingEntitlementStore::new(false));
        let h = harness(Arc::clone(&store) as Arc<dyn EntitlementStore>);

        let plan = h.dispatcher.dispatch(&event("tuning_2025_unlock")).await;

        assert_eq!(
            plan.messages(),
            ["✅ プレミアム解放完了！第6話以降が読めるようになりました。"]
        );
        assert_eq!(
            store.registrations(),
            vec![(
                UserIdentity::new("U-reader"),
                Some("tuning_2025_unlock".to_owned())
            )]
        );
    }

    #[tokio::test]
    async fn test_unlock_confirms_even_when_registration_fails() {
        let store = Arc::new(RecordingEntitlementStore::failing());
        let h = harness(Arc::clone(&store) as Arc<dyn EntitlementStore>);

        let plan = h.dispatcher.dispatch(&event("tuning_2025_unlock")).await;

        assert_eq!(plan.len(), 1);
        assert!(plan.messages()[0].starts_with("✅"));
        assert_eq!(store.registrations().len(), 1);
    }

    #[tokio::test]
    async fn test_out_of_range_number() {
        let store = Arc::new(RecordingEntitlementStore::new(true));
        let h = harness(Arc::clone(&store) as Arc<dyn EntitlementStore>);

        for text in ["99", "21", "0", "00"] {
            let plan = h.dispatcher.dispatch(&event(text)).await;
            assert_eq!(plan.messages(), ["1〜20の数字で話数を指定してね。"], "{text:?}");
        }
        assert!(store.lookups().is_empty(), "out-of-range numbers skip the store");
    }

    #[tokio::test]
    async fn test_leading_zero_selects_episode() {
        let h = harness(Arc::new(RecordingEntitlementStore::new(false)));

        let plan = h.dispatcher.dispatch(&event("03")).await;

        assert_eq!(plan.messages(), ["第3話", "3-1", "3-2"]);
    }

    #[tokio::test]
    async fn test_unrecognized_text_gets_help() {
        let h = harness(Arc::new(RecordingEntitlementStore::new(false)));

        let plan = h.dispatcher.dispatch(&event("hello")).await;

        assert_eq!(
            plan.messages(),
            ["読みたい話の番号（1〜20）か、合言葉を送ってね。"]
        );
    }

    #[tokio::test]
    async fn test_delivery_failure_does_not_propagate() {
        let dispatcher = Dispatcher::new(
            Arc::new(sample_catalog()),
            &ConversationSettings::default(),
            EntitlementClient::new(
                Arc::new(RecordingEntitlementStore::new(false)),
                Duration::from_secs(1),
            ),
            Arc::new(FailingReplySender),
        );

        let plan = dispatcher.dispatch(&event("1")).await;

        assert_eq!(plan.messages(), ["第1話", "1-1", "1-2"]);
    }

    #[tokio::test]
    async fn test_max_episode_setting_narrows_range() {
        let settings = ConversationSettings {
            max_episode: Some(10),
            ..ConversationSettings::default()
        };
        let dispatcher = Dispatcher::new(
            Arc::new(sample_catalog()),
            &settings,
            EntitlementClient::new(
                Arc::new(RecordingEntitlementStore::new(true)),
                Duration::from_secs(1),
            ),
            Arc::new(RecordingReplySender::new()),
        );

        let plan = dispatcher.plan(&UserIdentity::new("U1"), "15").await;

        assert_eq!(plan.messages(), ["1〜10の数字で話数を指定してね。"]);
        assert_eq!(dispatcher.policy().max_episode(), 10);
    }

    #[tokio::test]
    async fn test_max_episode_above_catalog_advertises_catalog_range() {
        let settings = ConversationSettings {
            max_episode: Some(30),
            ..ConversationSettings::default()
        };
        let dispatcher = Dispatcher::new(
            Arc::new(sample_catalog()),
            &settings,
            EntitlementClient::new(
                Arc::new(RecordingEntitlementStore::new(true)),
                Duration::from_secs(1),
            ),
            Arc::new(RecordingReplySender::new()),
        );
        let user = UserIdentity::new("U1");

        let out_of_range = dispatcher.plan(&user, "25").await;
        let help = dispatcher.plan(&user, "hello").await;

        assert_eq!(out_of_range.messages(), ["1〜20の数字で話数を指定してね。"]);
        assert_eq!(help.messages(), ["読みたい話の番号（1〜20）か、合言葉を送ってね。"]);
    }
}
