//! Reply composition.
//!
//! Every outcome maps to at least one message.

use tuning_catalog::Episode;
use tuning_core::delivery::ReplyPlan;

/// Where the upsell sequence points when nothing else is configured.
pub const DEFAULT_UPSELL_URL: &str = "https://note.com/loyal_cosmos1726/n/nefdff71e226f";

/// The result of handling one command, ready to be put into words.
#[derive(Debug, Clone, Copy)]
pub enum Outcome<'a> {
    /// The unlock phrase was received.
    Unlocked,
    /// The episode may be shown.
    Released(&'a Episode),
    /// The requested number is not a published episode.
    OutOfRange,
    /// The episode is premium and the user is not entitled.
    PremiumRequired(u32),
    /// The text was not a command.
    Unrecognized,
}

/// Fixed message templates, parameterised by the published range.
#[derive(Debug, Clone)]
pub struct ReplyComposer {
    free_threshold: u32,
    max_episode: u32,
    upsell_url: String,
}

impl ReplyComposer {
    /// Creates a composer for episodes `1..=max_episode`, of which
    /// `1..=free_threshold` are free.
    #[must_use]
    pub fn new(free_threshold: u32, max_episode: u32, upsell_url: impl Into<String>) -> Self {
        Self {
            free_threshold,
            max_episode,
            upsell_url: upsell_url.into(),
        }
    }

    /// Builds the reply plan for `outcome`.
    #[must_use]
    pub fn compose(&self, outcome: Outcome<'_>) -> ReplyPlan {
        match outcome {
            Outcome::Unlocked => ReplyPlan::single(format!(
                "✅ プレミアム解放完了！第{}話以降が読めるようになりました。",
                self.free_threshold.saturating_add(1)
            )),
            Outcome::Released(episode) => release(episode),
            Outcome::OutOfRange => {
                ReplyPlan::single(format!("1〜{}の数字で話数を指定してね。", self.max_episode))
            }
            Outcome::PremiumRequired(number) => ReplyPlan::from_messages(vec![
                format!("第{number}話はプレミアム限定です。"),
                "続きを読むにはこちら👇".to_owned(),
                self.upsell_url.clone(),
            ])
            .unwrap_or_else(|| ReplyPlan::single(self.upsell_url.clone())),
            Outcome::Unrecognized => ReplyPlan::single(format!(
                "読みたい話の番号（1〜{}）か、合言葉を送ってね。",
                self.max_episode
            )),
        }
    }
}

fn release(episode: &Episode) -> ReplyPlan {
    let subtitle = (!episode.subtitle.is_empty()).then(|| episode.subtitle.clone());
    let messages: Vec<String> = subtitle
        .into_iter()
        .chain(episode.lines.iter().cloned())
        .collect();

    ReplyPlan::from_messages(messages)
        .unwrap_or_else(|| ReplyPlan::single(format!("第{}話はまだ準備中です。", episode.number)))
}
