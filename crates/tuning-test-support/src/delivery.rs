//! Test reply senders — mock `ReplySender` implementations.

use std::sync::Mutex;

use async_trait::async_trait;
use tuning_core::delivery::{ReplyPlan, ReplySender};
use tuning_core::error::DeliveryError;
use tuning_core::event::ReplyToken;

/// A reply sender that records every reply and always succeeds.
#[derive(Debug, Default)]
pub struct RecordingReplySender {
    sent: Mutex<Vec<(ReplyToken, Vec<String>)>>,
}

impl RecordingReplySender {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replies sent so far, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn sent(&self) -> Vec<(ReplyToken, Vec<String>)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReplySender for RecordingReplySender {
    async fn send(&self, token: &ReplyToken, plan: &ReplyPlan) -> Result<(), DeliveryError> {
        self.sent
            .lock()
            .unwrap()
            .push((token.clone(), plan.messages().to_vec()));
        Ok(())
    }
}

/// A reply sender whose platform always rejects the reply.
#[derive(Debug)]
pub struct FailingReplySender;

#[async_trait]
impl ReplySender for FailingReplySender {
    async fn send(&self, _token: &ReplyToken, _plan: &ReplyPlan) -> Result<(), DeliveryError> {
        Err(DeliveryError::Rejected {
            status: 400,
            body: r#"{"message":"Invalid reply token"}"#.to_owned(),
        })
    }
}
