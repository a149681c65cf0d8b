use crate::{context::Context, error::PulsoError, message::Completion};
use async_trait::async_trait;

/// Completion backend trait.
///
/// Every chat-completion API the coach can talk to implements this trait.
/// A provider performs exactly one round trip per `complete` call.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Human-readable provider name.
    fn name(&self) -> &str;

    /// Send a conversation context to the provider and get the reply text.
    async fn complete(&self, context: &Context) -> Result<Completion, PulsoError>;
}
