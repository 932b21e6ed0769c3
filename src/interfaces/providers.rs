use async_trait::async_trait;

use crate::domains::transcript::ChatMessage;
use crate::error::Result;

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Submit the ordered turns and return the single reply text.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String>;
}
