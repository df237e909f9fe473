use async_trait::async_trait;

/// Blocking questions and notices shown to the user.
#[async_trait]
pub trait UserPrompt: Send + Sync {
    /// Ask for an explicit yes/no. `false` aborts the operation.
    async fn confirm(&self, message: &str) -> bool;

    async fn alert(&self, message: &str);
}
