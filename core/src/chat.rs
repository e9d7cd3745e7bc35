//! Generative chat completion.
//!
//! One call, one reply: [`ChatModel`] covers the single bounded
//! completion request a grounded chat pipeline needs, without streaming,
//! history, or tool calls.

use core::future::Future;

/// A generative model that answers one user prompt under a system
/// instruction.
///
/// Implementations perform a single chat-completion request and return the
/// full reply text. They do not retry; callers own the retry policy and can
/// consult [`Error::is_transient`](crate::Error::is_transient) to drive it.
pub trait ChatModel: Send + Sync {
    /// Generates a reply to `user` under the `system` instruction.
    fn generate(
        &self,
        system: &str,
        user: &str,
    ) -> impl Future<Output = crate::Result<String>> + Send;
}

impl<T: ChatModel> ChatModel for &T {
    fn generate(
        &self,
        system: &str,
        user: &str,
    ) -> impl Future<Output = crate::Result<String>> + Send {
        T::generate(self, system, user)
    }
}

impl<T: ChatModel> ChatModel for std::sync::Arc<T> {
    fn generate(
        &self,
        system: &str,
        user: &str,
    ) -> impl Future<Output = crate::Result<String>> + Send {
        T::generate(self, system, user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    struct CannedChatModel {
        reply: &'static str,
    }

    impl ChatModel for CannedChatModel {
        async fn generate(&self, _system: &str, user: &str) -> crate::Result<String> {
            if user.is_empty() {
                return Err(Error::InvalidInput("empty prompt".into()));
            }
            Ok(self.reply.to_owned())
        }
    }

    #[tokio::test]
    async fn generate_returns_full_reply() {
        let model = CannedChatModel { reply: "42" };
        let reply = model.generate("be brief", "meaning of life?").await.unwrap();
        assert_eq!(reply, "42");
    }

    #[tokio::test]
    async fn generate_propagates_errors() {
        let model = CannedChatModel { reply: "unused" };
        let error = model.generate("be brief", "").await.unwrap_err();
        assert_eq!(error.descriptor(), "InvalidInput");
    }
}
