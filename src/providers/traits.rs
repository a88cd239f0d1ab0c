use crate::dialogue::turn::Turn;
use crate::error::ProviderError;
use async_trait::async_trait;

/// Generation knobs for one completion request. Model name and credentials
/// belong to the client, not the call site.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub max_tokens: u32,
    pub temperature: f64,
}

/// Stateless request/response boundary to a hosted language model.
///
/// Implementations never retry internally; the dialogue layer converts a
/// failure into ordinary conversational text instead of re-throwing it.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Generate a reply from a system instruction and the prior turns.
    async fn complete(
        &self,
        instruction: &str,
        turns: &[Turn],
        params: GenerationParams,
    ) -> Result<String, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoClient;

    #[async_trait]
    impl CompletionClient for EchoClient {
        async fn complete(
            &self,
            _instruction: &str,
            turns: &[Turn],
            _params: GenerationParams,
        ) -> Result<String, ProviderError> {
            Ok(turns.last().map(|t| t.text.clone()).unwrap_or_default())
        }
    }

    #[tokio::test]
    async fn trait_is_object_safe() {
        let client: Box<dyn CompletionClient> = Box::new(EchoClient);
        let turns = vec![Turn::user("hello")];
        let reply = client
            .complete(
                "instruction",
                &turns,
                GenerationParams {
                    max_tokens: 150,
                    temperature: 0.2,
                },
            )
            .await
            .unwrap();
        assert_eq!(reply, "hello");
    }
}
