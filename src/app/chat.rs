//! Read-eval chat loop over stdin, plus the single-message mode.

use crate::config::Config;
use crate::providers::{AnthropicClient, CompletionClient};
use crate::sessions::SessionRegistry;
use anyhow::Result;
use std::io::Write as _;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

pub async fn run(
    config: Config,
    message: Option<String>,
    model_override: Option<String>,
    session_id: &str,
) -> Result<()> {
    let model = model_override.unwrap_or_else(|| config.model.clone());
    tracing::info!(%model, session_id, "starting chat");

    let client: Arc<dyn CompletionClient> = Arc::new(AnthropicClient::with_base_url(
        config.api_key.as_deref(),
        &model,
        config.base_url.as_deref(),
    ));
    let registry = SessionRegistry::new(client);

    if let Some(message) = message {
        let reply = registry.submit(session_id, &message).await;
        println!("{reply}");
        return Ok(());
    }

    println!("Demo begins, type hi or hello to start");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("You: ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();

        if input.is_empty() {
            continue;
        }

        if input.eq_ignore_ascii_case("quit") {
            println!("Debt Collection Bot: Goodbye! Have a great day!");
            break;
        }

        if input.eq_ignore_ascii_case("clear") {
            registry.reset(session_id).await;
            println!("Debt Collection Bot: Conversation history cleared. How can I help you?");
            continue;
        }

        let reply = registry.submit(session_id, input).await;
        println!("Debt Collection Bot: {reply}");
    }

    Ok(())
}
