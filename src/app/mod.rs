mod chat;

use crate::cli::{Cli, Commands};
use crate::config::Config;
use anyhow::Result;

pub async fn dispatch(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Commands::Chat {
            message,
            model,
            session,
        } => chat::run(config, message, model, &session).await,
    }
}
