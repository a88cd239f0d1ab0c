use clap::{Parser, Subcommand};

/// `duncall` - scripted multi-persona dialogue agent for debt-collection calls.
#[derive(Parser, Debug)]
#[command(name = "duncall")]
#[command(version = "0.1.0")]
#[command(about = "Scripted multi-persona debt-collection dialogue agent.", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start a collection-call conversation
    Chat {
        /// Single message mode (don't enter interactive mode)
        #[arg(short, long)]
        message: Option<String>,

        /// Model to use
        #[arg(long)]
        model: Option<String>,

        /// Session id (one conversation per id)
        #[arg(long, default_value = "cli")]
        session: String,
    },
}
