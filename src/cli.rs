use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "phonegate")]
#[command(author, version, about = "Telegram bot that asks for a phone number before anything else", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the bot with long polling
    Run {
        /// Discard updates that queued up while the bot was offline
        #[arg(long)]
        drop_pending: bool,
    },

    /// Run the bot behind a webhook (needs BASE_URL)
    Webhook {
        /// Listen port, overrides PORT
        #[arg(short, long)]
        port: Option<u16>,

        /// Accept updates without the secret token header
        #[arg(long)]
        no_verify_secret_header: bool,

        /// Discard updates that queued up while the bot was offline
        #[arg(long)]
        drop_pending: bool,
    },

    /// Remove a registered webhook and exit
    DeleteWebhook {
        /// Keep queued updates instead of dropping them
        #[arg(long)]
        keep_pending: bool,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
