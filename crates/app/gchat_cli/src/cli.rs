use clap::{Args, Parser, Subcommand};

/// Relay origin used when neither `--relay-url` nor `GCHAT_RELAY_URL` is set.
pub const DEFAULT_RELAY_URL: &str = "http://localhost:5000";

#[derive(Parser, Debug)]
#[command(name = "gchat", version, about = "Chat with Gemini through the gchat relay")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive session: one prompt per line, `:quit` to leave.
    Chat {
        #[command(flatten)]
        session: SessionArgs,
    },
    /// Send a single prompt and print the answer.
    Ask {
        /// Prompt text.
        prompt: String,

        #[command(flatten)]
        session: SessionArgs,
    },
    /// Print the version.
    Version,
}

#[derive(Args, Debug, Clone)]
pub struct SessionArgs {
    /// Relay origin.
    #[arg(long, env = "GCHAT_RELAY_URL", default_value = DEFAULT_RELAY_URL)]
    pub relay_url: String,

    /// Milliseconds between revealed characters.
    #[arg(long, default_value_t = 30)]
    pub interval_ms: u64,
}
