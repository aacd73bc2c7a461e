use clap::Subcommand;

use crate::connector::DEFAULT_BASE_URL;

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the chat page and its JSON API
    Serve {
        #[arg(short, long, default_value = "8501")]
        port: u16,

        /// Bind to 0.0.0.0 instead of 127.0.0.1, exposing the server on all network interfaces
        #[arg(long)]
        public: bool,

        /// Base URL of the chat-completions server
        #[arg(long, default_value = DEFAULT_BASE_URL)]
        base_url: String,

        /// Answer with an offline mock instead of calling the API
        #[arg(long)]
        mock_llm: bool,
    },

    /// Print the system prompt built for a language selection
    Prompt {
        /// Language name or code (repeatable); defaults to the base language
        #[arg(short = 'L', long)]
        language: Vec<String>,
    },
}
