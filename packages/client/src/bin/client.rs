//! Terminal client for the Raiders raid game ("ARC terminal").
//!
//! Restores the saved session (or signs in via Telegram init data / manual
//! login) and drives the game API from an interactive prompt: raid actions,
//! storage, sell, shop, craft, market, quests, season and admin views.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin arcterm
//! cargo run --bin arcterm -- --url https://game.example/api --chat-id 1
//! ```

use clap::Parser;

use arcterm_client::{RunOptions, run_client};
use arcterm_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "arcterm")]
#[command(about = "Terminal client for the Raiders raid game", long_about = None)]
struct Args {
    /// Game API base URL
    #[arg(short = 'u', long, default_value = "http://127.0.0.1:8000/api")]
    url: String,

    /// Chat the player acts in (server default when omitted)
    #[arg(long)]
    chat_id: Option<i64>,

    /// Forum thread within the chat
    #[arg(long)]
    thread_id: Option<i64>,

    /// Telegram Mini-App init payload for silent sign-in
    #[arg(long)]
    init_data: Option<String>,

    /// Directory for the persisted session token
    #[arg(long)]
    data_dir: Option<String>,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    let options = RunOptions {
        url: args.url,
        chat_id: args.chat_id,
        thread_id: args.thread_id,
        init_data: args.init_data,
        data_dir: args.data_dir,
    };

    if let Err(e) = run_client(options).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
