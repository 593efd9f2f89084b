//! Client execution logic: the interactive command loop.
//!
//! Input runs on a dedicated blocking thread (rustyline) bridged to the
//! async loop over an mpsc channel. Commands are handled strictly one at a
//! time; every network call a command triggers is awaited before the next
//! line is processed.

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::mpsc;

use crate::api::ApiClient;
use crate::command::{self, Command};
use crate::controller::Controller;
use crate::state::SessionState;
use crate::store::TokenStore;
use crate::transport::HttpTransport;
use crate::ui::redisplay_prompt;

/// Options for one client run, straight from the CLI.
pub struct RunOptions {
    pub url: String,
    pub chat_id: Option<i64>,
    pub thread_id: Option<i64>,
    pub init_data: Option<String>,
    pub data_dir: Option<String>,
}

/// Run the interactive client until EOF, Ctrl+C or `quit`.
pub async fn run_client(options: RunOptions) -> Result<(), Box<dyn std::error::Error>> {
    let transport = HttpTransport::new(options.url.clone());
    let api = ApiClient::new(Box::new(transport));
    let store = TokenStore::resolve(options.data_dir.as_deref())?;
    let state = SessionState::new(options.init_data, options.chat_id, options.thread_id);
    let mut controller = Controller::new(api, store, state);

    tracing::info!("connecting to {}", options.url);
    let banner = controller.startup().await;
    println!("{}\n", banner);

    // Create channel for rustyline input
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();

    // Spawn a blocking thread for rustyline (synchronous readline)
    let _readline_handle = std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline("arcterm> ") {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            // Channel closed, exit thread
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    while let Some(line) = input_rx.recv().await {
        let command = match command::parse(&line) {
            Ok(command) => command,
            Err(hint) => {
                println!("{}", hint);
                redisplay_prompt();
                continue;
            }
        };

        if command == Command::Quit {
            break;
        }

        let output = controller.dispatch(command).await;
        if !output.is_empty() {
            println!("{}", output);
        }
        redisplay_prompt();
    }

    tracing::info!("client session ended");
    Ok(())
}
