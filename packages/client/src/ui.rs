//! UI utilities for the client.

use std::io::Write;

/// Redisplay the prompt after printing a view fragment
pub fn redisplay_prompt() {
    print!("arcterm> ");
    std::io::stdout().flush().ok();
}
