//! Line input from stdin.
//!
//! Lines are read on a plain thread and handed over a channel, so a pending
//! read never holds up the async runtime. Ctrl-C counts as closing the input.

use std::io::{self, BufRead, Write};

use async_trait::async_trait;
use console::style;
use tokio::sync::mpsc;
use tracing::debug;

use torrential_core::Prompter;

enum InputEvent {
    Line(String),
    Closed,
}

/// [`Prompter`] backed by the process's stdin.
pub struct StdinPrompter {
    events: mpsc::UnboundedReceiver<InputEvent>,
    closed: bool,
}

impl StdinPrompter {
    /// Start the stdin reader and the Ctrl-C listener.
    pub fn spawn() -> Self {
        let (tx, events) = mpsc::unbounded_channel();

        let line_tx = tx.clone();
        std::thread::spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                match line {
                    Ok(line) => {
                        let line = line.trim_end_matches('\r').to_string();
                        if line_tx.send(InputEvent::Line(line)).is_err() {
                            return;
                        }
                    }
                    Err(e) => {
                        debug!(error = %e, "stdin read failed");
                        break;
                    }
                }
            }
            let _ = line_tx.send(InputEvent::Closed);
        });

        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                let _ = tx.send(InputEvent::Closed);
            }
        });

        Self {
            events,
            closed: false,
        }
    }

    fn mark_closed(&mut self) {
        if !self.closed {
            self.closed = true;
            // leave the prompt line
            println!();
        }
    }
}

#[async_trait]
impl Prompter for StdinPrompter {
    async fn read_line(&mut self, prompt: &str) -> Option<String> {
        if self.closed {
            return None;
        }

        print!("{}", style(prompt).bold());
        let _ = io::stdout().flush();

        match self.events.recv().await {
            Some(InputEvent::Line(line)) => Some(line),
            Some(InputEvent::Closed) | None => {
                self.mark_closed();
                None
            }
        }
    }

    async fn closed(&mut self) {
        while !self.closed {
            match self.events.recv().await {
                Some(InputEvent::Line(_)) => {}
                Some(InputEvent::Closed) | None => self.mark_closed(),
            }
        }
    }
}
