//! Terminal `Ui`: alerts go to stderr, confirmations read the next input line.

use std::io::{self, Write};
use std::sync::{Arc, PoisonError};

use async_trait::async_trait;
use cadastro_core::Ui;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, Mutex};
use tracing::warn;

/// Shared stdin line source. Commands and confirmations read from the same
/// stream, one line at a time.
#[derive(Clone)]
pub struct Prompt {
    lines: Arc<Mutex<mpsc::UnboundedReceiver<String>>>,
}

impl Prompt {
    /// Spawn a reader task forwarding stdin lines.
    pub fn stdin() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(async move {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                if tx.send(line).is_err() {
                    break;
                }
            }
        });
        Self::from_receiver(rx)
    }

    pub fn from_receiver(rx: mpsc::UnboundedReceiver<String>) -> Self {
        Self {
            lines: Arc::new(Mutex::new(rx)),
        }
    }

    /// Next line, or `None` once input is closed. Cancel-safe.
    pub async fn next_line(&self) -> Option<String> {
        self.lines.lock().await.recv().await
    }
}

type Output = Arc<std::sync::Mutex<Box<dyn Write + Send>>>;

pub struct ConsoleUi {
    prompt: Prompt,
    out: Output,
}

impl ConsoleUi {
    pub fn new(prompt: Prompt) -> Self {
        Self::with_output(prompt, Box::new(io::stdout()))
    }

    /// Write confirmation prompts to `out` instead of stdout.
    pub fn with_output(prompt: Prompt, out: Box<dyn Write + Send>) -> Self {
        Self {
            prompt,
            out: Arc::new(std::sync::Mutex::new(out)),
        }
    }

    fn show_prompt(&self, message: &str) -> io::Result<()> {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        write!(out, "{message} [s/N] ")?;
        out.flush()
    }
}

pub fn is_yes(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "s" | "sim" | "y" | "yes"
    )
}

#[async_trait]
impl Ui for ConsoleUi {
    fn alert(&self, message: &str) {
        let mut err = std::io::stderr().lock();
        let _ = writeln!(err, "!! {message}");
    }

    async fn confirm(&self, message: &str) -> bool {
        if let Err(err) = self.show_prompt(message) {
            warn!(%err, "confirmation prompt not shown");
            return false;
        }
        match self.prompt.next_line().await {
            Some(answer) => is_yes(&answer),
            None => false,
        }
    }
}
