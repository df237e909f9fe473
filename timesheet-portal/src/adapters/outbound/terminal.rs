use std::io::Write;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader, Lines, Stdin};
use tokio::sync::Mutex;
use tracing::warn;

use crate::domain::ports::outbound::UserPrompt;

/// Asks questions on stdout and reads answers line by line.
///
/// The binary reads its commands through [`TerminalPrompt::next_line`] as well, so commands and
/// confirmation answers come from one buffered reader.
pub struct TerminalPrompt<R = Stdin> {
    input: Mutex<Lines<BufReader<R>>>,
}

impl TerminalPrompt<Stdin> {
    pub fn stdin() -> Self {
        Self::new(tokio::io::stdin())
    }
}

impl<R> TerminalPrompt<R>
where
    R: AsyncRead + Unpin + Send,
{
    pub fn new(reader: R) -> Self {
        Self {
            input: Mutex::new(BufReader::new(reader).lines()),
        }
    }

    /// Next input line, `None` once the input is closed.
    pub async fn next_line(&self) -> std::io::Result<Option<String>> {
        self.input.lock().await.next_line().await
    }
}

fn show(text: &str) {
    let mut out = std::io::stdout().lock();
    if let Err(e) = write!(out, "{}", text).and_then(|_| out.flush()) {
        warn!(error = %e, "Could not write to stdout");
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[async_trait]
impl<R> UserPrompt for TerminalPrompt<R>
where
    R: AsyncRead + Unpin + Send,
{
    async fn confirm(&self, message: &str) -> bool {
        show(&format!("{} [y/N] ", message));
        match self.next_line().await {
            Ok(Some(answer)) => is_yes(&answer),
            Ok(None) => false,
            Err(e) => {
                warn!(error = %e, "Could not read confirmation");
                false
            }
        }
    }

    async fn alert(&self, message: &str) {
        show(&format!("! {}\n", message));
    }
}
