use std::io::Write;
use std::pin::Pin;
use std::sync::Arc;

use futures::stream::{self, Stream};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tokio::sync::Mutex;

use crate::domain::LedgerError;

pub type PromptStream = Pin<Box<dyn Stream<Item = Result<String, LedgerError>> + Send>>;

type LineSource = Lines<Pin<Box<dyn AsyncBufRead + Send>>>;

/// Line-oriented prompt over any async reader. Clones share the same input,
/// so several answer streams can draw from one stdin.
#[derive(Clone)]
pub struct Console {
    lines: Arc<Mutex<LineSource>>,
}

impl Console {
    pub fn new<R>(reader: R) -> Self
    where
        R: AsyncBufRead + Send + 'static,
    {
        let reader: Pin<Box<dyn AsyncBufRead + Send>> = Box::pin(reader);
        Self {
            lines: Arc::new(Mutex::new(reader.lines())),
        }
    }

    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }

    /// Prints `question` and returns the trimmed reply, or `None` at end of input.
    pub async fn ask(&self, question: &str) -> Result<Option<String>, LedgerError> {
        print!("{}", question);
        std::io::stdout().flush()?;

        let line = self.lines.lock().await.next_line().await?;
        Ok(line.map(|l| l.trim().to_string()))
    }

    /// Like [`Console::ask`], but end of input is an error.
    pub async fn require(&self, question: &str) -> Result<String, LedgerError> {
        self.ask(question).await?.ok_or(LedgerError::InputClosed)
    }

    /// Asks `question` each time the stream is polled for another answer.
    /// A read failure is yielded once and ends the stream.
    pub fn answers(&self, question: &'static str) -> PromptStream {
        Box::pin(stream::unfold(Some(self.clone()), move |state| async move {
            let console = state?;
            match console.ask(question).await {
                Ok(Some(answer)) => Some((Ok(answer), Some(console))),
                Ok(None) => None,
                Err(e) => Some((Err(e), None)),
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::Console;
    use crate::domain::LedgerError;
    use futures::StreamExt;

    #[tokio::test]
    async fn answers_are_trimmed_until_end_of_input() {
        let console = Console::new(&b" 1234 \n0000\n"[..]);
        let mut answers = console.answers("Enter passcode: ");

        assert_eq!(answers.next().await.unwrap().unwrap(), "1234");
        assert_eq!(answers.next().await.unwrap().unwrap(), "0000");
        assert!(answers.next().await.is_none());
    }

    #[tokio::test]
    async fn read_failures_are_yielded_not_swallowed() {
        // not valid UTF-8, so the line reader fails
        let console = Console::new(&b"\xff\xfe\n1234\n"[..]);
        let mut answers = console.answers("Enter passcode: ");

        assert!(matches!(answers.next().await, Some(Err(LedgerError::Io(_)))));
        assert!(answers.next().await.is_none());
    }

    #[tokio::test]
    async fn clones_share_one_input() {
        let console = Console::new(&b"first\nsecond\n"[..]);
        let other = console.clone();

        assert_eq!(console.require("a: ").await.unwrap(), "first");
        assert_eq!(other.require("b: ").await.unwrap(), "second");
        assert!(console.require("c: ").await.is_err());
    }
}
