//! Chat platform boundary.
//!
//! [`Gateway`] yields incoming commands and hands out a cloneable [`Responder`] so replies can be
//! sent from the per-command tasks. [`ConsoleGateway`] is the line-oriented implementation used by
//! the binary: each stdin line is `<user_id> /<command> [argument]`.

use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock};

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};
use tokio::sync::Mutex;

use crate::commands::{parse_command, Command, CommandError};

/// User id assigned to lines that start directly with a command.
pub const CONSOLE_USER: &str = "console";

/// Platform display names must be between these lengths (in characters).
const DISPLAY_NAME_LEN: std::ops::RangeInclusive<usize> = 2..=32;

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("platform rejected request: {0}")]
    Rejected(String),
    #[error("gateway closed")]
    Closed,
    #[error("gateway i/o failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Incoming {
    pub user_id: String,
    pub command: Result<Command, CommandError>,
}

pub trait Responder: Clone + Send + Sync + 'static {
    fn reply(&self, user_id: &str, text: &str)
        -> impl Future<Output = Result<(), DeliveryError>> + Send;

    fn set_display_name(&self, name: &str) -> impl Future<Output = Result<(), DeliveryError>> + Send;
}

pub trait Gateway: Send {
    type Responder: Responder;

    fn responder(&self) -> Self::Responder;

    /// Next command, or `None` once the platform has nothing more to deliver.
    ///
    /// Must be cancel safe: the bot loop races it against shutdown.
    fn next_command(&mut self) -> impl Future<Output = Result<Option<Incoming>, DeliveryError>> + Send;
}

/// Split a console line into the issuing user and the parsed command.
///
/// Blank lines yield `None`.
pub fn parse_line(line: &str) -> Option<Incoming> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    if line.starts_with('/') {
        return Some(Incoming {
            user_id: CONSOLE_USER.to_string(),
            command: parse_command(line),
        });
    }
    let (user_id, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    Some(Incoming {
        user_id: user_id.to_string(),
        command: parse_command(rest),
    })
}

pub struct ConsoleGateway<R, W> {
    lines: Lines<R>,
    responder: ConsoleResponder<W>,
}

impl<R, W> ConsoleGateway<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send + 'static,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            lines: reader.lines(),
            responder: ConsoleResponder::new(writer),
        }
    }
}

impl<R, W> Gateway for ConsoleGateway<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send + 'static,
{
    type Responder = ConsoleResponder<W>;

    fn responder(&self) -> Self::Responder {
        self.responder.clone()
    }

    async fn next_command(&mut self) -> Result<Option<Incoming>, DeliveryError> {
        while let Some(line) = self.lines.next_line().await? {
            if let Some(incoming) = parse_line(&line) {
                return Ok(Some(incoming));
            }
        }
        Ok(None)
    }
}

/// Writes each reply as `[<display name> -> <user_id>] <text>`.
pub struct ConsoleResponder<W> {
    out: Arc<Mutex<W>>,
    display_name: Arc<RwLock<String>>,
}

impl<W> Clone for ConsoleResponder<W> {
    fn clone(&self) -> Self {
        Self {
            out: Arc::clone(&self.out),
            display_name: Arc::clone(&self.display_name),
        }
    }
}

impl<W: AsyncWrite + Unpin + Send + 'static> ConsoleResponder<W> {
    pub fn new(writer: W) -> Self {
        Self {
            out: Arc::new(Mutex::new(writer)),
            display_name: Arc::new(RwLock::new("bot".to_string())),
        }
    }

    pub fn display_name(&self) -> String {
        self.display_name
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl<W: AsyncWrite + Unpin + Send + 'static> Responder for ConsoleResponder<W> {
    async fn reply(&self, user_id: &str, text: &str) -> Result<(), DeliveryError> {
        let message = format!("[{} -> {user_id}] {text}\n", self.display_name());
        let mut out = self.out.lock().await;
        out.write_all(message.as_bytes()).await?;
        out.flush().await?;
        Ok(())
    }

    async fn set_display_name(&self, name: &str) -> Result<(), DeliveryError> {
        let name = name.trim();
        if !DISPLAY_NAME_LEN.contains(&name.chars().count()) {
            return Err(DeliveryError::Rejected(format!(
                "display name must be {} to {} characters",
                DISPLAY_NAME_LEN.start(),
                DISPLAY_NAME_LEN.end()
            )));
        }
        *self
            .display_name
            .write()
            .unwrap_or_else(PoisonError::into_inner) = name.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, BufReader};

    #[test]
    fn test_parse_line_with_user() {
        assert_eq!(
            parse_line("1234 /roll 50"),
            Some(Incoming {
                user_id: "1234".to_string(),
                command: Ok(Command::Roll {
                    amount: "50".to_string()
                }),
            })
        );
        assert_eq!(
            parse_line("  1234 daily "),
            Some(Incoming {
                user_id: "1234".to_string(),
                command: Ok(Command::Daily),
            })
        );
    }

    #[test]
    fn test_parse_line_edge_cases() {
        assert_eq!(parse_line("   "), None);
        assert_eq!(
            parse_line("/balance"),
            Some(Incoming {
                user_id: CONSOLE_USER.to_string(),
                command: Ok(Command::Balance),
            })
        );
        assert_eq!(
            parse_line("1234"),
            Some(Incoming {
                user_id: "1234".to_string(),
                command: Err(CommandError::Empty),
            })
        );
    }

    #[tokio::test]
    async fn test_console_gateway_skips_blank_lines() {
        let input: &[u8] = b"\n1 /daily\n\n2 /balance\n";
        let mut gateway = ConsoleGateway::new(BufReader::new(input), tokio::io::sink());

        let first = gateway.next_command().await.unwrap().unwrap();
        assert_eq!(first.user_id, "1");
        let second = gateway.next_command().await.unwrap().unwrap();
        assert_eq!(second.command, Ok(Command::Balance));
        assert!(gateway.next_command().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_console_responder_writes_and_renames() {
        let (writer, mut reader) = tokio::io::duplex(1024);
        let responder = ConsoleResponder::new(writer);

        assert!(matches!(
            responder.set_display_name("x").await,
            Err(DeliveryError::Rejected(_))
        ));
        responder.set_display_name("Randy Marsh").await.unwrap();
        responder.reply("42", "hello").await.unwrap();
        drop(responder);

        let mut written = String::new();
        reader.read_to_string(&mut written).await.unwrap();
        assert_eq!(written, "[Randy Marsh -> 42] hello\n");
    }
}
