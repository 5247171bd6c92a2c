//! Terminal front-end over the same chat session as the window.

use std::io::Write;
use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::ai::Responder;
use crate::config::Config;
use crate::core::{ChatSession, TypingDelay};
use crate::ui::format;

const FAREWELLS: [&str; 3] = ["quit", "exit", "bye"];

pub fn is_farewell(line: &str) -> bool {
    let line = line.trim().to_lowercase();
    FAREWELLS.contains(&line.as_str())
}

pub async fn run(config: &Config, responder: Arc<dyn Responder>) -> anyhow::Result<()> {
    let session = ChatSession::new(
        responder,
        TypingDelay::new(config.typing_min, config.typing_max),
        config.delivery,
    );
    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    run_with(session, stdin, &mut stdout, &config.assistant_name).await
}

/// Reads one question per line until a farewell or end of input.
pub async fn run_with<R, W>(
    mut session: ChatSession,
    input: R,
    out: &mut W,
    name: &str,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "🎓 {}", name)?;
    writeln!(out, "{}", "=".repeat(50))?;
    writeln!(out, "Type 'help' for assistance, 'quit' to exit\n")?;

    let mut lines = input.lines();
    loop {
        write!(out, "You: ")?;
        out.flush()?;

        let Some(line) = lines.next_line().await.context("cannot read from stdin")? else {
            writeln!(out)?;
            break;
        };

        if is_farewell(&line) {
            writeln!(out, "Assistant: Thank you for using the {}! Goodbye! 👋", name)?;
            break;
        }
        if line.trim() == "transcript" {
            writeln!(out, "{}", session.transcript_json()?)?;
            continue;
        }
        if !session.submit(&line) {
            continue;
        }

        if let Some(reply) = session.next_reply().await {
            writeln!(out, "Assistant: {}\n", format::to_plain(&reply.text))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::responses::Topic;
    use crate::ai::{KeywordResponder, ResponseTable};
    use crate::core::DeliveryMode;
    use std::time::Duration;

    fn session() -> ChatSession {
        ChatSession::new(
            Arc::new(KeywordResponder::new(ResponseTable::builtin())),
            TypingDelay::new(Duration::from_millis(1000), Duration::from_millis(1000)),
            DeliveryMode::Ordered,
        )
    }

    async fn transcript_of(input: &str) -> String {
        let mut out = Vec::new();
        run_with(session(), input.as_bytes(), &mut out, "Test Assistant")
            .await
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn farewells_are_case_insensitive() {
        assert!(is_farewell("Bye"));
        assert!(is_farewell("  EXIT "));
        assert!(!is_farewell("goodbye everyone"));
    }

    #[tokio::test(start_paused = true)]
    async fn answers_then_says_goodbye() {
        let output = transcript_of("Tell me about faculty\n\n   \nbye\nhello\n").await;
        let faculty = ResponseTable::builtin().get(Topic::Faculty).to_string();
        assert!(output.contains(&format!("Assistant: {}", faculty)));
        assert!(output.contains("Goodbye!"));
        // nothing after the farewell is answered
        assert_eq!(output.matches("Assistant:").count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn bold_markers_are_stripped() {
        let output = transcript_of("admission\n").await;
        assert!(output.contains("Admission Information:"));
        assert!(!output.contains("**"));
    }

    #[tokio::test(start_paused = true)]
    async fn transcript_command_prints_json() {
        let output = transcript_of("help\ntranscript\n").await;
        assert!(output.contains("\"author\": \"user\""));
        assert!(output.contains("\"author\": \"bot\""));
    }
}
