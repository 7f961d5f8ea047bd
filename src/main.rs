use std::io;

use anyhow::Result;
use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use chat_widget::services::widget::{KeyEvent, WidgetEvent};
use chat_widget::view::{ChatView, TerminalView};
use chat_widget::{ChatClient, ChatWidget, HttpChatClient, WidgetConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so they don't interleave with the transcript.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let config = WidgetConfig::from_env()?;
    let client = HttpChatClient::new(&config)?;

    match client.health().await {
        Ok(health) if health.is_healthy() => {
            info!(service = %health.service, version = %health.version, "backend ready")
        }
        Ok(health) => warn!(status = %health.status, "backend is not healthy"),
        Err(err) => warn!(error = %err, base_url = %config.base_url, "health check failed"),
    }

    println!(
        "{}",
        format!(
            "Connected to {}\nEnd a line with \\ to continue on the next one. /quit to exit.\n",
            client.chat_url()
        )
        .truecolor(128, 128, 128)
    );

    let widget = ChatWidget::initialize(TerminalView::new(io::stdout()), client, config)?;
    let mut rl = DefaultEditor::new()?;
    let mut buffer = String::new();

    loop {
        let prompt = if buffer.is_empty() { "> " } else { ". " };
        let line = tokio::task::block_in_place(|| rl.readline(&prompt.green().to_string()));

        let line = match line {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        };

        if buffer.is_empty() && line.trim() == "/quit" {
            break;
        }
        rl.add_history_entry(line.as_str())?;

        // A trailing backslash stands in for Shift+Enter.
        let event = match line.strip_suffix('\\') {
            Some(head) => {
                buffer.push_str(head);
                KeyEvent::shift_enter()
            }
            None => {
                buffer.push_str(&line);
                KeyEvent::enter()
            }
        };

        widget.view().set_input(&buffer);
        match widget.handle(WidgetEvent::KeyPress(event)).await {
            Some(_) => buffer.clear(),
            None => buffer.push('\n'),
        }
    }

    Ok(())
}
