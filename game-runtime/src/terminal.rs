use anyhow::{Context, Result, bail};
use game_types::{ClientMessage, CountdownValue, ServerMessage, TargetId};

use crate::config::OutputFormat;

pub const HELP: &str = "commands: start <nickname> | hit <target> | reset | resize <width> <height> | quit";

#[derive(Debug, Clone, PartialEq)]
pub enum TerminalCommand {
    Send(ClientMessage),
    Help,
    Quit,
}

/// Parse one line typed by the player. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Result<Option<TerminalCommand>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    let command = match verb.to_lowercase().as_str() {
        // Blank nicknames are forwarded so the round can reject them
        "start" => TerminalCommand::Send(ClientMessage::StartRound {
            nickname: rest.to_string(),
        }),
        "hit" | "h" => {
            let target_id = rest
                .trim_start_matches('#')
                .parse::<u32>()
                .with_context(|| format!("`{}` is not a target number", rest))?;
            TerminalCommand::Send(ClientMessage::ClickTarget {
                target_id: TargetId(target_id),
            })
        }
        "reset" => TerminalCommand::Send(ClientMessage::ResetRound),
        "resize" => {
            let mut parts = rest.split_whitespace();
            let (Some(width), Some(height), None) = (parts.next(), parts.next(), parts.next()) else {
                bail!("usage: resize <width> <height>");
            };
            TerminalCommand::Send(ClientMessage::ResizePlayArea {
                width: width.parse().context("width must be a number")?,
                height: height.parse().context("height must be a number")?,
            })
        }
        "help" | "?" => TerminalCommand::Help,
        "quit" | "exit" => TerminalCommand::Quit,
        other => bail!("unknown command `{}` ({})", other, HELP),
    };

    Ok(Some(command))
}

/// Render one update as a single output line (or block, for the summary)
pub fn render_message(message: &ServerMessage, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return serde_json::to_string(message).context("Failed to serialize update");
    }

    let line = match message {
        ServerMessage::Countdown { value } => match value {
            CountdownValue::Count(n) => format!("{}...", n),
            CountdownValue::Go => "Go!".to_string(),
        },
        ServerMessage::RoundStarted { nickname } => format!("Round started for {}", nickname),
        ServerMessage::TargetSpawned {
            target_id,
            position,
            size,
        } => format!(
            "[target {}] at ({}, {}) size {}  -> hit {}",
            target_id, position.x, position.y, size, target_id
        ),
        ServerMessage::TargetRemoved { target_id } => format!("[target {}] gone", target_id),
        ServerMessage::ScoreUpdate { score } => format!("Score: {}", score),
        ServerMessage::TimeRemaining { seconds } => format!("Time: {}s", seconds),
        ServerMessage::RoundOver { summary } => format!(
            "=== Time up! ===\n{} scored {} points\nFinished at {}\n{}\n{}",
            summary.nickname,
            summary.score,
            summary.timestamp,
            summary.reward_message,
            summary.reward_notice
        ),
        ServerMessage::ShowEntry => format!("Enter a nickname to play. {}", HELP),
        ServerMessage::ValidationFailed { message } => format!("! {}", message),
        ServerMessage::RequestRejected { message, .. } => format!("! {}", message),
    };

    Ok(line)
}
