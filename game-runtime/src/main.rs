use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use game_runtime::config::{Config, OutputFormat};
use game_runtime::driver::RoundDriver;
use game_runtime::terminal::{HELP, TerminalCommand, parse_command, render_message};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout carries only round updates
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting Target Rush...");

    let config = Config::from_env()?;
    let output = config.output_format;
    info!(
        "Round: {}s, target lifetime {:?}, prize at {} points, play area {}x{}",
        config.round.round_duration_secs,
        config.round.target_lifetime,
        config.round.prize_threshold,
        config.play_area.width,
        config.play_area.height
    );

    let (handle, mut updates, driver) = RoundDriver::spawn(config.round, config.play_area)?;

    let printer = tokio::spawn(async move {
        while let Some(message) = updates.recv().await {
            match render_message(&message, output) {
                Ok(line) => println!("{}", line),
                Err(e) => error!("Failed to render update: {:#}", e),
            }
        }
    });

    if output == OutputFormat::Text {
        println!("Enter a nickname to play. {}", HELP);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    info!("Input closed");
                    break;
                };
                match parse_command(&line) {
                    Ok(Some(TerminalCommand::Send(message))) => handle.send(message)?,
                    Ok(Some(TerminalCommand::Help)) => println!("{}", HELP),
                    Ok(Some(TerminalCommand::Quit)) => break,
                    Ok(None) => {}
                    Err(e) => {
                        warn!("Bad command {:?}: {:#}", line, e);
                        if output == OutputFormat::Text {
                            println!("! {:#}", e);
                        }
                    }
                }
            }
            _ = signal::ctrl_c() => {
                info!("Received Ctrl+C, shutting down...");
                break;
            }
        }
    }

    handle.shutdown();
    driver.await?;
    printer.await?;

    info!("Target Rush stopped.");
    Ok(())
}
