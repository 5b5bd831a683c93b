use anyhow::{Context, Result, anyhow};
use game_core::{RoundConfig, RoundController};
use game_types::{ClientMessage, DisplayBounds, ServerMessage, TargetId};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, trace};

use crate::presentation::ChannelPresentation;
use crate::scheduler::{TimerFired, TokioScheduler};

pub type RuntimeController = RoundController<ChannelPresentation, TokioScheduler>;

#[derive(Debug)]
enum DriverCommand {
    Client(ClientMessage),
    Shutdown,
}

/// Cheap, cloneable way to feed player input into a running driver.
#[derive(Debug, Clone)]
pub struct RoundHandle {
    commands: mpsc::UnboundedSender<DriverCommand>,
}

impl RoundHandle {
    pub fn send(&self, message: ClientMessage) -> Result<()> {
        self.commands
            .send(DriverCommand::Client(message))
            .map_err(|_| anyhow!("Round driver has stopped"))
    }

    pub fn start(&self, nickname: impl Into<String>) -> Result<()> {
        self.send(ClientMessage::StartRound {
            nickname: nickname.into(),
        })
    }

    pub fn click(&self, target_id: TargetId) -> Result<()> {
        self.send(ClientMessage::ClickTarget { target_id })
    }

    pub fn reset(&self) -> Result<()> {
        self.send(ClientMessage::ResetRound)
    }

    pub fn resize(&self, width: u32, height: u32) -> Result<()> {
        self.send(ClientMessage::ResizePlayArea { width, height })
    }

    /// Ask the driver to stop. Pending timers are dropped with it.
    pub fn shutdown(&self) {
        if self.commands.send(DriverCommand::Shutdown).is_err() {
            trace!("Round driver already stopped");
        }
    }
}

/// Single task owning the round controller. Player input and timer firings
/// are funnelled through one `select!` loop, so the controller sees exactly
/// one event at a time.
pub struct RoundDriver {
    controller: RuntimeController,
    commands: mpsc::UnboundedReceiver<DriverCommand>,
    timers: mpsc::UnboundedReceiver<TimerFired>,
}

impl RoundDriver {
    pub fn new(
        config: RoundConfig,
        bounds: DisplayBounds,
    ) -> Result<(Self, RoundHandle, mpsc::UnboundedReceiver<ServerMessage>)> {
        let (presentation, updates) = ChannelPresentation::new(bounds);
        let (scheduler, timers) = TokioScheduler::new();
        let (command_tx, commands) = mpsc::unbounded_channel();

        let controller = RoundController::new(config, presentation, scheduler)
            .context("Invalid round configuration")?;
        let driver = Self {
            controller,
            commands,
            timers,
        };
        Ok((driver, RoundHandle { commands: command_tx }, updates))
    }

    /// Spawn the driver on the current tokio runtime
    pub fn spawn(
        config: RoundConfig,
        bounds: DisplayBounds,
    ) -> Result<(RoundHandle, mpsc::UnboundedReceiver<ServerMessage>, JoinHandle<()>)> {
        let (driver, handle, updates) = Self::new(config, bounds)?;
        let task = tokio::spawn(driver.run());
        Ok((handle, updates, task))
    }

    pub fn controller_mut(&mut self) -> &mut RuntimeController {
        &mut self.controller
    }

    pub async fn run(self) {
        let RoundDriver {
            mut controller,
            mut commands,
            mut timers,
        } = self;

        info!("Round driver started");
        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(DriverCommand::Client(message)) => {
                        handle_client_message(&mut controller, message);
                    }
                    Some(DriverCommand::Shutdown) | None => break,
                },
                Some(fired) = timers.recv() => {
                    controller.on_timer_fired(fired.handle);
                }
            }
        }
        info!("Round driver stopped");
    }
}

/// Apply one player input to the controller
pub fn handle_client_message(controller: &mut RuntimeController, message: ClientMessage) {
    match message {
        ClientMessage::StartRound { nickname } => {
            if let Err(e) = controller.request_start(&nickname) {
                debug!("Start request not accepted: {}", e);
            }
        }
        ClientMessage::ClickTarget { target_id } => controller.on_target_clicked(target_id),
        ClientMessage::ResetRound => controller.request_reset(),
        ClientMessage::ResizePlayArea { width, height } => {
            debug!("Play area resized to {}x{}", width, height);
            controller
                .presentation_mut()
                .set_bounds(DisplayBounds::new(width, height));
        }
    }
}
