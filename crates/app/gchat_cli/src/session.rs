//! Chat session: coordinator, reveal controller and terminal wiring.

use std::io::Write;
use std::time::Duration;

use gchat_core::relay::HttpRelayClient;
use gchat_core::reveal::RevealController;
use gchat_core::submit::{SubmissionCoordinator, SubmitOutcome};
use log::{debug, info};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;

use crate::Result;
use crate::cli::SessionArgs;
use crate::render::Renderer;

const QUIT_COMMANDS: [&str; 2] = [":quit", ":exit"];

pub struct Session {
    coordinator: SubmissionCoordinator<HttpRelayClient>,
    controller: JoinHandle<()>,
}

impl Session {
    /// Spawns the reveal controller on the current runtime.
    pub fn start(args: &SessionArgs) -> Result<Self> {
        let client = HttpRelayClient::new(&args.relay_url)?;
        info!("using relay at {}", client.endpoint());

        let (controller, reveal) = RevealController::new(Duration::from_millis(args.interval_ms));
        let controller = tokio::spawn(controller.run());

        Ok(Self {
            coordinator: SubmissionCoordinator::new(client, reveal),
            controller,
        })
    }

    /// Submits one prompt and renders the answer to completion.
    pub async fn ask<W: Write>(&self, prompt: &str, out: W) -> Result<SubmitOutcome> {
        let mut reveal_rx = self.coordinator.reveal().subscribe();
        self.coordinator.set_prompt(prompt);

        let outcome = self.coordinator.submit().await?;
        debug!("submission finished: {outcome:?}");

        let expected = self.coordinator.state().response;
        Renderer::new(out)
            .follow_until(&mut reveal_rx, &expected)
            .await?;
        Ok(outcome)
    }

    /// Interactive loop over stdin lines.
    ///
    /// Answers render while the next prompt can already be typed; a new
    /// submission supersedes a reveal still in progress.
    pub async fn chat<W: Write>(&self, out: W) -> Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut reveal_rx = self.coordinator.reveal().subscribe();
        let mut renderer = Renderer::new(out);
        renderer.prompt()?;

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else { break };
                    if QUIT_COMMANDS.contains(&line.trim()) {
                        break;
                    }
                    self.coordinator.set_prompt(line);
                    if self.coordinator.submit().await? == SubmitOutcome::Ignored {
                        renderer.prompt()?;
                    }
                }
                changed = reveal_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let state = reveal_rx.borrow_and_update().clone();
                    if renderer.render(&state)? {
                        renderer.prompt()?;
                    }
                }
            }
        }

        // Let an answer still being revealed finish before leaving.
        let expected = self.coordinator.state().response;
        renderer.follow_until(&mut reveal_rx, &expected).await?;
        Ok(())
    }

    /// Drops the coordinator and waits for the controller to wind down.
    pub async fn shutdown(self) {
        drop(self.coordinator);
        let _ = self.controller.await;
    }
}
