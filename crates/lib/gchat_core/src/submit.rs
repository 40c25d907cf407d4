//! Submission coordinator: prompt in, revealed answer out.
//!
//! Owns the [`SubmissionState`] (prompt, response, loading flag) and publishes
//! it through a `watch` channel. On submit it calls the relay and hands the
//! answer, or the fallback sentence, to the reveal controller.

use tokio::sync::watch;
use tracing::{debug, error, warn};

use crate::gemini::extract_text;
use crate::relay::RelayClient;
use crate::reveal::{RevealError, RevealHandle};

/// Shown in place of an answer whenever the relay call fails.
pub const FALLBACK_RESPONSE: &str = "Sorry, something went wrong. Please try again.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionState {
    pub prompt: String,
    pub response: String,
    pub is_loading: bool,
}

impl SubmissionState {
    /// Whether the submit affordance is enabled.
    pub fn can_submit(&self) -> bool {
        !self.is_loading && !self.prompt.trim().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank prompt; nothing was sent.
    Ignored,
    /// A submission is already in flight.
    Busy,
    /// The relay answered with candidate text.
    Answered,
    /// The relay failed or its reply had no text; the fallback is shown.
    Failed,
}

pub struct SubmissionCoordinator<C> {
    client: C,
    reveal: RevealHandle,
    state: watch::Sender<SubmissionState>,
}

impl<C: RelayClient> SubmissionCoordinator<C> {
    pub fn new(client: C, reveal: RevealHandle) -> Self {
        let (state, _) = watch::channel(SubmissionState::default());
        Self {
            client,
            reveal,
            state,
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn reveal(&self) -> &RevealHandle {
        &self.reveal
    }

    pub fn state(&self) -> SubmissionState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SubmissionState> {
        self.state.subscribe()
    }

    pub fn set_prompt(&self, prompt: impl Into<String>) {
        let prompt = prompt.into();
        self.state.send_if_modified(|s| {
            if s.prompt == prompt {
                return false;
            }
            s.prompt = prompt;
            true
        });
    }

    /// Submits the current prompt.
    ///
    /// Blank prompts are ignored without touching any state. Otherwise the
    /// previous response is cleared, the loading flag is held for the length
    /// of the relay call, and the resulting text is handed to the reveal
    /// controller.
    ///
    /// # Errors
    ///
    /// [`RevealError::Closed`] if the reveal controller is gone. The loading
    /// flag is reset even then.
    pub async fn submit(&self) -> Result<SubmitOutcome, RevealError> {
        let mut prompt = None;
        let mut busy = false;
        self.state.send_if_modified(|s| {
            if s.prompt.trim().is_empty() {
                return false;
            }
            if s.is_loading {
                busy = true;
                return false;
            }
            s.response.clear();
            s.is_loading = true;
            prompt = Some(s.prompt.clone());
            true
        });

        if busy {
            debug!("submission already in flight");
            return Ok(SubmitOutcome::Busy);
        }
        let Some(prompt) = prompt else {
            return Ok(SubmitOutcome::Ignored);
        };

        if let Err(e) = self.reveal.clear() {
            self.finish(String::new());
            return Err(e);
        }

        let (outcome, text) = match self.client.relay(&prompt).await {
            Ok(payload) => match extract_text(&payload) {
                Some(text) => (SubmitOutcome::Answered, text.to_owned()),
                None => {
                    warn!("relay reply has no candidate text");
                    (SubmitOutcome::Failed, FALLBACK_RESPONSE.to_owned())
                }
            },
            Err(e) => {
                error!(error = %e, "relay call failed");
                (SubmitOutcome::Failed, FALLBACK_RESPONSE.to_owned())
            }
        };

        self.finish(text.clone());
        self.reveal.set_full_text(text)?;
        Ok(outcome)
    }

    fn finish(&self, response: String) {
        self.state.send_modify(|s| {
            s.response = response;
            s.is_loading = false;
        });
    }
}
