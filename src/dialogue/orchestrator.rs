use super::session::Session;
use super::signal::TransitionSignal;
use crate::providers::CompletionClient;
use std::sync::Arc;

/// Fixed reply for any input arriving after the conversation has ended.
pub const CONVERSATION_ENDED: &str =
    "The conversation has ended. Type 'clear' to start a new conversation.";

/// The finite-state handoff mechanism: forwards user input to the current
/// persona, inspects genuine replies for transition sentinels, and performs
/// at most one synthetic-opener handoff per external input.
pub struct Orchestrator {
    client: Arc<dyn CompletionClient>,
}

impl Orchestrator {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    /// Process one external user input and return the user-visible reply.
    /// The caller never sees a raw sentinel string.
    pub async fn handle(&self, session: &mut Session, user_text: &str) -> String {
        if session.ended() {
            return CONVERSATION_ENDED.to_string();
        }

        let current = session.current();
        let reply = session
            .persona_mut(current)
            .respond(self.client.as_ref(), user_text)
            .await;

        // Error replies are user-visible but never transition: an upstream
        // failure message could coincidentally contain a sentinel substring.
        if reply.degraded {
            return reply.text;
        }

        match TransitionSignal::detect(&reply.text, session.gates()) {
            Some(signal) => self.hand_off(session, signal).await,
            None => reply.text,
        }
    }

    /// Apply a transition and elicit the new persona's opening line. Exactly
    /// one handoff level: the opener reply is returned verbatim, never
    /// scanned again.
    async fn hand_off(&self, session: &mut Session, signal: TransitionSignal) -> String {
        let target = signal.target();
        tracing::info!(from = %session.current(), to = %target, "persona handoff");

        match signal {
            TransitionSignal::ToVerification => session.confirm_identity(),
            TransitionSignal::ToDiscussion => session.complete_verification(),
            TransitionSignal::ToSorry | TransitionSignal::ToClosure => session.end(),
            TransitionSignal::ToAppointment => {}
        }
        session.set_current(target);

        session
            .persona_mut(target)
            .respond(self.client.as_ref(), signal.opener())
            .await
            .text
    }
}
