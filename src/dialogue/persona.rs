use super::script::{self, FIRST_MESSAGE_NOTE, FOLLOW_UP_NOTE, HistoryPolicy, Script};
use super::turn::{Role, Turn};
use crate::providers::CompletionClient;
use std::borrow::Cow;
use strum::{Display, EnumCount, EnumIter};

/// The closed set of call phases. One persona exists per kind for the
/// lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumCount, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum PersonaKind {
    InitialContact,
    Verification,
    Discussion,
    Appointment,
    Closure,
    /// The "sorry" persona: fixed apology, ends the conversation.
    Fallback,
}

impl PersonaKind {
    pub fn script(self) -> &'static Script {
        match self {
            Self::InitialContact => &script::INITIAL_CONTACT,
            Self::Verification => &script::VERIFICATION,
            Self::Discussion => &script::DISCUSSION,
            Self::Appointment => &script::APPOINTMENT,
            Self::Closure => &script::CLOSURE,
            Self::Fallback => &script::FALLBACK,
        }
    }
}

/// What a persona hands back to the orchestrator for one turn.
///
/// `degraded` marks replies synthesized from a provider failure; those are
/// user-visible but must never be scanned for transition sentinels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonaReply {
    pub text: String,
    pub degraded: bool,
}

/// One phase of the script with its own system instruction and siloed turn
/// history. A persona never reads another persona's history.
#[derive(Debug)]
pub struct Persona {
    kind: PersonaKind,
    script: &'static Script,
    history: Vec<Turn>,
    /// First-vs-follow-up phrasing flag for personas whose script branches on
    /// it (discussion, appointment). Set only after a successful call.
    opened: bool,
}

impl Persona {
    pub fn new(kind: PersonaKind) -> Self {
        Self {
            kind,
            script: kind.script(),
            history: Vec::new(),
            opened: false,
        }
    }

    pub fn kind(&self) -> PersonaKind {
        self.kind
    }

    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    /// Run one turn: record the user text, call the model, record the reply.
    ///
    /// A provider failure degrades to an `"An error occurred: …"` assistant
    /// turn rather than propagating — the conversation must never silently
    /// stall.
    pub async fn respond(&mut self, client: &dyn CompletionClient, user_text: &str) -> PersonaReply {
        self.history.push(Turn::user(user_text));

        let turns = self.visible_turns();
        let instruction = self.effective_instruction();

        match client
            .complete(&instruction, &turns, self.script.params())
            .await
        {
            Ok(text) => {
                self.history.push(Turn::assistant(text.clone()));
                if self.script.tracks_opening {
                    self.opened = true;
                }
                PersonaReply {
                    text,
                    degraded: false,
                }
            }
            Err(err) => {
                tracing::warn!(persona = %self.kind, error = %err, "completion failed, degrading to error reply");
                let text = format!("An error occurred: {err}");
                self.history.push(Turn::assistant(text.clone()));
                PersonaReply {
                    text,
                    degraded: true,
                }
            }
        }
    }

    /// Empty the history and reset opening state. Kind and script are
    /// untouched.
    pub fn clear(&mut self) {
        self.history.clear();
        self.opened = false;
    }

    fn visible_turns(&self) -> Vec<Turn> {
        match self.script.policy {
            HistoryPolicy::FullHistory => self.history.clone(),
            HistoryPolicy::UserTurnsOnly => self
                .history
                .iter()
                .filter(|turn| turn.role == Role::User)
                .cloned()
                .collect(),
        }
    }

    fn effective_instruction(&self) -> Cow<'static, str> {
        if self.script.tracks_opening {
            let note = if self.opened {
                FOLLOW_UP_NOTE
            } else {
                FIRST_MESSAGE_NOTE
            };
            Cow::Owned(format!("{}\n{note}", self.script.instruction))
        } else {
            Cow::Borrowed(self.script.instruction)
        }
    }
}
