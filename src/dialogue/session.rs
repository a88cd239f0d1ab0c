use super::persona::{Persona, PersonaKind};
use super::signal::Gates;

/// Full state of one ongoing conversation: the six personas, the guard
/// flags, and the current-phase pointer. Exclusively owned by the
/// conversation it belongs to; never shared across callers.
#[derive(Debug)]
pub struct Session {
    current: PersonaKind,
    identity_confirmed: bool,
    verification_complete: bool,
    ended: bool,
    personas: [Persona; 6],
}

impl Session {
    pub fn new() -> Self {
        Self {
            current: PersonaKind::InitialContact,
            identity_confirmed: false,
            verification_complete: false,
            ended: false,
            personas: [
                Persona::new(PersonaKind::InitialContact),
                Persona::new(PersonaKind::Verification),
                Persona::new(PersonaKind::Discussion),
                Persona::new(PersonaKind::Appointment),
                Persona::new(PersonaKind::Closure),
                Persona::new(PersonaKind::Fallback),
            ],
        }
    }

    pub fn current(&self) -> PersonaKind {
        self.current
    }

    pub fn ended(&self) -> bool {
        self.ended
    }

    pub fn identity_confirmed(&self) -> bool {
        self.identity_confirmed
    }

    pub fn verification_complete(&self) -> bool {
        self.verification_complete
    }

    pub fn gates(&self) -> Gates {
        Gates {
            identity_confirmed: self.identity_confirmed,
            verification_complete: self.verification_complete,
        }
    }

    pub fn persona(&self, kind: PersonaKind) -> &Persona {
        &self.personas[kind as usize]
    }

    pub(crate) fn persona_mut(&mut self, kind: PersonaKind) -> &mut Persona {
        &mut self.personas[kind as usize]
    }

    pub(crate) fn set_current(&mut self, kind: PersonaKind) {
        self.current = kind;
    }

    pub(crate) fn confirm_identity(&mut self) {
        self.identity_confirmed = true;
    }

    pub(crate) fn complete_verification(&mut self) {
        self.verification_complete = true;
    }

    pub(crate) fn end(&mut self) {
        self.ended = true;
    }

    /// Full reset: every persona's history emptied, all flags cleared,
    /// current phase back to initial contact. Idempotent; usable at any
    /// point, including after the conversation has ended.
    pub fn clear(&mut self) {
        for persona in &mut self.personas {
            persona.clear();
        }
        self.current = PersonaKind::InitialContact;
        self.identity_confirmed = false;
        self.verification_complete = false;
        self.ended = false;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
