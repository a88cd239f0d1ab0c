//! Sentinel protocol: literal control tokens embedded in model output that
//! request a persona handoff. The vocabulary is a wire contract with the
//! scripted instructions and must match byte-for-byte.

use super::persona::PersonaKind;

pub const TRANSFER_TO_VERIFICATION: &str = "TRANSFER_TO_VERIFICATION";
pub const TRANSFER_TO_DISCUSSION: &str = "TRANSFER_TO_DISCUSSION";
pub const TRANSFER_TO_SORRY: &str = "TRANSFER_TO_SORRY";
pub const TRANSFER_TO_CLOSURE: &str = "TRANSFER_TO_CLOSURE";
pub const TRANSFER_TO_APPOINTMENT: &str = "TRANSFER_TO_APPOINTMENT";

/// Guard flags that make the two earliest transitions one-shot. They are
/// inputs to detection, not post-filters: a reply carrying both a guarded and
/// an unguarded sentinel must fall through to the unguarded one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Gates {
    pub identity_confirmed: bool,
    pub verification_complete: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionSignal {
    ToVerification,
    ToDiscussion,
    ToSorry,
    ToClosure,
    ToAppointment,
}

impl TransitionSignal {
    /// Scan a genuine model reply for a transition request.
    ///
    /// Checks run in fixed priority order; the first match wins. Degraded
    /// (provider-failure) replies must not be passed here at all.
    pub fn detect(reply: &str, gates: Gates) -> Option<Self> {
        if !gates.identity_confirmed && reply.contains(TRANSFER_TO_VERIFICATION) {
            return Some(Self::ToVerification);
        }
        if !gates.verification_complete && reply.contains(TRANSFER_TO_DISCUSSION) {
            return Some(Self::ToDiscussion);
        }
        if reply.contains(TRANSFER_TO_SORRY) {
            return Some(Self::ToSorry);
        }
        if reply.contains(TRANSFER_TO_CLOSURE) {
            return Some(Self::ToClosure);
        }
        // Unguarded on purpose: a caller may ask for a different callback
        // time more than once.
        if reply.contains(TRANSFER_TO_APPOINTMENT) {
            return Some(Self::ToAppointment);
        }
        None
    }

    pub fn target(self) -> PersonaKind {
        match self {
            Self::ToVerification => PersonaKind::Verification,
            Self::ToDiscussion => PersonaKind::Discussion,
            Self::ToSorry => PersonaKind::Fallback,
            Self::ToClosure => PersonaKind::Closure,
            Self::ToAppointment => PersonaKind::Appointment,
        }
    }

    /// Synthetic opener sent to the newly activated persona so it produces
    /// its scripted first line within the same external call.
    pub fn opener(self) -> &'static str {
        match self {
            Self::ToVerification => "Start verification",
            Self::ToDiscussion => "Start discussion",
            Self::ToSorry => "Start sorry",
            Self::ToClosure => "Start closure",
            Self::ToAppointment => "Start appointment",
        }
    }

    pub fn ends_conversation(self) -> bool {
        matches!(self, Self::ToSorry | Self::ToClosure)
    }
}
