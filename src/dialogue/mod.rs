pub mod orchestrator;
pub mod persona;
pub mod script;
pub mod session;
pub mod signal;
pub mod turn;

pub use orchestrator::{CONVERSATION_ENDED, Orchestrator};
pub use persona::{Persona, PersonaKind, PersonaReply};
pub use session::Session;
pub use signal::{Gates, TransitionSignal};
pub use turn::{Role, Turn};
