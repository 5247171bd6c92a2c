//! Answer sources for the chat.
//!
//! Only the local keyword rules exist today; an information service backend
//! would implement [`Responder`] and be handed to the chat session instead.

pub mod local;
pub mod responses;

pub use local::KeywordResponder;
pub use responses::ResponseTable;

/// Maps one user message to one reply. Implementations must not keep
/// per-conversation state: every call stands on its own.
pub trait Responder: Send + Sync {
    fn name(&self) -> &str;

    fn respond(&self, text: &str) -> String;
}
