pub mod message;
pub mod session;

pub use message::Message;
pub use session::{ChatSession, DeliveryMode, SessionState, TypingDelay};
