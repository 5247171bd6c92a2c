pub mod app;
pub mod buttons;
pub mod chat;
pub mod format;
pub mod status;

pub use app::AssistantApp;
